//! Classification of automata into DFA and NFA, together with diagnostics that explain a
//! classification and a check for completeness.

use indexmap::IndexSet;
use itertools::Itertools;

use crate::{
    automaton::{Automaton, AutomatonKind, StateId, Transition},
    math::{Map, OrderedMap, Set},
    symbol::Symbol,
};

/// Determines whether the given transitions form a DFA or an NFA. Any epsilon transition makes
/// it an NFA, as does a `(from, symbol)` pair with more than one distinct target.
pub fn classify(transitions: &[Transition]) -> AutomatonKind {
    let mut targets: Map<(&StateId, &Symbol), Set<&StateId>> = Map::default();
    for t in transitions {
        if t.is_epsilon() {
            return AutomatonKind::Nfa;
        }
        targets.entry((&t.from, &t.symbol)).or_default().insert(&t.to);
    }
    if targets.values().any(|to| to.len() > 1) {
        AutomatonKind::Nfa
    } else {
        AutomatonKind::Dfa
    }
}

/// The distinct non-epsilon symbols used by `transitions`, in order of first appearance. This is
/// the enumeration order that all algorithms of the crate use.
pub fn alphabet(transitions: &[Transition]) -> Vec<Symbol> {
    transitions
        .iter()
        .filter(|t| !t.is_epsilon())
        .map(|t| t.symbol.clone())
        .unique()
        .collect()
}

/// A `(from, symbol)` pair with more than one distinct target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NondeterministicChoice {
    /// The state from which the choice is made.
    pub from: StateId,
    /// The symbol on which the choice is made.
    pub symbol: Symbol,
    /// All distinct targets, in order of first appearance.
    pub destinations: Vec<StateId>,
}

/// Explains why an automaton is (or is not) an NFA.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// Whether some transition is labelled with an epsilon marker.
    pub has_epsilon: bool,
    /// Whether some `(from, symbol)` pair has several targets.
    pub has_nondeterministic: bool,
    /// The epsilon transitions.
    pub epsilon_transitions: Vec<Transition>,
    /// The nondeterministic choices.
    pub nondeterministic_transitions: Vec<NondeterministicChoice>,
}

impl Analysis {
    /// The classification that this analysis implies.
    pub fn kind(&self) -> AutomatonKind {
        if self.has_epsilon || self.has_nondeterministic {
            AutomatonKind::Nfa
        } else {
            AutomatonKind::Dfa
        }
    }
}

/// Computes an [`Analysis`] of the transitions of `automaton`. Groups are reported in the order
/// in which their `(from, symbol)` pair first appears.
pub fn analyze(automaton: &Automaton) -> Analysis {
    let mut targets: OrderedMap<(&StateId, &Symbol), IndexSet<&StateId>> = OrderedMap::default();
    let mut epsilon_transitions = vec![];
    for t in automaton.transitions() {
        if t.is_epsilon() {
            epsilon_transitions.push(t.clone());
        } else {
            targets.entry((&t.from, &t.symbol)).or_default().insert(&t.to);
        }
    }

    let nondeterministic_transitions = targets
        .into_iter()
        .filter(|(_, to)| to.len() > 1)
        .map(|((from, symbol), to)| NondeterministicChoice {
            from: from.clone(),
            symbol: symbol.clone(),
            destinations: to.into_iter().cloned().collect(),
        })
        .collect_vec();

    Analysis {
        has_epsilon: !epsilon_transitions.is_empty(),
        has_nondeterministic: !nondeterministic_transitions.is_empty(),
        epsilon_transitions,
        nondeterministic_transitions,
    }
}

/// Lists every `(state, symbol)` pair over the alphabet of `automaton` for which no transition
/// exists, states in their order and symbols in alphabet order.
pub fn missing_transitions(automaton: &Automaton) -> Vec<(StateId, Symbol)> {
    let present: Set<(&StateId, &Symbol)> = automaton
        .transitions()
        .iter()
        .filter(|t| !t.is_epsilon())
        .map(|t| (&t.from, &t.symbol))
        .collect();
    let alphabet = alphabet(automaton.transitions());
    automaton
        .states()
        .iter()
        .cartesian_product(alphabet.iter())
        .filter(|(q, a)| !present.contains(&(*q, *a)))
        .map(|(q, a)| (q.clone(), a.clone()))
        .collect()
}

/// Checks whether `automaton` is a DFA in which every state has a transition on every symbol of
/// the alphabet.
pub fn is_complete_dfa(automaton: &Automaton) -> bool {
    if automaton.kind() == AutomatonKind::Nfa {
        return false;
    }
    let analysis = analyze(automaton);
    if analysis.has_epsilon || analysis.has_nondeterministic {
        return false;
    }
    missing_transitions(automaton).is_empty()
}
