use std::collections::{BTreeSet, VecDeque};

use tracing::{debug, trace};

use crate::{
    automaton::{Automaton, StateId, Transition},
    classify::alphabet,
    math::Bijection,
    naming::synthetic_name,
    run::{canonical_key, epsilon_closure, step},
    symbol::Symbol,
};

/// The result of [`subset_construction`]: the DFA together with the set of NFA states that each
/// of its states stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetConstruction {
    /// The constructed DFA.
    pub dfa: Automaton,
    /// For each state of `dfa`, in state order, the NFA states it represents. The dead state, if
    /// present, represents the empty set.
    pub labels: Vec<(StateId, BTreeSet<StateId>)>,
}

/// Converts an NFA (possibly with epsilon transitions) into an equivalent, complete DFA through
/// the breadth-first subset construction. DFAs are returned unchanged, each state labelled with
/// itself.
///
/// The epsilon-closure of the initial state becomes the state `A`, and every further set of NFA
/// states gets the next synthetic name (see [`crate::naming`]) in the order in which it is
/// discovered. Whenever a set has no successor on some symbol, the transition is routed to a
/// single dead state that is added at the very end and loops on every symbol. A state of the DFA
/// is final if its set contains a final state of the NFA.
///
/// An NFA without initial state yields the empty automaton.
pub fn subset_construction(nfa: &Automaton) -> SubsetConstruction {
    if nfa.is_dfa() {
        return SubsetConstruction {
            dfa: nfa.clone(),
            labels: nfa
                .states()
                .iter()
                .map(|q| (q.clone(), BTreeSet::from([q.clone()])))
                .collect(),
        };
    }
    let Some(initial) = nfa.initial() else {
        debug!("NFA has no initial state, subset construction yields the empty automaton");
        return SubsetConstruction {
            dfa: Automaton::default(),
            labels: vec![],
        };
    };
    let alphabet = alphabet(nfa.transitions());

    let mut names: Bijection<String, StateId> = Bijection::new();
    let mut sets: Vec<BTreeSet<StateId>> = vec![];
    let mut queue = VecDeque::new();
    let mut transitions = vec![];
    let mut missing: Vec<(StateId, Symbol)> = vec![];

    let seed = epsilon_closure(nfa, [initial]);
    names.insert(canonical_key(&seed), synthetic_name(0));
    sets.push(seed);
    queue.push_back(0usize);

    while let Some(current) = queue.pop_front() {
        let source = synthetic_name(current);
        for symbol in &alphabet {
            let reached = step(nfa, &sets[current], symbol);
            if reached.is_empty() {
                missing.push((source.clone(), symbol.clone()));
                continue;
            }
            let closure = epsilon_closure(nfa, &reached);
            let key = canonical_key(&closure);
            let target = match names.get_by_left(&key) {
                Some(name) => name.clone(),
                None => {
                    let name = synthetic_name(sets.len());
                    trace!("discovered {{{key}}} as {name}");
                    names.insert(key, name.clone());
                    queue.push_back(sets.len());
                    sets.push(closure);
                    name
                }
            };
            transitions.push(Transition::new(source.clone(), symbol.clone(), target));
        }
    }

    let finals = sets
        .iter()
        .enumerate()
        .filter(|(_, set)| set.iter().any(|q| nfa.is_final(q.as_str())))
        .map(|(i, _)| synthetic_name(i))
        .collect::<Vec<_>>();
    let mut labels = sets
        .into_iter()
        .enumerate()
        .map(|(i, set)| (synthetic_name(i), set))
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        let dead = synthetic_name(labels.len());
        debug!(
            "routing {} missing transitions to dead state {dead}",
            missing.len()
        );
        transitions.extend(
            missing
                .into_iter()
                .map(|(q, a)| Transition::new(q, a, dead.clone())),
        );
        transitions.extend(
            alphabet
                .iter()
                .map(|a| Transition::new(dead.clone(), a.clone(), dead.clone())),
        );
        labels.push((dead, BTreeSet::new()));
    }

    debug!(
        "subset construction produced {} states from {}",
        labels.len(),
        nfa.size()
    );
    let states = labels.iter().map(|(q, _)| q.clone()).collect::<Vec<_>>();
    SubsetConstruction {
        dfa: Automaton::new(states, transitions, Some(synthetic_name(0)), finals),
        labels,
    }
}

/// Shorthand for the DFA produced by [`subset_construction`].
pub fn to_dfa(nfa: &Automaton) -> Automaton {
    subset_construction(nfa).dfa
}

impl Automaton {
    /// Returns an equivalent DFA, see [`to_dfa`].
    pub fn determinize(&self) -> Automaton {
        to_dfa(self)
    }
}
