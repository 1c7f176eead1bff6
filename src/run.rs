//! Runs of words on automata.
//!
//! A [`Automaton`] that is classified as a DFA is run deterministically, anything else is run by
//! tracking the epsilon-closed set of active states. In both cases the states (or state sets)
//! that were visited are recorded in the returned [`Acceptance`].

use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::trace;

use crate::{
    automaton::{Automaton, AutomatonKind, StateId},
    symbol::Symbol,
};

/// The outcome of running a word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Acceptance {
    /// Whether the word is accepted.
    pub accepted: bool,
    /// The visited states, starting with the initial one. For NFAs, each entry is a set of states
    /// written as the sorted, comma separated identifiers (see [`canonical_key`]).
    pub path: Vec<String>,
}

impl Acceptance {
    fn rejected(path: Vec<String>) -> Self {
        Self {
            accepted: false,
            path,
        }
    }
}

/// Writes a set of states as its sorted identifiers joined by commas. The empty set gives the
/// empty string.
pub fn canonical_key<'a, I>(states: I) -> String
where
    I: IntoIterator<Item = &'a StateId>,
{
    states.into_iter().sorted().unique().join(",")
}

/// Computes the set of states reachable from `seeds` using only epsilon transitions. The seeds
/// themselves are part of the closure.
pub fn epsilon_closure<'a, I>(automaton: &Automaton, seeds: I) -> BTreeSet<StateId>
where
    I: IntoIterator<Item = &'a StateId>,
{
    let mut closure: BTreeSet<StateId> = BTreeSet::new();
    let mut stack = seeds.into_iter().cloned().collect_vec();
    while let Some(q) = stack.pop() {
        if !closure.insert(q.clone()) {
            continue;
        }
        for t in automaton.transitions_from(q.as_str()) {
            if t.is_epsilon() && !closure.contains(&t.to) {
                stack.push(t.to.clone());
            }
        }
    }
    closure
}

/// The union of all targets reached from `states` on a transition labelled `symbol`, without
/// taking epsilon transitions. Epsilon markers as input match nothing.
pub fn step<'a, I>(automaton: &Automaton, states: I, symbol: &Symbol) -> BTreeSet<StateId>
where
    I: IntoIterator<Item = &'a StateId>,
{
    if symbol.is_epsilon() {
        return BTreeSet::new();
    }
    states
        .into_iter()
        .flat_map(|q| automaton.successors(q.as_str(), symbol))
        .cloned()
        .collect()
}

/// Runs `word` on `automaton` and reports whether it is accepted, together with the path that
/// was taken. Without an initial state nothing is accepted and the path is empty.
pub fn accept<I, S>(automaton: &Automaton, word: I) -> Acceptance
where
    I: IntoIterator<Item = S>,
    S: Into<Symbol>,
{
    let Some(initial) = automaton.initial() else {
        trace!("automaton has no initial state, rejecting");
        return Acceptance::default();
    };
    let word = word.into_iter().map(Into::into).collect_vec();
    match automaton.kind() {
        AutomatonKind::Dfa => accept_deterministic(automaton, initial, &word),
        AutomatonKind::Nfa => accept_nondeterministic(automaton, initial, &word),
    }
}

/// Like [`accept`], but treats each `char` of `word` as one symbol.
pub fn accept_str(automaton: &Automaton, word: &str) -> Acceptance {
    accept(automaton, word.chars())
}

fn accept_deterministic(automaton: &Automaton, initial: &StateId, word: &[Symbol]) -> Acceptance {
    let mut current = initial;
    let mut path = vec![current.to_string()];
    for symbol in word {
        match automaton.successors(current.as_str(), symbol).next() {
            Some(next) => {
                current = next;
                path.push(current.to_string());
            }
            None => {
                trace!("no transition from {current} on {symbol}, rejecting");
                return Acceptance::rejected(path);
            }
        }
    }
    Acceptance {
        accepted: automaton.is_final(current.as_str()),
        path,
    }
}

fn accept_nondeterministic(
    automaton: &Automaton,
    initial: &StateId,
    word: &[Symbol],
) -> Acceptance {
    let mut active = epsilon_closure(automaton, [initial]);
    let mut path = vec![canonical_key(&active)];
    for symbol in word {
        let reached = step(automaton, &active, symbol);
        if reached.is_empty() {
            trace!("no state of {{{}}} moves on {symbol}, rejecting", path[path.len() - 1]);
            return Acceptance::rejected(path);
        }
        active = epsilon_closure(automaton, &reached);
        path.push(canonical_key(&active));
    }
    Acceptance {
        accepted: active.iter().any(|q| automaton.is_final(q.as_str())),
        path,
    }
}

impl Automaton {
    /// Runs `word` and returns whether it is accepted, see [`accept`].
    pub fn accepts<I, S>(&self, word: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        accept(self, word).accepted
    }
}
