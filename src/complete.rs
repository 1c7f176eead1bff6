use tracing::debug;

use crate::{
    automaton::{Automaton, Transition},
    classify::{alphabet, is_complete_dfa, missing_transitions},
    naming::fresh_name,
};

/// Makes a DFA total over its alphabet by routing every missing `(state, symbol)` pair to a new,
/// non-final dead state that loops on every symbol.
///
/// The input is returned unchanged if it is not a DFA, if it is already complete, or if its
/// alphabet is empty. The dead state gets the first synthetic name at or after the position
/// given by the number of states that does not collide with an existing state.
pub fn complete(automaton: &Automaton) -> Automaton {
    if !automaton.is_dfa() || is_complete_dfa(automaton) {
        return automaton.clone();
    }
    let alphabet = alphabet(automaton.transitions());
    if alphabet.is_empty() {
        return automaton.clone();
    }
    let missing = missing_transitions(automaton);

    let dead = fresh_name(automaton.size(), |name| {
        automaton.contains_state(name.as_str())
    });
    debug!(
        "adding dead state {dead} for {} missing transitions",
        missing.len()
    );

    let (mut states, mut transitions, initial, finals) = automaton.clone().into_parts();
    transitions.extend(
        missing
            .into_iter()
            .map(|(q, a)| Transition::new(q, a, dead.clone())),
    );
    transitions.extend(
        alphabet
            .into_iter()
            .map(|a| Transition::new(dead.clone(), a, dead.clone())),
    );
    states.push(dead);
    Automaton::new(states, transitions, initial, finals)
}

impl Automaton {
    /// Returns the completion of `self`, see [`complete`].
    pub fn completed(&self) -> Automaton {
        complete(self)
    }
}
