use itertools::Itertools;

use super::{Automaton, StateId, Transition};

/// Helper struct for the construction of automata. It collects states, transitions, the initial
/// state and the final states, and only normalizes them once [`AutomatonBuilder::build`] is
/// called.
///
/// States that are mentioned by a transition, as the initial state or as a final state are
/// added implicitly, in the order in which they are first mentioned after the explicitly given
/// states.
///
/// # Example
///
/// ```
/// use automata_workbench::prelude::*;
///
/// let dfa = Automaton::builder()
///     .with_transitions([("A", '0', "B"), ("A", '1', "A"), ("B", '0', "B"), ("B", '1', "A")])
///     .with_initial("A")
///     .with_finals(["B"])
///     .build();
/// assert!(dfa.is_dfa());
/// assert_eq!(dfa.size(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    states: Vec<StateId>,
    transitions: Vec<Transition>,
    initial: Option<StateId>,
    finals: Vec<StateId>,
}

impl AutomatonBuilder {
    /// Adds the given states.
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Adds transitions, given as anything that converts into a [`Transition`], most commonly
    /// `(from, symbol, to)` tuples.
    pub fn with_transitions<I, T>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Transition>,
    {
        self.transitions
            .extend(transitions.into_iter().map(Into::into));
        self
    }

    /// Sets the initial state.
    pub fn with_initial(mut self, initial: impl Into<StateId>) -> Self {
        self.initial = Some(initial.into());
        self
    }

    /// Adds final states.
    pub fn with_finals<I, S>(mut self, finals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.finals.extend(finals.into_iter().map(Into::into));
        self
    }

    /// Builds the [`Automaton`].
    pub fn build(self) -> Automaton {
        let states = self
            .states
            .into_iter()
            .chain(
                self.transitions
                    .iter()
                    .flat_map(|t| [t.from.clone(), t.to.clone()]),
            )
            .chain(self.initial.iter().cloned())
            .chain(self.finals.iter().cloned())
            .unique()
            .collect_vec();
        Automaton::new(states, self.transitions, self.initial, self.finals)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn implicit_states_in_mention_order() {
        let aut = Automaton::builder()
            .with_states(["Q"])
            .with_transitions([("B", 'a', "A"), ("A", 'b', "C")])
            .with_initial("D")
            .with_finals(["C", "E"])
            .build();
        let names = aut.states().iter().map(|q| q.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Q", "B", "A", "C", "D", "E"]);
        assert_eq!(aut.initial(), Some(&StateId::from("D")));
        assert_eq!(aut.finals().len(), 2);
    }
}
