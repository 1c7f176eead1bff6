//! Edits on an [`Automaton`]. Each edit consumes the automaton and gives back the edited one, or
//! the unchanged input if the request refers to something that does not exist. Callers that need
//! to know whether an edit applied have to check for existence themselves.

use itertools::Itertools;
use tracing::trace;

use super::{Automaton, StateId, Transition};
use crate::classify::classify;

impl Automaton {
    fn with_transitions_replaced(mut self, transitions: Vec<Transition>) -> Self {
        self.transitions = transitions;
        self.kind = classify(&self.transitions);
        self
    }

    /// Adds a state with the given identifier, unless it already exists.
    pub fn add_state(mut self, id: impl Into<StateId>) -> Self {
        let id = id.into();
        if !self.contains_state(id.as_str()) {
            self.states.push(id);
        }
        self
    }

    /// Removes a state together with every transition touching it. The state is also dropped
    /// from the final states, and the initial state is cleared if it was the removed one.
    pub fn remove_state(mut self, id: &str) -> Self {
        if !self.contains_state(id) {
            trace!("ignoring removal of unknown state {id}");
            return self;
        }
        self.states.retain(|q| q.as_str() != id);
        self.finals.retain(|q| q.as_str() != id);
        if self.initial.as_ref().is_some_and(|q| q.as_str() == id) {
            self.initial = None;
        }
        let transitions = std::mem::take(&mut self.transitions)
            .into_iter()
            .filter(|t| t.from.as_str() != id && t.to.as_str() != id)
            .collect();
        self.with_transitions_replaced(transitions)
    }

    /// Renames the state `from` to `to`, rewriting all references. Ignored if `from` does not
    /// exist or `to` is already taken.
    pub fn rename_state(mut self, from: &str, to: impl Into<StateId>) -> Self {
        let to = to.into();
        if !self.contains_state(from) || self.contains_state(to.as_str()) {
            trace!("ignoring rename of {from} to {to}");
            return self;
        }
        let rename = |q: &mut StateId| {
            if q.as_str() == from {
                *q = to.clone();
            }
        };
        self.states.iter_mut().for_each(rename);
        self.finals.iter_mut().for_each(rename);
        self.initial.iter_mut().for_each(rename);
        for t in self.transitions.iter_mut() {
            rename(&mut t.from);
            rename(&mut t.to);
        }
        // renaming can not merge transitions, as `to` was not in use
        self
    }

    /// Adds a transition if both of its endpoints exist and it is not already present.
    pub fn add_transition(self, transition: impl Into<Transition>) -> Self {
        let transition = transition.into();
        if !self.contains_state(transition.from.as_str())
            || !self.contains_state(transition.to.as_str())
        {
            trace!("ignoring transition {transition} between unknown states");
            return self;
        }
        if self.transitions.contains(&transition) {
            return self;
        }
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        self.with_transitions_replaced(transitions)
    }

    /// Removes a transition, if present.
    pub fn remove_transition(self, transition: &Transition) -> Self {
        if !self.transitions.contains(transition) {
            return self;
        }
        let transitions = self
            .transitions
            .iter()
            .filter(|t| *t != transition)
            .cloned()
            .collect();
        self.with_transitions_replaced(transitions)
    }

    /// Sets the initial state. `Some` of an unknown state is ignored, `None` clears it.
    pub fn set_initial(mut self, initial: Option<&str>) -> Self {
        match initial {
            None => self.initial = None,
            Some(q) if self.contains_state(q) => self.initial = Some(StateId::from(q)),
            Some(q) => trace!("ignoring unknown initial state {q}"),
        }
        self
    }

    /// Replaces the final states. Unknown states and duplicates are dropped.
    pub fn set_finals<I, S>(mut self, finals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        let finals = finals
            .into_iter()
            .map(Into::into)
            .filter(|q: &StateId| self.contains_state(q.as_str()))
            .unique()
            .collect();
        self.finals = finals;
        self
    }

    /// Flips whether the given state is final.
    pub fn toggle_final(mut self, id: &str) -> Self {
        if !self.contains_state(id) {
            return self;
        }
        if self.is_final(id) {
            self.finals.retain(|q| q.as_str() != id);
        } else {
            self.finals.push(StateId::from(id));
        }
        self
    }
}
