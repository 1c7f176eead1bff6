use std::{borrow::Borrow, fmt::Display};

use itertools::Itertools;
use tracing::trace;

use crate::{classify::classify, math::Set, symbol::Symbol};

mod builder;
pub use builder::AutomatonBuilder;

mod edit;

/// Identifier of a state. Identifiers are unique within one [`Automaton`], and states are
/// referenced by identifier everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StateId(String);

impl StateId {
    /// Creates a new identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Gives the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for StateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StateId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&StateId> for StateId {
    fn from(value: &StateId) -> Self {
        value.clone()
    }
}

/// A transition `(from, symbol, to)`. Two transitions with the same triple are the same
/// transition.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// Origin of the transition.
    pub from: StateId,
    /// Target of the transition.
    pub to: StateId,
    /// Symbol labelling the transition, possibly an epsilon marker.
    pub symbol: Symbol,
}

impl Transition {
    /// Creates a new transition.
    pub fn new(from: impl Into<StateId>, symbol: impl Into<Symbol>, to: impl Into<StateId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            symbol: symbol.into(),
        }
    }

    /// Whether the transition is labelled by an epsilon marker.
    pub fn is_epsilon(&self) -> bool {
        self.symbol.is_epsilon()
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -{}-> {}", self.from, self.symbol, self.to)
    }
}

impl<F, S, T> From<(F, S, T)> for Transition
where
    F: Into<StateId>,
    S: Into<Symbol>,
    T: Into<StateId>,
{
    fn from((from, symbol, to): (F, S, T)) -> Self {
        Transition::new(from, symbol, to)
    }
}

/// Whether an automaton is deterministic or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutomatonKind {
    /// No epsilon transitions and at most one target per `(state, symbol)`.
    Dfa,
    /// Epsilon transitions or several targets for some `(state, symbol)`.
    Nfa,
}

impl Display for AutomatonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutomatonKind::Dfa => write!(f, "DFA"),
            AutomatonKind::Nfa => write!(f, "NFA"),
        }
    }
}

/// A finite automaton over string-labelled states.
///
/// The value is immutable by convention: every edit (see for example
/// [`Automaton::add_transition`]) consumes the automaton and returns a new one, and the cached
/// [`AutomatonKind`] is re-derived from the transitions whenever they change. Edits that refer
/// to unknown states or transitions leave the automaton untouched.
///
/// Duplicate states, transitions and final states are collapsed on construction. The initial
/// state, final states and transitions that refer to a state not among the given states are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "AutomatonRecord"))]
pub struct Automaton {
    states: Vec<StateId>,
    transitions: Vec<Transition>,
    initial: Option<StateId>,
    finals: Vec<StateId>,
    kind: AutomatonKind,
}

/// The shape in which an automaton is stored. Deserializing an [`Automaton`] goes through this
/// record so that the stored `kind` is ignored and re-derived.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct AutomatonRecord {
    states: Vec<StateId>,
    transitions: Vec<Transition>,
    initial: Option<StateId>,
    finals: Vec<StateId>,
    #[allow(dead_code)]
    kind: Option<AutomatonKind>,
}

#[cfg(feature = "serde")]
impl From<AutomatonRecord> for Automaton {
    fn from(value: AutomatonRecord) -> Self {
        Automaton::new(value.states, value.transitions, value.initial, value.finals)
    }
}

impl Default for Automaton {
    fn default() -> Self {
        Self {
            states: vec![],
            transitions: vec![],
            initial: None,
            finals: vec![],
            kind: AutomatonKind::Dfa,
        }
    }
}

impl Automaton {
    /// Creates a new automaton from its parts, normalizing them as described on [`Automaton`].
    pub fn new<S, T, F>(states: S, transitions: T, initial: Option<StateId>, finals: F) -> Self
    where
        S: IntoIterator<Item = StateId>,
        T: IntoIterator<Item = Transition>,
        F: IntoIterator<Item = StateId>,
    {
        let states = states.into_iter().unique().collect_vec();
        let known: Set<&StateId> = states.iter().collect();
        let transitions = transitions
            .into_iter()
            .filter(|t| {
                let declared = known.contains(&t.from) && known.contains(&t.to);
                if !declared {
                    trace!("dropping transition {t} between undeclared states");
                }
                declared
            })
            .unique()
            .collect_vec();
        let initial = initial.filter(|q| known.contains(q));
        let finals = finals
            .into_iter()
            .filter(|q| known.contains(q))
            .unique()
            .collect_vec();
        let kind = classify(&transitions);
        Self {
            states,
            transitions,
            initial,
            finals,
            kind,
        }
    }

    /// Returns a fresh [`AutomatonBuilder`].
    pub fn builder() -> AutomatonBuilder {
        AutomatonBuilder::default()
    }

    /// The states, in the order they were added.
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    /// The (deduplicated) transitions.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// The initial state, if one is set.
    pub fn initial(&self) -> Option<&StateId> {
        self.initial.as_ref()
    }

    /// The final states.
    pub fn finals(&self) -> &[StateId] {
        &self.finals
    }

    /// The cached classification, always equal to what [`classify`] computes on the transitions.
    pub fn kind(&self) -> AutomatonKind {
        self.kind
    }

    /// Shorthand for `self.kind() == AutomatonKind::Dfa`.
    pub fn is_dfa(&self) -> bool {
        self.kind == AutomatonKind::Dfa
    }

    /// Number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Whether a state with the given identifier exists.
    pub fn contains_state(&self, id: &str) -> bool {
        self.states.iter().any(|q| q.as_str() == id)
    }

    /// Whether the given state is final.
    pub fn is_final(&self, id: &str) -> bool {
        self.finals.iter().any(|q| q.as_str() == id)
    }

    /// Iterates over the transitions leaving `from`.
    pub fn transitions_from<'a>(&'a self, from: &'a str) -> impl Iterator<Item = &'a Transition> + 'a {
        self.transitions
            .iter()
            .filter(move |t| t.from.as_str() == from)
    }

    /// Iterates over the targets reached from `from` on a transition labelled `symbol`. Epsilon
    /// markers are compared by their meaning, so `"e"` finds transitions labelled `"ε"`.
    pub fn successors<'a>(
        &'a self,
        from: &'a str,
        symbol: &'a Symbol,
    ) -> impl Iterator<Item = &'a StateId> + 'a {
        self.transitions_from(from)
            .filter(move |t| {
                t.symbol == *symbol || (t.symbol.is_epsilon() && symbol.is_epsilon())
            })
            .map(|t| &t.to)
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Vec<StateId>,
        Vec<Transition>,
        Option<StateId>,
        Vec<StateId>,
    ) {
        (self.states, self.transitions, self.initial, self.finals)
    }
}

impl Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} with states {{{}}}, initial {}, final {{{}}}",
            self.kind,
            self.states.iter().join(", "),
            self.initial
                .as_ref()
                .map(|q| q.to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.finals.iter().join(", ")
        )?;
        for t in &self.transitions {
            writeln!(f, "  {t}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn construction_normalizes() {
        let aut = Automaton::new(
            ["A", "B", "A"].map(StateId::from),
            [
                Transition::new("A", '0', "B"),
                Transition::new("A", '0', "B"),
                Transition::new("B", '1', "A"),
            ],
            Some(StateId::from("Z")),
            ["B", "B", "X"].map(StateId::from),
        );
        assert_eq!(aut.states().len(), 2);
        assert_eq!(aut.transitions().len(), 2);
        assert_eq!(aut.initial(), None);
        assert_eq!(aut.finals(), &[StateId::from("B")]);
        assert_eq!(aut.kind(), AutomatonKind::Dfa);
    }

    #[test_log::test]
    fn transitions_need_declared_endpoints() {
        let aut = Automaton::new(
            [StateId::from("A")],
            [
                Transition::new("A", 'a', "A"),
                Transition::new("A", 'a', "B"),
                Transition::new("B", 'b', "A"),
            ],
            Some(StateId::from("A")),
            [],
        );
        assert_eq!(aut.transitions(), &[Transition::new("A", 'a', "A")]);
        assert_eq!(aut.kind(), AutomatonKind::Dfa);
    }

    #[test_log::test]
    fn kind_is_derived() {
        let aut = Automaton::builder()
            .with_transitions([("A", "e", "B"), ("B", "a", "C")])
            .build();
        assert_eq!(aut.kind(), AutomatonKind::Nfa);
        let aut = Automaton::builder()
            .with_transitions([("A", "0", "B"), ("A", "0", "C")])
            .build();
        assert_eq!(aut.kind(), AutomatonKind::Nfa);
        let aut = Automaton::builder()
            .with_transitions([("A", "0", "B"), ("A", "0", "B")])
            .build();
        assert_eq!(aut.kind(), AutomatonKind::Dfa);
        assert!(Automaton::default().is_dfa());
    }

    #[test]
    fn successors_compare_epsilon_by_meaning() {
        let aut = Automaton::builder()
            .with_transitions([("A", "ε", "B"), ("A", "", "C"), ("A", "a", "D")])
            .build();
        let eps = Symbol::from("e");
        assert_eq!(aut.successors("A", &eps).count(), 2);
        assert_eq!(
            aut.successors("A", &Symbol::from('a')).collect_vec(),
            vec![&StateId::from("D")]
        );
    }
}
