//! Construction and transformation algorithms for finite automata over string-labelled states.
//!
//! The central type is [`Automaton`], a plain value consisting of states, transitions, an optional
//! initial state and a set of final states. Whether an automaton is deterministic is never stored
//! independently: the [`AutomatonKind`] is re-derived by [`classify()`] whenever the transitions
//! change, so it always agrees with them. Epsilon transitions may be written with any of the
//! markers in [`symbol::EPSILON_MARKERS`], and [`symbol::is_epsilon`] is the single place where
//! they are recognized.
//!
//! On top of this, the crate provides
//! - [`classify()`]/[`analyze`]/[`is_complete_dfa`] for determining the type of an automaton and
//!   explaining it,
//! - [`accept`] for running words, deterministically or on sets of states,
//! - [`complete()`] for making a DFA total by adding a dead state,
//! - [`to_dfa`] for the subset construction, handling epsilon transitions,
//! - [`minimize`] for partition refinement, which also records every refinement step so that the
//!   minimization can be explained afterwards.
//!
//! Every operation is a pure function from values to new values. States that are synthesized by
//! an algorithm are named through [`naming::synthetic_name`], which derives the name from a
//! position (`A`, `B`, ..., `Z`, `AA`, ...).
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_workbench::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{Automaton, AutomatonBuilder, AutomatonKind, StateId, Transition},
        classify::{
            alphabet, analyze, classify, is_complete_dfa, missing_transitions, Analysis,
            NondeterministicChoice,
        },
        complete::complete,
        math::Partition,
        naming::synthetic_name,
        minimization::{
            minimize, CombinedTransition, MinimizationResult, PartitionStep, RefinementObserver,
            StepRecorder, SymbolCheck,
        },
        parse::{parse, ParseError},
        run::{accept, accept_str, canonical_key, epsilon_closure, Acceptance},
        subset::{subset_construction, to_dfa, SubsetConstruction},
        symbol::{is_epsilon, Symbol, EPSILON},
    };
}

/// Type aliases for the collections used throughout the crate, and [`math::Partition`].
pub mod math;

/// Symbols and the recognition of epsilon.
pub mod symbol;

/// Names for synthesized states.
pub mod naming;

/// The automaton data model, its builder and edit operations.
pub mod automaton;
pub use automaton::{Automaton, AutomatonKind, StateId, Transition};

/// Classification of automata into DFA and NFA.
pub mod classify;
pub use classify::{analyze, classify, is_complete_dfa};

/// Running words on automata.
pub mod run;
pub use run::accept;

/// Completion of DFAs with a dead state.
pub mod complete;
pub use complete::complete;

/// The subset construction.
pub mod subset;
pub use subset::to_dfa;

/// Minimization through partition refinement.
pub mod minimization;
pub use minimization::{minimize, MinimizationResult};

/// Reading and writing automata in a small text format.
pub mod parse;

/// Tables for displaying automata and minimization results.
pub mod show;

/// Random automata and words. This is feature gated behind the `random` feature.
#[cfg(feature = "random")]
pub mod random;
