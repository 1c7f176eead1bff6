//! Minimization of DFAs through partition refinement.
//!
//! [`minimize`] first completes the given DFA (see [`crate::complete()`]) and restricts it to its
//! reachable part. The states are then partitioned by [`partition_refinement::refine`] and each
//! block becomes one state of the minimized DFA. Besides the minimized DFA, the returned
//! [`MinimizationResult`] holds everything that is needed to explain the minimization: the
//! state mappings in both directions, the transitions of the original that were merged into a
//! single one, and the [`PartitionStep`]s of the refinement.

use std::collections::BTreeSet;

use tracing::debug;

/// The refinement algorithm itself, independent of any explanation.
pub mod partition_refinement;
pub mod explain;

pub use explain::{PartitionStep, RefinementObserver, StepRecorder, SymbolCheck};

use crate::{
    automaton::{Automaton, StateId, Transition},
    classify::alphabet,
    complete::complete,
    math::{OrderedMap, Partition},
    naming::synthetic_name,
    symbol::Symbol,
};

/// A transition of the minimized DFA together with the transitions of the original DFA that it
/// replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombinedTransition {
    /// Target in the minimized DFA.
    pub target: StateId,
    /// The transitions of the (completed, reachable) original that collapsed into this one.
    pub originals: Vec<Transition>,
}

/// Everything that a single call to [`minimize`] produces. The value is never updated; it has
/// to be recomputed whenever the automaton changes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinimizationResult {
    original: Automaton,
    prepared: Automaton,
    minimized: Automaton,
    state_mapping: OrderedMap<StateId, StateId>,
    equivalent_states: Partition<StateId>,
    minimized_to_original: OrderedMap<StateId, BTreeSet<StateId>>,
    combined_transitions: OrderedMap<StateId, OrderedMap<Symbol, CombinedTransition>>,
    steps: Vec<PartitionStep>,
    degenerate: bool,
}

impl MinimizationResult {
    fn degenerate(automaton: &Automaton) -> Self {
        Self {
            original: automaton.clone(),
            prepared: automaton.clone(),
            minimized: automaton.clone(),
            state_mapping: OrderedMap::default(),
            equivalent_states: Partition::default(),
            minimized_to_original: OrderedMap::default(),
            combined_transitions: OrderedMap::default(),
            steps: vec![],
            degenerate: true,
        }
    }

    /// The automaton that was passed to [`minimize`], exactly as given.
    pub fn original(&self) -> &Automaton {
        &self.original
    }

    /// The completed and reachable part of the original, on which the partition was computed.
    pub fn prepared(&self) -> &Automaton {
        &self.prepared
    }

    /// The minimized DFA.
    pub fn minimized(&self) -> &Automaton {
        &self.minimized
    }

    /// Maps every reachable state of the original (including a dead state added by completion)
    /// to its state in the minimized DFA.
    pub fn state_mapping(&self) -> &OrderedMap<StateId, StateId> {
        &self.state_mapping
    }

    /// The final partition. Block `i` became the minimized state [`synthetic_name`]`(i)`.
    pub fn equivalent_states(&self) -> &Partition<StateId> {
        &self.equivalent_states
    }

    /// Maps each minimized state to the original states it merges.
    pub fn minimized_to_original(&self) -> &OrderedMap<StateId, BTreeSet<StateId>> {
        &self.minimized_to_original
    }

    /// For each minimized state and symbol, the combined transition.
    pub fn combined_transitions(
        &self,
    ) -> &OrderedMap<StateId, OrderedMap<Symbol, CombinedTransition>> {
        &self.combined_transitions
    }

    /// The refinement trace, starting with the initial partition.
    pub fn steps(&self) -> &[PartitionStep] {
        &self.steps
    }

    /// Whether the input was not a DFA, in which case nothing was minimized and every map, the
    /// partition and the trace are empty.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}

/// Minimizes `dfa`. For input that is not classified as a DFA, a degenerate result is returned
/// (see [`MinimizationResult::is_degenerate`]).
pub fn minimize(dfa: &Automaton) -> MinimizationResult {
    if !dfa.is_dfa() {
        debug!("refusing to minimize an NFA");
        return MinimizationResult::degenerate(dfa);
    }

    let prepared = partition_refinement::reachable_part(&complete(dfa));
    let alphabet = alphabet(prepared.transitions());
    let mut recorder = StepRecorder::new(&alphabet);
    let partition = partition_refinement::refine(&prepared, &alphabet, &mut recorder);

    let state_mapping: OrderedMap<StateId, StateId> = prepared
        .states()
        .iter()
        .filter_map(|q| {
            partition
                .block_of(q)
                .map(|i| (q.clone(), synthetic_name(i)))
        })
        .collect();
    let minimized_to_original: OrderedMap<StateId, BTreeSet<StateId>> = partition
        .iter()
        .enumerate()
        .map(|(i, block)| (synthetic_name(i), block.clone()))
        .collect();

    let mut combined_transitions: OrderedMap<StateId, OrderedMap<Symbol, CombinedTransition>> =
        minimized_to_original
            .keys()
            .map(|q| (q.clone(), OrderedMap::default()))
            .collect();
    let mut transitions = vec![];
    for t in prepared.transitions() {
        let (Some(from), Some(to)) = (state_mapping.get(&t.from), state_mapping.get(&t.to)) else {
            continue;
        };
        combined_transitions
            .entry(from.clone())
            .or_default()
            .entry(t.symbol.clone())
            .or_insert_with(|| CombinedTransition {
                target: to.clone(),
                originals: vec![],
            })
            .originals
            .push(t.clone());
        transitions.push(Transition::new(from.clone(), t.symbol.clone(), to.clone()));
    }

    let minimized = Automaton::new(
        minimized_to_original.keys().cloned(),
        transitions,
        prepared
            .initial()
            .and_then(|q| state_mapping.get(q))
            .cloned(),
        prepared
            .finals()
            .iter()
            .filter_map(|q| state_mapping.get(q))
            .cloned(),
    );
    debug!(
        "minimized {} reachable states to {}",
        prepared.size(),
        minimized.size()
    );

    MinimizationResult {
        original: dfa.clone(),
        prepared,
        minimized,
        state_mapping,
        equivalent_states: partition,
        minimized_to_original,
        combined_transitions,
        steps: recorder.into_steps(),
        degenerate: false,
    }
}

impl Automaton {
    /// Returns the minimized DFA, see [`minimize`].
    pub fn minimized(&self) -> Automaton {
        minimize(self).minimized
    }
}
