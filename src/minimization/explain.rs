//! Recording of the partition refinement for later explanation.
//!
//! The refinement in [`super::partition_refinement`] does not know about any of this; it only
//! reports to a [`RefinementObserver`]. [`StepRecorder`] is the observer that turns these reports
//! into the list of [`PartitionStep`]s that ends up in a [`super::MinimizationResult`].

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::{automaton::StateId, math::Partition, symbol::Symbol};

/// The outcome of grouping the members of a block by the block their transition on `symbol`
/// leads into.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolCheck {
    /// The symbol that was checked.
    pub symbol: Symbol,
    /// Whether the block falls apart into more than one group.
    pub split: bool,
    /// The groups, in order of first appearance among the block members.
    pub groups: Vec<BTreeSet<StateId>>,
}

/// What the refinement reports after it examined a block.
#[derive(Debug, Clone, Copy)]
pub struct Examination<'a> {
    /// The partition before the examination.
    pub before: &'a Partition<StateId>,
    /// The partition after the examination, equal to `before` if nothing was split.
    pub after: &'a Partition<StateId>,
    /// The block that was examined.
    pub block: &'a BTreeSet<StateId>,
    /// The full alphabet.
    pub alphabet: &'a [Symbol],
    /// The checks made, up to and including the one that split the block.
    pub checks: &'a [SymbolCheck],
}

impl Examination<'_> {
    /// The check that split the block, if any.
    pub fn splitting_check(&self) -> Option<&SymbolCheck> {
        self.checks.iter().find(|check| check.split)
    }
}

/// Receives the intermediate results of partition refinement. Both methods do nothing by
/// default, and `()` is the observer that ignores everything.
pub trait RefinementObserver {
    /// Called once with the partition into final and non-final states.
    fn initial(&mut self, _partition: &Partition<StateId>) {}
    /// Called for each block with more than one member that was examined.
    fn examined(&mut self, _examination: Examination<'_>) {}
}

impl RefinementObserver for () {}

/// One entry of the explanation of a minimization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionStep {
    /// Position of the step, starting at `0` for the initial partition.
    pub step: usize,
    /// Human readable summary.
    pub description: String,
    /// Blocks before the step, empty for the initial partition.
    pub before: Vec<BTreeSet<StateId>>,
    /// Blocks after the step.
    pub after: Vec<BTreeSet<StateId>>,
    /// The block that was examined, `None` for the initial partition.
    pub examined: Option<BTreeSet<StateId>>,
    /// The full alphabet that was available for splitting.
    pub alphabet: Vec<Symbol>,
    /// The symbols that were tried and what they did.
    pub checks: Vec<SymbolCheck>,
}

impl PartitionStep {
    /// Whether this step split a block.
    pub fn is_split(&self) -> bool {
        self.checks.iter().any(|check| check.split)
    }
}

/// Formats a block as `{A, B, C}`.
pub fn show_block(block: &BTreeSet<StateId>) -> String {
    format!("{{{}}}", block.iter().join(", "))
}

/// Formats a list of blocks as `{A}, {B, C}`.
pub fn show_blocks<'a, I>(blocks: I) -> String
where
    I: IntoIterator<Item = &'a BTreeSet<StateId>>,
{
    blocks.into_iter().map(show_block).join(", ")
}

/// Collects [`PartitionStep`]s.
#[derive(Debug, Clone, Default)]
pub struct StepRecorder {
    steps: Vec<PartitionStep>,
    alphabet: Vec<Symbol>,
}

impl StepRecorder {
    /// Creates a recorder that notes `alphabet` as the alphabet of the initial step.
    pub fn new(alphabet: &[Symbol]) -> Self {
        Self {
            steps: vec![],
            alphabet: alphabet.to_vec(),
        }
    }

    /// Gives back the recorded steps.
    pub fn into_steps(self) -> Vec<PartitionStep> {
        self.steps
    }
}

impl RefinementObserver for StepRecorder {
    fn initial(&mut self, partition: &Partition<StateId>) {
        let description = if partition.is_empty() {
            "no reachable states, the initial partition is empty".to_string()
        } else {
            format!(
                "initial partition into final and non-final states: {}",
                show_blocks(partition.iter())
            )
        };
        self.steps.push(PartitionStep {
            step: self.steps.len(),
            description,
            before: vec![],
            after: partition.to_vec(),
            examined: None,
            alphabet: self.alphabet.clone(),
            checks: vec![],
        });
    }

    fn examined(&mut self, examination: Examination<'_>) {
        let description = match examination.splitting_check() {
            Some(check) => format!(
                "{} is split on {} into {}",
                show_block(examination.block),
                check.symbol,
                show_blocks(check.groups.iter())
            ),
            None => format!(
                "{} is not split by any of the symbols {}",
                show_block(examination.block),
                examination.alphabet.iter().join(", ")
            ),
        };
        self.steps.push(PartitionStep {
            step: self.steps.len(),
            description,
            before: examination.before.to_vec(),
            after: examination.after.to_vec(),
            examined: Some(examination.block.clone()),
            alphabet: examination.alphabet.to_vec(),
            checks: examination.checks.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(ids: &[&str]) -> BTreeSet<StateId> {
        ids.iter().map(|q| StateId::from(*q)).collect()
    }

    #[test]
    fn records_initial_and_examined_steps() {
        let alphabet = vec![Symbol::from('0'), Symbol::from('1')];
        let mut recorder = StepRecorder::new(&alphabet);
        let before = Partition::from(vec![block(&["C"]), block(&["A", "B"])]);
        recorder.initial(&before);

        let after = Partition::from(vec![block(&["C"]), block(&["A"]), block(&["B"])]);
        let checks = vec![SymbolCheck {
            symbol: Symbol::from('0'),
            split: true,
            groups: vec![block(&["A"]), block(&["B"])],
        }];
        recorder.examined(Examination {
            before: &before,
            after: &after,
            block: &block(&["A", "B"]),
            alphabet: &alphabet,
            checks: &checks,
        });

        let steps = recorder.into_steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].step, 0);
        assert!(steps[0].before.is_empty());
        assert_eq!(steps[0].examined, None);
        assert!(!steps[0].is_split());
        assert_eq!(steps[1].step, 1);
        assert!(steps[1].is_split());
        assert_eq!(steps[1].description, "{A, B} is split on 0 into {A}, {B}");
        assert_eq!(steps[1].after.len(), 3);
    }
}
