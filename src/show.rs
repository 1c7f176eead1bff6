//! Textual tables for automata and minimization results, built with `tabled`.

use itertools::Itertools;

use crate::{
    automaton::{Automaton, StateId},
    classify::alphabet,
    minimization::{explain::show_blocks, MinimizationResult},
    symbol::Symbol,
};

/// Decorates a state the way all tables of this crate do: `->` marks the initial state and `*`
/// marks final states.
pub fn decorate_state(automaton: &Automaton, state: &StateId) -> String {
    let mut out = String::new();
    if automaton.initial() == Some(state) {
        out.push_str("->");
    }
    if automaton.is_final(state.as_str()) {
        out.push('*');
    }
    out.push_str(state.as_str());
    out
}

impl Automaton {
    /// Returns a string representation of the transition table. There is one row per state and
    /// one column per alphabet symbol, plus a column for epsilon transitions if there are any.
    /// Cells list the targets, `-` marks a missing transition.
    pub fn transition_table(&self) -> String {
        let mut columns = alphabet(self.transitions());
        if self.transitions().iter().any(|t| t.is_epsilon()) {
            columns.push(Symbol::epsilon());
        }

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(columns.iter().map(|s| s.to_string())),
        );
        for q in self.states() {
            let mut row = vec![decorate_state(self, q)];
            for symbol in &columns {
                let targets = self.successors(q.as_str(), symbol).join(", ");
                row.push(if targets.is_empty() {
                    "-".to_string()
                } else {
                    targets
                });
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl MinimizationResult {
    /// Renders the refinement steps, one row per step.
    pub fn steps_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["Step", "Examined", "Checked", "Description", "Partition"]);
        for step in self.steps() {
            builder.push_record([
                step.step.to_string(),
                step.examined
                    .as_ref()
                    .map(|block| show_blocks([block]))
                    .unwrap_or_else(|| "-".to_string()),
                step.checks
                    .iter()
                    .map(|check| {
                        format!("{}{}", check.symbol, if check.split { "!" } else { "" })
                    })
                    .join(" "),
                step.description.clone(),
                show_blocks(step.after.iter()),
            ]);
        }
        builder
            .build()
            .with(tabled::settings::Style::ascii())
            .to_string()
    }

    /// Renders the combined transitions: for each minimized state and symbol the target and the
    /// original transitions that were merged.
    pub fn combined_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["From", "Symbol", "To", "Merged"]);
        for (from, by_symbol) in self.combined_transitions() {
            for (symbol, combined) in by_symbol {
                builder.push_record([
                    decorate_state(self.minimized(), from),
                    symbol.to_string(),
                    combined.target.to_string(),
                    combined.originals.iter().join("; "),
                ]);
            }
        }
        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    /// Renders which original states make up each minimized state.
    pub fn classes_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["State", "Merges"]);
        for (q, block) in self.minimized_to_original() {
            builder.push_record([
                decorate_state(self.minimized(), q),
                show_blocks([block]),
            ]);
        }
        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn transition_table_marks_states() {
        let nfa = Automaton::builder()
            .with_transitions([("A", "a", "B"), ("A", "a", "C"), ("B", "e", "C")])
            .with_initial("A")
            .with_finals(["C"])
            .build();
        let table = nfa.transition_table();
        assert!(table.contains("->A"));
        assert!(table.contains("*C"));
        assert!(table.contains("B, C"));
        assert!(table.contains("ε"));
    }

    #[test]
    fn minimization_tables() {
        let dfa = Automaton::builder()
            .with_transitions([("A", 'a', "B"), ("B", 'a', "B")])
            .with_initial("A")
            .with_finals(["B"])
            .build();
        let result = minimize(&dfa);
        let steps = result.steps_table();
        assert!(steps.contains("initial partition"));
        assert!(result.combined_table().contains("B -a-> B"));
        assert!(result.classes_table().contains("{B}"));
    }
}
