//! A small line based text format for automata.
//!
//! ```text
//! # comments start with a hash
//! states: A, B, C        (optional, lists states that have no transitions)
//! initial: A
//! final: C
//! A -0-> B
//! A -ε-> C               (A -> C and A --> C are epsilon transitions as well)
//! ```
//!
//! Directives may appear in any order. State names must not contain `-`, `,` or whitespace.

use std::str::FromStr;

use thiserror::Error;
use tracing::trace;

use crate::{
    automaton::{Automaton, AutomatonBuilder, StateId, Transition},
    symbol::Symbol,
};

/// Errors that can occur while reading an automaton from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line of the form `name: ...` with an unknown name.
    #[error("line {line}: unknown directive `{name}`")]
    UnknownDirective {
        /// One-based line number.
        line: usize,
        /// The directive that was found.
        name: String,
    },
    /// A line that is neither a directive nor a transition.
    #[error("line {line}: expected a transition of the form `from -symbol-> to`, found `{content}`")]
    MalformedTransition {
        /// One-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },
    /// A state name that is empty or contains reserved characters.
    #[error("line {line}: invalid state name `{name}`")]
    InvalidStateName {
        /// One-based line number.
        line: usize,
        /// The offending name.
        name: String,
    },
    /// A symbol that is neither a single character nor an epsilon marker.
    #[error("line {line}: symbol `{symbol}` must be a single character or an epsilon marker")]
    InvalidSymbol {
        /// One-based line number.
        line: usize,
        /// The offending symbol.
        symbol: String,
    },
    /// The initial state was given more than once.
    #[error("line {line}: initial state given a second time")]
    DuplicateInitial {
        /// One-based line number.
        line: usize,
    },
}

fn state_name(line: usize, name: &str) -> Result<StateId, ParseError> {
    let name = name.trim();
    if name.is_empty() || name.contains(['-', ',', '#']) || name.contains(char::is_whitespace) {
        return Err(ParseError::InvalidStateName {
            line,
            name: name.to_string(),
        });
    }
    Ok(StateId::from(name))
}

fn state_list(line: usize, list: &str) -> Result<Vec<StateId>, ParseError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| state_name(line, s))
        .collect()
}

fn transition(line: usize, content: &str) -> Result<Transition, ParseError> {
    let malformed = || ParseError::MalformedTransition {
        line,
        content: content.to_string(),
    };
    let arrow = content.find("->").ok_or_else(malformed)?;
    let (left, right) = (&content[..arrow], &content[arrow + 2..]);
    let (from, symbol) = match left.find('-') {
        Some(dash) => (&left[..dash], left[dash + 1..].trim()),
        None => (left, ""),
    };
    if symbol.chars().count() > 1 && !crate::symbol::is_epsilon(symbol) {
        return Err(ParseError::InvalidSymbol {
            line,
            symbol: symbol.to_string(),
        });
    }
    Ok(Transition::new(
        state_name(line, from)?,
        Symbol::from(symbol),
        state_name(line, right)?,
    ))
}

/// Reads an automaton in the format described in the [module documentation](self).
pub fn parse(input: &str) -> Result<Automaton, ParseError> {
    let mut builder = AutomatonBuilder::default();
    let mut initial_seen = false;

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        match content.split_once(':') {
            Some((name, rest)) if !name.contains('-') => match name.trim() {
                "states" => builder = builder.with_states(state_list(line, rest)?),
                "initial" | "start" => {
                    if initial_seen {
                        return Err(ParseError::DuplicateInitial { line });
                    }
                    initial_seen = true;
                    builder = builder.with_initial(state_name(line, rest)?);
                }
                "final" | "finals" | "accepting" => {
                    builder = builder.with_finals(state_list(line, rest)?)
                }
                other => {
                    return Err(ParseError::UnknownDirective {
                        line,
                        name: other.to_string(),
                    })
                }
            },
            _ => builder = builder.with_transitions([transition(line, content)?]),
        }
    }

    let automaton = builder.build();
    trace!(
        "parsed {} with {} states and {} transitions",
        automaton.kind(),
        automaton.size(),
        automaton.transitions().len()
    );
    Ok(automaton)
}

impl FromStr for Automaton {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Writes `automaton` in the format read by [`parse`].
pub fn write(automaton: &Automaton) -> String {
    let mut out = String::new();
    let list = |states: &[StateId]| {
        states
            .iter()
            .map(|q| q.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    out.push_str(&format!("states: {}\n", list(automaton.states())));
    if let Some(initial) = automaton.initial() {
        out.push_str(&format!("initial: {initial}\n"));
    }
    if !automaton.finals().is_empty() {
        out.push_str(&format!("final: {}\n", list(automaton.finals())));
    }
    for t in automaton.transitions() {
        out.push_str(&format!("{t}\n"));
    }
    out
}
