use std::{borrow::Borrow, fmt::Display};

/// The canonical epsilon marker. Transitions created by this crate always use this value when
/// they need to express an epsilon transition.
pub const EPSILON: &str = "ε";

/// All spellings that are treated as epsilon. Besides the canonical [`EPSILON`], the letters
/// `e`/`E` and the empty string are accepted, which means that `e` can not be used as an
/// ordinary input symbol.
pub const EPSILON_MARKERS: [&str; 4] = [EPSILON, "e", "E", ""];

/// Returns `true` if and only if `symbol` is one of the [`EPSILON_MARKERS`]. This is the only
/// place where epsilon is recognized, every component goes through it.
pub fn is_epsilon(symbol: &str) -> bool {
    EPSILON_MARKERS.contains(&symbol)
}

/// A symbol labelling a transition. Usually a single character, or one of the epsilon markers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from anything that can be turned into a string.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// The canonical epsilon symbol.
    pub fn epsilon() -> Self {
        Self(EPSILON.to_string())
    }

    /// Whether `self` is an epsilon marker, see [`is_epsilon`].
    pub fn is_epsilon(&self) -> bool {
        is_epsilon(&self.0)
    }

    /// Gives the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_epsilon() {
            write!(f, "{EPSILON}")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Symbol> for Symbol {
    fn from(value: &Symbol) -> Self {
        value.clone()
    }
}
