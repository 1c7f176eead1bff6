//! Deterministic names for states that are synthesized by the algorithms in this crate.
//!
//! Names follow the spreadsheet column scheme: `0 -> A`, `25 -> Z`, `26 -> AA`, `27 -> AB` and
//! so on, most significant letter first. A name is always derived from a position (the order in
//! which a state was created, the index of a partition block), never from a counter that lives
//! outside of a single call.

use crate::automaton::StateId;

/// Returns the letter sequence for `index`.
pub fn letters(index: usize) -> String {
    let mut out = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    out.into_iter().rev().collect()
}

/// The synthetic state identifier at position `index`.
pub fn synthetic_name(index: usize) -> StateId {
    StateId::new(letters(index))
}

/// Finds the first synthetic name at or after position `start` for which `taken` returns `false`.
pub fn fresh_name<F>(start: usize, taken: F) -> StateId
where
    F: Fn(&StateId) -> bool,
{
    let mut index = start;
    loop {
        let name = synthetic_name(index);
        if !taken(&name) {
            return name;
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreadsheet_columns() {
        assert_eq!(letters(0), "A");
        assert_eq!(letters(1), "B");
        assert_eq!(letters(25), "Z");
        assert_eq!(letters(26), "AA");
        assert_eq!(letters(27), "AB");
        assert_eq!(letters(51), "AZ");
        assert_eq!(letters(52), "BA");
        assert_eq!(letters(701), "ZZ");
        assert_eq!(letters(702), "AAA");
    }

    #[test]
    fn fresh_name_skips_taken() {
        let taken = ["C", "D"].map(StateId::from);
        assert_eq!(fresh_name(2, |n| taken.contains(n)), StateId::from("E"));
        assert_eq!(fresh_name(0, |n| taken.contains(n)), StateId::from("A"));
    }
}
