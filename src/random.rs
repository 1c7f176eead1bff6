//! Generation of random automata and words. Mostly useful for testing the algorithms of this
//! crate against each other. All functions take an explicit [`fastrand::Rng`], so that a fixed
//! seed reproduces the same automata.

use crate::{
    automaton::{Automaton, StateId, Transition},
    naming::synthetic_name,
    symbol::Symbol,
};

/// The alphabet `a, b, c, ...` with `symbols` letters. The letter `e` is skipped, as it is an
/// epsilon marker.
pub fn letters(symbols: usize) -> Vec<Symbol> {
    ('a'..='z')
        .filter(|c| *c != 'e')
        .take(symbols)
        .map(Symbol::from)
        .collect()
}

fn states(size: usize) -> Vec<StateId> {
    (0..size).map(synthetic_name).collect()
}

fn random_finals(rng: &mut fastrand::Rng, states: &[StateId]) -> Vec<StateId> {
    states.iter().filter(|_| rng.bool()).cloned().collect()
}

/// Generates a DFA with `size` states over `symbols` letters. For each state and symbol a
/// transition exists with probability `density` and leads to a uniformly drawn target, so the
/// result is complete for `density >= 1.0`. Each state is final with probability one half and
/// the first state is initial.
pub fn generate_random_dfa(
    rng: &mut fastrand::Rng,
    size: usize,
    symbols: usize,
    density: f64,
) -> Automaton {
    let states = states(size.max(1));
    let mut transitions = vec![];
    for q in &states {
        for a in letters(symbols) {
            if rng.f64() < density {
                let target = states[rng.usize(..states.len())].clone();
                transitions.push(Transition::new(q.clone(), a, target));
            }
        }
    }
    let finals = random_finals(rng, &states);
    Automaton::new(states.clone(), transitions, Some(states[0].clone()), finals)
}

/// Generates an NFA with `size` states over `symbols` letters. Every possible transition
/// `(p, a, q)` is present with probability `density`, every epsilon transition `(p, q)` with
/// probability `epsilon`. The first state is initial.
pub fn generate_random_nfa(
    rng: &mut fastrand::Rng,
    size: usize,
    symbols: usize,
    density: f64,
    epsilon: f64,
) -> Automaton {
    let states = states(size.max(1));
    let alphabet = letters(symbols);
    let mut transitions = vec![];
    for p in &states {
        for q in &states {
            for a in &alphabet {
                if rng.f64() < density {
                    transitions.push(Transition::new(p.clone(), a.clone(), q.clone()));
                }
            }
            if p != q && rng.f64() < epsilon {
                transitions.push(Transition::new(p.clone(), Symbol::epsilon(), q.clone()));
            }
        }
    }
    let finals = random_finals(rng, &states);
    Automaton::new(states.clone(), transitions, Some(states[0].clone()), finals)
}

/// Generates a word over `alphabet` whose length is drawn uniformly from `min_len..=max_len`. If
/// `max_len` is below `min_len`, the word has length `min_len`.
pub fn generate_random_word(
    rng: &mut fastrand::Rng,
    alphabet: &[Symbol],
    min_len: usize,
    max_len: usize,
) -> Vec<Symbol> {
    if alphabet.is_empty() {
        return vec![];
    }
    let length = rng.usize(min_len..=max_len.max(min_len));
    (0..length)
        .map(|_| alphabet[rng.usize(..alphabet.len())].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn generated_automata_have_the_requested_shape() {
        let mut rng = fastrand::Rng::with_seed(7);
        let dfa = generate_random_dfa(&mut rng, 5, 2, 1.0);
        assert!(dfa.is_dfa());
        assert!(is_complete_dfa(&dfa));
        assert_eq!(dfa.size(), 5);
        assert_eq!(dfa.transitions().len(), 10);

        let nfa = generate_random_nfa(&mut rng, 4, 2, 0.3, 0.2);
        assert_eq!(nfa.size(), 4);
        assert_eq!(nfa.initial(), Some(&StateId::from("A")));

        let word = generate_random_word(&mut rng, &letters(3), 2, 4);
        assert!((2..=4).contains(&word.len()));
        assert!(word.iter().all(|a| !a.is_epsilon()));
    }

    #[test]
    fn word_length_bounds_are_clamped() {
        let mut rng = fastrand::Rng::with_seed(3);
        let word = generate_random_word(&mut rng, &letters(2), 5, 2);
        assert_eq!(word.len(), 5);
        assert!(generate_random_word(&mut rng, &[], 1, 3).is_empty());
    }

    #[test]
    fn letters_skip_epsilon_marker() {
        let names = letters(5)
            .into_iter()
            .map(|s| s.as_str().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b", "c", "d", "f"]);
    }
}
