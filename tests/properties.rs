#![cfg(feature = "random")]

use std::collections::BTreeSet;

use automata_workbench::{
    minimization::partition_refinement::reachable_part,
    prelude::*,
    random::{generate_random_dfa, generate_random_nfa, generate_random_word, letters},
};

const ROUNDS: usize = 60;

fn words(rng: &mut fastrand::Rng, symbols: usize) -> Vec<Vec<Symbol>> {
    (0..25)
        .map(|_| generate_random_word(rng, &letters(symbols), 0, 8))
        .collect()
}

#[test_log::test]
fn classification_follows_transitions() {
    let mut rng = fastrand::Rng::with_seed(11);
    for _ in 0..ROUNDS {
        let size = rng.usize(1..6);
        let dfa = generate_random_dfa(&mut rng, size, 2, 0.7);
        assert_eq!(classify(dfa.transitions()), AutomatonKind::Dfa);

        let with_epsilon = dfa.clone().add_transition(Transition::new("A", "E", "A"));
        assert_eq!(classify(with_epsilon.transitions()), AutomatonKind::Nfa);
        assert!(analyze(&with_epsilon).has_epsilon);
    }
}

#[test_log::test]
fn completion_is_idempotent() {
    let mut rng = fastrand::Rng::with_seed(12);
    for _ in 0..ROUNDS {
        let size = rng.usize(1..6);
        let dfa = generate_random_dfa(&mut rng, size, 3, 0.5);
        let once = complete(&dfa);
        assert!(is_complete_dfa(&once));
        assert_eq!(complete(&once), once);
        assert!(once.size() <= dfa.size() + 1);
    }
}

#[test_log::test]
fn subset_construction_is_total_and_preserves_language() {
    let mut rng = fastrand::Rng::with_seed(13);
    for _ in 0..ROUNDS {
        let size = rng.usize(1..5);
        let nfa = generate_random_nfa(&mut rng, size, 2, 0.25, 0.15);
        let dfa = to_dfa(&nfa);
        assert_eq!(classify(dfa.transitions()), AutomatonKind::Dfa);
        if nfa.kind() == AutomatonKind::Nfa {
            assert!(is_complete_dfa(&dfa));
        }
        for word in words(&mut rng, 2) {
            assert_eq!(
                accept(&nfa, &word).accepted,
                accept(&dfa, &word).accepted,
                "disagreement on {word:?} for\n{nfa}"
            );
        }
    }
}

#[test_log::test]
fn minimization_preserves_language() {
    let mut rng = fastrand::Rng::with_seed(14);
    for _ in 0..ROUNDS {
        let size = rng.usize(1..7);
        let dfa = generate_random_dfa(&mut rng, size, 2, 1.0);
        let result = minimize(&dfa);
        for word in words(&mut rng, 2) {
            assert_eq!(
                dfa.accepts(&word),
                result.minimized().accepts(&word),
                "disagreement on {word:?} for\n{dfa}"
            );
        }
    }
}

#[test_log::test]
fn minimization_is_minimal_and_stable() {
    let mut rng = fastrand::Rng::with_seed(15);
    for _ in 0..ROUNDS {
        let size = rng.usize(1..7);
        let dfa = generate_random_dfa(&mut rng, size, 2, 1.0);
        let result = minimize(&dfa);
        assert!(result.minimized().size() <= reachable_part(&dfa).size());

        let again = minimize(result.minimized());
        assert_eq!(again.minimized().size(), result.minimized().size());
        assert!(again.equivalent_states().iter().all(|block| block.len() == 1));
    }
}

#[test_log::test]
fn equivalence_classes_partition_the_reachable_states() {
    let mut rng = fastrand::Rng::with_seed(16);
    for _ in 0..ROUNDS {
        let size = rng.usize(1..7);
        let dfa = generate_random_dfa(&mut rng, size, 2, 0.8);
        let result = minimize(&dfa);

        let mut union = BTreeSet::new();
        for block in result.equivalent_states().iter() {
            for q in block {
                assert!(union.insert(q.clone()), "{q} appears in two blocks");
            }
        }
        let prepared: BTreeSet<_> = result.prepared().states().iter().cloned().collect();
        assert_eq!(union, prepared);

        let names: BTreeSet<_> = result.minimized().states().iter().collect();
        assert_eq!(names.len(), result.minimized().size());
    }
}

#[test]
fn already_minimal_dfa() {
    let dfa: Automaton = "
        initial: A
        final: C
        A -0-> B
        A -1-> A
        B -0-> C
        B -1-> A
        C -0-> C
        C -1-> A
    "
    .parse()
    .unwrap();
    let result = minimize(&dfa);
    assert_eq!(result.minimized().size(), 3);
    assert!(result.steps()[0].description.starts_with("initial partition"));
    assert!(result.steps().iter().skip(1).all(|step| step.is_split()));
}

#[test]
fn epsilon_nfa_to_dfa() {
    let nfa: Automaton = "initial: A\nfinal: C\nA --> B\nB -a-> C".parse().unwrap();
    let dfa = to_dfa(&nfa);
    assert_eq!(
        dfa.states(),
        &[StateId::from("A"), StateId::from("B"), StateId::from("C")]
    );
    assert_eq!(dfa.finals(), &[StateId::from("B")]);
    assert!(dfa.transitions().contains(&Transition::new("A", 'a', "B")));
    assert!(dfa.transitions().contains(&Transition::new("C", 'a', "C")));
}

#[test]
fn nondeterministic_choice_is_reported() {
    let nfa: Automaton = "A -0-> B\nA -0-> C".parse().unwrap();
    assert_eq!(classify(nfa.transitions()), AutomatonKind::Nfa);
    assert_eq!(
        analyze(&nfa).nondeterministic_transitions,
        vec![NondeterministicChoice {
            from: StateId::from("A"),
            symbol: Symbol::from('0'),
            destinations: vec![StateId::from("B"), StateId::from("C")],
        }]
    );
}

#[cfg(feature = "serde")]
#[test]
fn stored_automata_are_reclassified() {
    let nfa: Automaton = "initial: A\nA -a-> B\nA -a-> C".parse().unwrap();
    let stored = serde_json::to_string(&nfa).unwrap();
    let restored: Automaton = serde_json::from_str(&stored).unwrap();
    assert_eq!(restored, nfa);

    let tampered = stored.replace("\"Nfa\"", "\"Dfa\"");
    let restored: Automaton = serde_json::from_str(&tampered).unwrap();
    assert_eq!(restored.kind(), AutomatonKind::Nfa);

    let dangling = r#"{"states":["A"],"transitions":[{"from":"A","to":"B","symbol":"a"}],"initial":"A","finals":[]}"#;
    let restored: Automaton = serde_json::from_str(dangling).unwrap();
    assert!(restored.transitions().is_empty());
    assert!(is_complete_dfa(&complete(&restored)));
}
