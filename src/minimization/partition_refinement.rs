use std::collections::{BTreeSet, VecDeque};

use itertools::Itertools;
use tracing::{debug, trace};

use super::explain::{Examination, RefinementObserver, SymbolCheck};
use crate::{
    automaton::{Automaton, StateId},
    math::{Map, OrderedMap, Partition, Set},
    symbol::Symbol,
};

/// Restricts `dfa` to the states reachable from its initial state. States keep their relative
/// order, and transitions and final states of unreachable states are dropped. Without an initial
/// state nothing is reachable.
pub fn reachable_part(dfa: &Automaton) -> Automaton {
    let Some(initial) = dfa.initial() else {
        return Automaton::default();
    };
    let mut seen: Set<&StateId> = Set::from_iter([initial]);
    let mut queue = VecDeque::from([initial]);
    while let Some(q) = queue.pop_front() {
        for t in dfa.transitions_from(q.as_str()) {
            if seen.insert(&t.to) {
                queue.push_back(&t.to);
            }
        }
    }
    trace!("{} of {} states are reachable", seen.len(), dfa.size());

    Automaton::new(
        dfa.states().iter().filter(|q| seen.contains(q)).cloned(),
        dfa.transitions()
            .iter()
            .filter(|t| seen.contains(&t.from))
            .cloned(),
        Some(initial.clone()),
        dfa.finals().iter().filter(|q| seen.contains(q)).cloned(),
    )
}

/// Splits the states of `dfa` into final and non-final ones, in this order. Empty blocks are
/// left out.
pub fn initial_partition(dfa: &Automaton) -> Partition<StateId> {
    let (finals, rest): (Vec<_>, Vec<_>) = dfa
        .states()
        .iter()
        .cloned()
        .partition(|q| dfa.is_final(q.as_str()));
    Partition::new([finals, rest])
}

/// Groups the members of `block` by the index of the block that their transition on `symbol`
/// leads into. Members without such a transition form their own group. Groups are ordered by
/// their first member.
fn group_by_target(
    block: &BTreeSet<StateId>,
    symbol: &Symbol,
    delta: &Map<(&StateId, &Symbol), &StateId>,
    lookup: &Map<StateId, usize>,
) -> Vec<BTreeSet<StateId>> {
    let mut groups: OrderedMap<Option<usize>, BTreeSet<StateId>> = OrderedMap::default();
    for q in block {
        let target_block = delta
            .get(&(q, symbol))
            .and_then(|p| lookup.get(*p))
            .copied();
        groups.entry(target_block).or_default().insert(q.clone());
    }
    groups.into_values().collect()
}

/// Computes the coarsest partition of the states of `dfa` that separates final from non-final
/// states and is stable under every symbol of `alphabet`.
///
/// Starting from [`initial_partition`], the blocks are scanned front to back. A block with more
/// than one member is checked against each symbol in the order of `alphabet`; the first symbol
/// on which its members lead into different blocks splits it, the pieces take its place and the
/// scan starts over. Once a scan goes through without a split, the partition is returned.
///
/// `dfa` is expected to be complete and deterministic. Each examined block is reported to
/// `observer`.
pub fn refine<O: RefinementObserver>(
    dfa: &Automaton,
    alphabet: &[Symbol],
    observer: &mut O,
) -> Partition<StateId> {
    let delta: Map<(&StateId, &Symbol), &StateId> = dfa
        .transitions()
        .iter()
        .map(|t| ((&t.from, &t.symbol), &t.to))
        .collect();

    let mut partition = initial_partition(dfa);
    observer.initial(&partition);

    let mut rounds = 0;
    'rescan: loop {
        rounds += 1;
        let lookup = partition.index();
        for position in 0..partition.size() {
            let block = partition[position].clone();
            if block.len() < 2 {
                continue;
            }

            let mut checks = vec![];
            for symbol in alphabet {
                let groups = group_by_target(&block, symbol, &delta, &lookup);
                let split = groups.len() > 1;
                checks.push(SymbolCheck {
                    symbol: symbol.clone(),
                    split,
                    groups,
                });
                if split {
                    break;
                }
            }

            match checks.last().filter(|check| check.split) {
                Some(check) => {
                    trace!(
                        "splitting {{{}}} on {} into {} blocks",
                        block.iter().join(", "),
                        check.symbol,
                        check.groups.len()
                    );
                    let before = partition.clone();
                    partition.split(position, check.groups.clone());
                    observer.examined(Examination {
                        before: &before,
                        after: &partition,
                        block: &block,
                        alphabet,
                        checks: &checks,
                    });
                    continue 'rescan;
                }
                None => observer.examined(Examination {
                    before: &partition,
                    after: &partition,
                    block: &block,
                    alphabet,
                    checks: &checks,
                }),
            }
        }
        break;
    }

    debug!(
        "refinement stabilized after {rounds} scans with {} blocks",
        partition.size()
    );
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::alphabet;

    fn blocks(partition: &Partition<StateId>) -> Vec<Vec<&str>> {
        partition
            .iter()
            .map(|b| b.iter().map(|q| q.as_str()).collect())
            .collect()
    }

    #[test_log::test]
    fn reachability() {
        let dfa = Automaton::builder()
            .with_transitions([("A", 'a', "B"), ("B", 'a', "A"), ("C", 'a', "A"), ("C", 'b', "D")])
            .with_initial("A")
            .with_finals(["B", "D"])
            .build();
        let reachable = reachable_part(&dfa);
        assert_eq!(reachable.size(), 2);
        assert_eq!(reachable.transitions().len(), 2);
        assert_eq!(reachable.finals(), &[StateId::from("B")]);

        let nowhere = dfa.set_initial(None);
        assert_eq!(reachable_part(&nowhere).size(), 0);
    }

    #[test_log::test]
    fn merges_equivalent_states() {
        // B and C behave the same, as do D and E
        let dfa = Automaton::builder()
            .with_transitions([
                ("A", 'a', "B"),
                ("A", 'b', "C"),
                ("B", 'a', "D"),
                ("B", 'b', "E"),
                ("C", 'a', "E"),
                ("C", 'b', "D"),
                ("D", 'a', "D"),
                ("D", 'b', "D"),
                ("E", 'a', "E"),
                ("E", 'b', "E"),
            ])
            .with_initial("A")
            .with_finals(["D", "E"])
            .build();
        let partition = refine(&dfa, &alphabet(dfa.transitions()), &mut ());
        assert_eq!(
            blocks(&partition),
            vec![vec!["D", "E"], vec!["A"], vec!["B", "C"]]
        );
    }

    #[test_log::test]
    fn splits_on_later_symbol() {
        // the symbol a does not distinguish anything, b does
        let dfa = Automaton::builder()
            .with_transitions([
                ("A", 'a', "A"),
                ("A", 'b', "B"),
                ("B", 'a', "B"),
                ("B", 'b', "C"),
                ("C", 'a', "C"),
                ("C", 'b', "C"),
            ])
            .with_initial("A")
            .with_finals(["C"])
            .build();
        let partition = refine(&dfa, &alphabet(dfa.transitions()), &mut ());
        assert_eq!(blocks(&partition), vec![vec!["C"], vec!["A"], vec!["B"]]);
    }

    #[test]
    fn all_final_or_all_rejecting() {
        let dfa = Automaton::builder()
            .with_transitions([("A", 'a', "B"), ("B", 'a', "A")])
            .with_initial("A")
            .build();
        let partition = refine(&dfa, &alphabet(dfa.transitions()), &mut ());
        assert_eq!(blocks(&partition), vec![vec!["A", "B"]]);

        let dfa = dfa.set_finals(["A", "B"]);
        let partition = refine(&dfa, &alphabet(dfa.transitions()), &mut ());
        assert_eq!(blocks(&partition), vec![vec!["A", "B"]]);
    }

    #[test]
    fn missing_transitions_form_their_own_group() {
        let dfa = Automaton::builder()
            .with_transitions([("A", 'a', "A")])
            .with_states(["B"])
            .with_initial("A")
            .build();
        let partition = refine(&dfa, &alphabet(dfa.transitions()), &mut ());
        assert_eq!(partition.size(), 2);
    }
}
