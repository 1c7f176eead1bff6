use std::{collections::BTreeSet, hash::Hash};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
/// Only used where the iteration order is never observed.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
/// Only used where the iteration order is never observed.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// A map that iterates in insertion order.
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V>;

/// A sorted set, used for sets of states whose printed form must be canonical.
pub type OrderedSet<S> = BTreeSet<S>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiHashMap<L, R>;

/// A partition groups elements of type `I` into disjoint, non-empty blocks. The order of the
/// blocks is significant: the index of a block is used to identify it during refinement and to
/// name the state it becomes after minimization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Partition<I: Ord>(Vec<BTreeSet<I>>);

impl<I: Ord> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Ord> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Ord> Default for Partition<I> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<I: Ord + Hash + Clone> Partition<I> {
    /// Returns the size of the partition, i.e. the number of blocks.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a partition from an iterator of iterators, dropping blocks that turn out empty.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .filter(|block| !block.is_empty())
                .collect(),
        )
    }

    /// Returns the index of the block containing `element`, if any.
    pub fn block_of(&self, element: &I) -> Option<usize> {
        self.0.iter().position(|block| block.contains(element))
    }

    /// Builds a lookup table from element to the index of its block.
    pub fn index(&self) -> Map<I, usize> {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(i, block)| block.iter().map(move |q| (q.clone(), i)))
            .collect()
    }

    /// Replaces the block at position `at` with `pieces`, keeping the relative order of all
    /// other blocks.
    pub fn split(&mut self, at: usize, pieces: Vec<BTreeSet<I>>) {
        self.0.splice(at..=at, pieces);
    }

    /// Gives back the blocks.
    pub fn into_blocks(self) -> Vec<BTreeSet<I>> {
        self.0
    }
}

impl<I: Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_order() {
        let mut p = Partition::new([vec![1, 2, 3], vec![4], vec![]]);
        assert_eq!(p.size(), 2);
        p.split(
            0,
            vec![BTreeSet::from([1]), BTreeSet::from([2, 3])],
        );
        assert_eq!(
            p.into_blocks(),
            vec![
                BTreeSet::from([1]),
                BTreeSet::from([2, 3]),
                BTreeSet::from([4])
            ]
        );
    }

    #[test]
    fn block_lookup() {
        let p = Partition::new([vec!['a', 'b'], vec!['c']]);
        assert_eq!(p.block_of(&'b'), Some(0));
        assert_eq!(p.block_of(&'c'), Some(1));
        assert_eq!(p.block_of(&'z'), None);
        assert_eq!(p.index()[&'c'], 1);
    }
}
