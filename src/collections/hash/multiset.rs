//! `HashMultiset` — a counted multiset on top of [`DenseIndexMap`].
//!
//! Each distinct element is stored once together with its multiplicity, so all
//! occurrences of an element are contiguous in iteration order. Removing one
//! occurrence is O(1); the entry disappears when its multiplicity reaches zero.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use std::collections::hash_map::RandomState;

use super::index_map::DenseIndexMap;

/// Unordered collection permitting repeated elements.
pub struct HashMultiset<K, S = RandomState> {
    counts: DenseIndexMap<K, NonZeroUsize, S>,
    /// Sum of all multiplicities.
    len: usize,
}

impl<K> HashMultiset<K, RandomState> {
    /// Creates an empty multiset.
    #[inline]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, S> HashMultiset<K, S> {
    /// Creates an empty multiset using `hash_builder`.
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            counts: DenseIndexMap::with_hasher(hash_builder),
            len: 0,
        }
    }

    /// Total number of elements, counting repeats.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of distinct elements.
    #[inline(always)]
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if the multiset holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterator over every element occurrence. Equal elements are adjacent.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.counts
            .iter()
            .flat_map(|(k, n)| core::iter::repeat(k).take(n.get()))
    }

    /// Iterator over `(element, multiplicity)` pairs.
    pub fn iter_counts(&self) -> impl Iterator<Item = (&K, usize)> + '_ {
        self.counts.iter().map(|(k, n)| (k, n.get()))
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.len = 0;
    }

    /// Distinct elements in storage order.
    #[inline]
    pub(crate) fn elements(&self) -> &[K] {
        self.counts.keys()
    }

    /// Multiplicities parallel to [`elements`](Self::elements).
    #[inline]
    pub(crate) fn multiplicities(&self) -> &[NonZeroUsize] {
        self.counts.values()
    }
}

impl<K, S> HashMultiset<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Returns `true` if at least one occurrence of `value` is present.
    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.contains_key(value)
    }

    /// Multiplicity of `value` (0 if absent).
    #[inline]
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(value).map_or(0, |n| n.get())
    }

    /// Storage position of `value`'s run of occurrences.
    #[inline]
    pub(crate) fn position<Q>(&self, value: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get_index_of(value)
    }

    /// Removes one occurrence of `value`. Returns `false` if it was absent.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(n) = self.counts.get_mut(value) else {
            return false;
        };
        match NonZeroUsize::new(n.get() - 1) {
            Some(rest) => *n = rest,
            None => {
                self.counts.swap_remove(value);
            }
        }
        self.len -= 1;
        true
    }

    /// Removes every occurrence of `value`, returning how many were removed.
    pub fn remove_all<Q>(&mut self, value: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.counts.swap_remove(value).map_or(0, NonZeroUsize::get);
        self.len -= removed;
        removed
    }

    /// Shrinks storage as close to the distinct length as possible.
    pub fn shrink_to_fit(&mut self) {
        self.counts.shrink_to_fit();
    }
}

impl<K, S> HashMultiset<K, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Adds one occurrence of `value`, returning its new multiplicity.
    pub fn insert(&mut self, value: K) -> usize {
        self.len += 1;
        if let Some(n) = self.counts.get_mut(&value) {
            *n = n.saturating_add(1);
            return n.get();
        }
        self.counts.insert(value, NonZeroUsize::MIN);
        1
    }
}

impl<K> Default for HashMultiset<K, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, S: Clone> Clone for HashMultiset<K, S> {
    fn clone(&self) -> Self {
        Self {
            counts: self.counts.clone(),
            len: self.len,
        }
    }
}

impl<K, S> PartialEq for HashMultiset<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.distinct_len() == other.distinct_len()
            && self.iter_counts().all(|(k, n)| other.count(k) == n)
    }
}

impl<K, S> Eq for HashMultiset<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
}

impl<K: fmt::Debug, S> fmt::Debug for HashMultiset<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicities_accumulate() {
        let mut set = HashMultiset::new();
        assert_eq!(set.insert('a'), 1);
        assert_eq!(set.insert('b'), 1);
        assert_eq!(set.insert('a'), 2);

        assert_eq!(set.len(), 3);
        assert_eq!(set.distinct_len(), 2);
        assert_eq!(set.count(&'a'), 2);
        assert_eq!(set.count(&'z'), 0);
    }

    #[test]
    fn remove_takes_one_occurrence() {
        let mut set = HashMultiset::new();
        set.insert(7);
        set.insert(7);

        assert!(set.remove(&7));
        assert!(set.contains(&7));
        assert_eq!(set.len(), 1);

        assert!(set.remove(&7));
        assert!(!set.contains(&7));
        assert!(set.is_empty());

        assert!(!set.remove(&7));
    }

    #[test]
    fn remove_all_drops_run() {
        let mut set = HashMultiset::new();
        for x in [1, 2, 2, 2, 3] {
            set.insert(x);
        }
        assert_eq!(set.remove_all(&2), 3);
        assert_eq!(set.remove_all(&2), 0);
        assert_eq!(set.len(), 2);
        assert_eq!(set.distinct_len(), 2);
    }

    #[test]
    fn iter_groups_equal_elements() {
        let mut set = HashMultiset::new();
        for x in [1, 2, 1, 3, 1] {
            set.insert(x);
        }
        let items: Vec<_> = set.iter().copied().collect();
        assert_eq!(items, vec![1, 1, 1, 2, 3]);
    }

    #[test]
    fn equality_ignores_order() {
        let mut a = HashMultiset::new();
        let mut b = HashMultiset::new();
        for x in [1, 2, 2] {
            a.insert(x);
        }
        for x in [2, 1, 2] {
            b.insert(x);
        }
        assert_eq!(a, b);
        b.remove(&2);
        assert_ne!(a, b);
    }
}
