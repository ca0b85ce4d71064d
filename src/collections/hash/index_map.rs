//! `DenseIndexMap` — an insertion-ordered hash map with dense key/value storage.
//!
//! Structure:
//! - **Lookup table**: a `HashMap<K, usize, S>` from key to its dense position.
//! - **Dense vectors**: `keys` and `values` hold the entries contiguously.
//!
//! Benefits:
//! - **Positional access**: every entry has a stable dense index until the next removal,
//!   so iteration can start at any key rather than only at the front.
//! - **Fast iteration**: keys and values are walked as plain slices.
//! - **O(1) removal**: `swap_remove` moves the last entry into the hole and patches one slot.
//!
//! Removal reorders entries; iteration order is insertion order only while nothing
//! has been removed.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;
use std::collections::HashMap;

/// Ordered hash map backed by dense vectors.
pub struct DenseIndexMap<K, V, S = RandomState> {
    /// Key -> index into `keys`/`values`.
    slots: HashMap<K, usize, S>,
    /// Dense storage for keys.
    keys: Vec<K>,
    /// Dense storage for values, parallel to `keys`.
    values: Vec<V>,
}

impl<K, V> DenseIndexMap<K, V, RandomState> {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(0, RandomState::new())
    }

    /// Creates an empty map with room for at least `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> DenseIndexMap<K, V, S> {
    /// Creates an empty map using `hash_builder` for key hashing.
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty map with capacity and hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            slots: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Number of entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of entries the dense storage can hold without reallocating.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.keys.capacity()
    }

    /// The map's hasher.
    #[inline]
    pub fn hasher(&self) -> &S {
        self.slots.hasher()
    }

    /// Returns the key-value pair at the given dense index.
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        Some((self.keys.get(index)?, self.values.get(index)?))
    }

    /// Returns the key and a mutable value at the given dense index.
    pub fn get_index_mut(&mut self, index: usize) -> Option<(&K, &mut V)> {
        Some((self.keys.get(index)?, self.values.get_mut(index)?))
    }

    /// Keys in dense order.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Values in dense order, parallel to [`keys`](Self::keys).
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Iterator over key-value pairs in dense order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.keys.iter().zip(self.values.iter())
    }

    /// Iterator over key-value pairs with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> + '_ {
        self.keys.iter().zip(self.values.iter_mut())
    }

    /// Removes every entry, keeping allocated capacity.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.keys.clear();
        self.values.clear();
    }
}

impl<K, V, S> DenseIndexMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Dense index of `key`, if present.
    #[inline]
    pub fn get_index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(key).copied()
    }

    /// Returns `true` if the map contains `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.contains_key(key)
    }

    /// Returns a reference to the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.get_index_of(key)?;
        self.values.get(idx)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.get_index_of(key)?;
        self.values.get_mut(idx)
    }

    /// Removes `key`, returning its value.
    ///
    /// The last entry is moved into the vacated position, so this runs in O(1)
    /// but perturbs iteration order.
    pub fn swap_remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.slots.remove(key)?;
        let last = self.keys.len() - 1;
        if idx != last {
            // The entry at `last` is about to move into `idx`.
            if let Some(slot) = self.slots.get_mut::<K>(&self.keys[last]) {
                *slot = idx;
            }
        }
        self.keys.swap_remove(idx);
        Some(self.values.swap_remove(idx))
    }

    /// Reserves room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
        self.keys.reserve(additional);
        self.values.reserve(additional);
    }

    /// Shrinks all storage as close to the current length as possible.
    pub fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
        self.keys.shrink_to_fit();
        self.values.shrink_to_fit();
    }
}

impl<K, V, S> DenseIndexMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Inserts a key-value pair.
    ///
    /// If the key was absent the entry is appended and `None` is returned.
    /// Otherwise the value is replaced in place and the old value returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.get_index_of(&key) {
            Some(idx) => Some(core::mem::replace(&mut self.values[idx], value)),
            None => {
                self.push_new(key, value);
                None
            }
        }
    }

    /// Returns the dense index of `key`, appending `make()` first if it is absent.
    ///
    /// The second element is `true` when a new entry was created.
    pub fn insert_with<F>(&mut self, key: K, make: F) -> (usize, bool)
    where
        F: FnOnce() -> V,
    {
        match self.get_index_of(&key) {
            Some(idx) => (idx, false),
            None => (self.push_new(key, make()), true),
        }
    }

    fn push_new(&mut self, key: K, value: V) -> usize {
        let idx = self.keys.len();
        self.slots.insert(key.clone(), idx);
        self.keys.push(key);
        self.values.push(value);
        idx
    }
}

impl<K, V> Default for DenseIndexMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for DenseIndexMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            keys: self.keys.clone(),
            values: self.values.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for DenseIndexMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order() {
        let mut map = DenseIndexMap::new();
        assert_eq!(map.insert(3, "c"), None);
        assert_eq!(map.insert(1, "a"), None);
        assert_eq!(map.insert(2, "b"), None);

        assert_eq!(map.keys(), &[3, 1, 2]);
        assert_eq!(map.values(), &["c", "a", "b"]);
        assert_eq!(map.get_index_of(&1), Some(1));
    }

    #[test]
    fn insert_existing_replaces_value() {
        let mut map = DenseIndexMap::new();
        map.insert("k", 1);
        assert_eq!(map.insert("k", 2), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("k"), Some(&2));
    }

    #[test]
    fn swap_remove_patches_moved_entry() {
        let mut map = DenseIndexMap::new();
        for i in 0..5 {
            map.insert(i, i * 10);
        }

        assert_eq!(map.swap_remove(&1), Some(10));
        assert_eq!(map.len(), 4);
        // 4 moved into position 1.
        assert_eq!(map.get_index_of(&4), Some(1));
        assert_eq!(map.get(&4), Some(&40));
        assert_eq!(map.get_index(1), Some((&4, &40)));
        assert!(!map.contains_key(&1));

        // Removing the last entry needs no patching.
        assert_eq!(map.swap_remove(&3), Some(30));
        assert_eq!(map.keys(), &[0, 4, 2]);
        assert_eq!(map.swap_remove(&3), None);
    }

    #[test]
    fn insert_with_reports_creation() {
        let mut map: DenseIndexMap<&str, Vec<u8>> = DenseIndexMap::new();
        assert_eq!(map.insert_with("a", Vec::new), (0, true));
        assert_eq!(map.insert_with("b", Vec::new), (1, true));
        assert_eq!(map.insert_with("a", || vec![9]), (0, false));
        assert_eq!(map.get("a"), Some(&Vec::new()));
    }

    #[test]
    fn clear_resets_everything() {
        let mut map = DenseIndexMap::with_capacity(8);
        map.insert(1, ());
        map.insert(2, ());
        map.clear();
        assert!(map.is_empty());
        assert!(!map.contains_key(&1));
        assert_eq!(map.get_index(0), None);
    }
}
