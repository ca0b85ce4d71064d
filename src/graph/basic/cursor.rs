//! Read-only, forward-only cursors over the graph's vertex and edge sequences.
//!
//! Both cursor types borrow the graph immutably. Any structural mutation needs
//! `&mut DirectedMultigraph`, so the borrow checker rejects a mutation while a
//! cursor is alive; a stale cursor cannot be observed.
//!
//! A cursor is not restartable: once exhausted it stays exhausted. Request a
//! fresh cursor from the graph to traverse again. Both types also implement
//! [`Iterator`], yielding the current key and then advancing.

use core::fmt;
use core::iter::FusedIterator;
use core::num::NonZeroUsize;

use crate::collections::HashMultiset;
use crate::error::{GraphError, Result};

/// Cursor over vertex keys, in the graph's storage order.
pub struct VertexCursor<'a, K> {
    keys: &'a [K],
    pos: usize,
}

impl<'a, K> VertexCursor<'a, K> {
    #[inline]
    pub(crate) fn new(keys: &'a [K], pos: usize) -> Self {
        Self { keys, pos }
    }

    #[inline]
    pub(crate) fn exhausted() -> Self {
        Self { keys: &[], pos: 0 }
    }

    /// Returns `true` when no further vertices remain.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.keys.len()
    }

    /// Moves to the next vertex. No-op on an exhausted cursor.
    #[inline]
    pub fn advance(&mut self) {
        if !self.is_exhausted() {
            self.pos += 1;
        }
    }

    /// The vertex under the cursor, or `None` if exhausted.
    #[inline]
    pub fn get(&self) -> Option<&'a K> {
        self.keys.get(self.pos)
    }

    /// The vertex under the cursor.
    ///
    /// # Panics
    /// Panics if the cursor is exhausted. Use [`get`](Self::get) or
    /// [`try_current`](Self::try_current) when exhaustion is expected.
    #[inline]
    pub fn current(&self) -> &'a K {
        match self.get() {
            Some(key) => key,
            None => panic!("VertexCursor::current called on an exhausted cursor"),
        }
    }

    /// The vertex under the cursor, or [`GraphError::ExhaustedCursor`].
    #[inline]
    pub fn try_current(&self) -> Result<&'a K> {
        self.get().ok_or(GraphError::ExhaustedCursor)
    }
}

impl<K> Clone for VertexCursor<'_, K> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys,
            pos: self.pos,
        }
    }
}

impl<'a, K> Iterator for VertexCursor<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.get()?;
        self.pos += 1;
        Some(key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.keys.len().saturating_sub(self.pos);
        (n, Some(n))
    }
}

impl<K> ExactSizeIterator for VertexCursor<'_, K> {}
impl<K> FusedIterator for VertexCursor<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for VertexCursor<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexCursor")
            .field("current", &self.get())
            .field("remaining", &self.len())
            .finish()
    }
}

/// Cursor over one adjacency multiset (the targets or the sources of a vertex).
///
/// Parallel edges appear as repeated keys; all occurrences of the same key
/// are visited consecutively.
pub struct EdgeCursor<'a, K> {
    elements: &'a [K],
    counts: &'a [NonZeroUsize],
    /// Index of the current distinct element.
    slot: usize,
    /// Occurrence within the current element's run.
    occurrence: usize,
}

impl<'a, K> EdgeCursor<'a, K> {
    /// Cursor positioned at `occurrence` within the run stored at `slot`.
    #[inline]
    pub(crate) fn at<S>(set: &'a HashMultiset<K, S>, slot: usize, occurrence: usize) -> Self {
        Self {
            elements: set.elements(),
            counts: set.multiplicities(),
            slot,
            occurrence,
        }
    }

    /// Cursor positioned at the first occurrence in `set`.
    #[inline]
    pub(crate) fn over<S>(set: &'a HashMultiset<K, S>) -> Self {
        Self::at(set, 0, 0)
    }

    #[inline]
    pub(crate) fn exhausted() -> Self {
        Self {
            elements: &[],
            counts: &[],
            slot: 0,
            occurrence: 0,
        }
    }

    /// Returns `true` when no further edges remain.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.slot >= self.elements.len()
    }

    /// Moves to the next edge. No-op on an exhausted cursor.
    pub fn advance(&mut self) {
        let Some(run) = self.counts.get(self.slot) else {
            return;
        };
        self.occurrence += 1;
        if self.occurrence >= run.get() {
            self.slot += 1;
            self.occurrence = 0;
        }
    }

    /// The neighbour key under the cursor, or `None` if exhausted.
    #[inline]
    pub fn get(&self) -> Option<&'a K> {
        self.elements.get(self.slot)
    }

    /// The neighbour key under the cursor.
    ///
    /// # Panics
    /// Panics if the cursor is exhausted. Use [`get`](Self::get) or
    /// [`try_current`](Self::try_current) when exhaustion is expected.
    #[inline]
    pub fn current(&self) -> &'a K {
        match self.get() {
            Some(key) => key,
            None => panic!("EdgeCursor::current called on an exhausted cursor"),
        }
    }

    /// The neighbour key under the cursor, or [`GraphError::ExhaustedCursor`].
    #[inline]
    pub fn try_current(&self) -> Result<&'a K> {
        self.get().ok_or(GraphError::ExhaustedCursor)
    }
}

impl<K> Clone for EdgeCursor<'_, K> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements,
            counts: self.counts,
            slot: self.slot,
            occurrence: self.occurrence,
        }
    }
}

impl<'a, K> Iterator for EdgeCursor<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.get()?;
        self.advance();
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.counts.get(self.slot) {
            // Every later run holds at least one occurrence.
            Some(run) => {
                let rest = run.get() - self.occurrence + (self.counts.len() - self.slot - 1);
                (rest, None)
            }
            None => (0, Some(0)),
        }
    }
}

impl<K> FusedIterator for EdgeCursor<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for EdgeCursor<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeCursor")
            .field("current", &self.get())
            .field("occurrence", &self.occurrence)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_cursor_walks_to_end() {
        let keys = [10, 20, 30];
        let mut cursor = VertexCursor::new(&keys, 1);

        assert_eq!(*cursor.current(), 20);
        cursor.advance();
        assert_eq!(*cursor.current(), 30);
        cursor.advance();
        assert!(cursor.is_exhausted());

        // Advancing past the end is a no-op.
        cursor.advance();
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.get(), None);
        assert_eq!(cursor.try_current(), Err(GraphError::ExhaustedCursor));
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn vertex_cursor_current_panics_when_exhausted() {
        let cursor = VertexCursor::<u32>::exhausted();
        let _ = cursor.current();
    }

    #[test]
    fn edge_cursor_repeats_parallel_occurrences() {
        let mut set = HashMultiset::new();
        for x in ['b', 'a', 'b', 'c'] {
            set.insert(x);
        }

        let seen: String = EdgeCursor::over(&set).copied().collect();
        assert_eq!(seen, "bbac");
    }

    #[test]
    fn edge_cursor_from_middle_of_run() {
        let mut set = HashMultiset::new();
        for x in [1, 1, 1, 2] {
            set.insert(x);
        }

        let cursor = EdgeCursor::at(&set, 0, 2);
        assert_eq!(cursor.size_hint(), (2, None));
        assert_eq!(cursor.copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn edge_cursor_current_panics_when_exhausted() {
        let cursor = EdgeCursor::<u32>::exhausted();
        let _ = cursor.current();
    }

    #[test]
    fn exhausted_edge_cursor_is_fused() {
        let mut cursor = EdgeCursor::<u8>::exhausted();
        assert!(cursor.is_exhausted());
        cursor.advance();
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }
}
