//! A dynamic directed multigraph keyed by caller-supplied vertex values.
//!
//! Two adjacency indices are kept side by side:
//! - `out[v]`: multiset of targets of the edges leaving `v`
//! - `incoming[v]`: multiset of sources of the edges entering `v`
//!
//! Neither index is reachable from outside; every mutation goes through
//! [`DirectedMultigraph::link`] / [`DirectedMultigraph::unlink`], which write both
//! sides together. This keeps the two indices mirrors of each other:
//! a key is a vertex iff it is present in both, and the multiplicity of `b` in
//! `out[a]` always equals the multiplicity of `a` in `incoming[b]`.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

use super::cursor::{EdgeCursor, VertexCursor};
use crate::collections::{DenseIndexMap, HashMultiset};
use crate::error::{GraphError, Result};

/// Map from vertex to the multiset of its neighbours in one direction.
type AdjacencyIndex<K, S> = DenseIndexMap<K, HashMultiset<K, S>, S>;

/// Number of endpoints of every edge.
pub const EDGE_DEGREE: usize = 2;

/// A directed graph permitting parallel edges.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_vertex` | \(O(1)\) amortized | Appends to both indices |
/// | `add_edge` | \(O(1)\) amortized | One multiset insert per index |
/// | `erase_edge` | \(O(1)\) | Removes one occurrence per index |
/// | `erase_vertex` | \(O(\deg^+ + \deg^-)\) | Cascades into every neighbour |
/// | `contains_edge` | \(O(1)\) | Hash lookup in `out[a]` |
/// | `vertex_degree` | \(O(1)\) | Out-degree, counted with multiplicity |
/// | `vertex_count` / `edge_count` | \(O(1)\) | Maintained counters |
///
/// Vertex order seen through [`begin_vertex`](Self::begin_vertex) is unspecified
/// and changes when vertices are erased.
pub struct DirectedMultigraph<K, S = RandomState> {
    out: AdjacencyIndex<K, S>,
    incoming: AdjacencyIndex<K, S>,
    vertex_count: usize,
    edge_count: usize,
    hash_builder: S,
}

impl<K> DirectedMultigraph<K, RandomState> {
    /// Creates an empty graph.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(0, RandomState::new())
    }

    /// Creates an empty graph with room for at least `vertices` vertices.
    #[inline]
    pub fn with_capacity(vertices: usize) -> Self {
        Self::with_capacity_and_hasher(vertices, RandomState::new())
    }
}

impl<K, S: Clone> DirectedMultigraph<K, S> {
    /// Creates an empty graph hashing keys with `hash_builder`.
    ///
    /// Every adjacency multiset receives its own clone of the hasher.
    #[inline]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty graph with capacity and hasher.
    pub fn with_capacity_and_hasher(vertices: usize, hash_builder: S) -> Self {
        Self {
            out: DenseIndexMap::with_capacity_and_hasher(vertices, hash_builder.clone()),
            incoming: DenseIndexMap::with_capacity_and_hasher(vertices, hash_builder.clone()),
            vertex_count: 0,
            edge_count: 0,
            hash_builder,
        }
    }
}

impl<K, S> DirectedMultigraph<K, S> {
    /// Number of vertices.
    #[inline(always)]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges, counting parallel edges separately.
    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of endpoints of an edge; always [`EDGE_DEGREE`].
    #[inline(always)]
    pub const fn edge_degree(&self) -> usize {
        EDGE_DEGREE
    }

    /// Returns `true` if the graph has no vertices.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// The hasher used for keys.
    #[inline]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Cursor over every vertex.
    #[inline]
    pub fn begin_vertex(&self) -> VertexCursor<'_, K> {
        VertexCursor::new(self.out.keys(), 0)
    }

    /// Removes every vertex and edge.
    pub fn clear(&mut self) {
        self.out.clear();
        self.incoming.clear();
        self.vertex_count = 0;
        self.edge_count = 0;
        graph_trace!("graph cleared");
    }
}

impl<K, S> DirectedMultigraph<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Returns `true` if `vertex` is in the graph.
    #[inline]
    pub fn contains_vertex<Q>(&self, vertex: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.out.contains_key(vertex)
    }

    /// Returns `true` if at least one edge `from -> to` exists.
    #[inline]
    pub fn contains_edge<Q>(&self, from: &Q, to: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.out
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    /// Number of parallel edges `from -> to` (0 if there are none).
    #[inline]
    pub fn edge_multiplicity<Q>(&self, from: &Q, to: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.out.get(from).map_or(0, |targets| targets.count(to))
    }

    /// Out-degree of `vertex`, counting parallel edges; `None` if absent.
    #[inline]
    pub fn vertex_degree<Q>(&self, vertex: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.out.get(vertex).map(HashMultiset::len)
    }

    /// In-degree of `vertex`, counting parallel edges; `None` if absent.
    #[inline]
    pub fn in_degree<Q>(&self, vertex: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.incoming.get(vertex).map(HashMultiset::len)
    }

    /// Cursor over the targets of the edges leaving `vertex`.
    ///
    /// Returns an exhausted cursor if `vertex` is absent.
    pub fn begin_edge<Q>(&self, vertex: &Q) -> EdgeCursor<'_, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.out
            .get(vertex)
            .map_or_else(EdgeCursor::exhausted, EdgeCursor::over)
    }

    /// Cursor over the sources of the edges entering `vertex`.
    ///
    /// Returns an exhausted cursor if `vertex` is absent.
    pub fn begin_in_edge<Q>(&self, vertex: &Q) -> EdgeCursor<'_, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.incoming
            .get(vertex)
            .map_or_else(EdgeCursor::exhausted, EdgeCursor::over)
    }

    /// Cursor positioned at `vertex`, or exhausted if it is absent.
    ///
    /// Advancing continues through the vertices stored after it.
    pub fn find_vertex<Q>(&self, vertex: &Q) -> VertexCursor<'_, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.out.get_index_of(vertex) {
            Some(idx) => VertexCursor::new(self.out.keys(), idx),
            None => VertexCursor::exhausted(),
        }
    }

    /// Cursor positioned at the first occurrence of `to` within `out[from]`.
    ///
    /// Never fails: an absent vertex or edge yields an exhausted cursor.
    pub fn find_edge<Q>(&self, from: &Q, to: &Q) -> EdgeCursor<'_, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.out
            .get(from)
            .and_then(|targets| Some(EdgeCursor::at(targets, targets.position(to)?, 0)))
            .unwrap_or_else(EdgeCursor::exhausted)
    }

    /// Removes one edge `from -> to`.
    ///
    /// When parallel edges exist exactly one is removed. Returns `false` if there
    /// was no such edge.
    pub fn erase_edge<Q>(&mut self, from: &Q, to: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if !self.unlink(from, to) {
            return false;
        }
        self.edge_count -= 1;
        graph_trace!(edge_count = self.edge_count, "edge erased");
        true
    }

    /// Like [`erase_edge`](Self::erase_edge), reporting a missing edge as
    /// [`GraphError::EdgeNotFound`].
    pub fn try_erase_edge<Q>(&mut self, from: &Q, to: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.erase_edge(from, to) {
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound)
        }
    }

    /// Removes every parallel edge `from -> to`, returning how many were removed.
    pub fn erase_edges<Q>(&mut self, from: &Q, to: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = match self.out.get_mut(from) {
            Some(targets) => targets.remove_all(to),
            None => 0,
        };
        if removed == 0 {
            return 0;
        }
        let mirrored = self
            .incoming
            .get_mut(to)
            .map_or(0, |sources| sources.remove_all(from));
        debug_assert_eq!(removed, mirrored, "indices disagree on multiplicity");
        self.edge_count -= removed;
        graph_trace!(removed, edge_count = self.edge_count, "edges erased");
        removed
    }

    /// Removes `vertex` together with every edge touching it.
    ///
    /// Reverse references held by neighbouring vertices are removed too, so no
    /// surviving vertex keeps an edge to or from the erased one. Returns the number
    /// of edges removed; a self-loop counts once.
    ///
    /// # Errors
    /// [`GraphError::VertexNotFound`] if `vertex` is absent. The graph is unchanged.
    pub fn erase_vertex<Q>(&mut self, vertex: &Q) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let targets = self
            .out
            .swap_remove(vertex)
            .ok_or(GraphError::VertexNotFound)?;
        let sources = self.incoming.swap_remove(vertex);
        debug_assert!(sources.is_some(), "vertex missing from in-index");

        let self_loops = targets.count(vertex);
        for target in targets.elements() {
            if let Some(back) = self.incoming.get_mut::<K>(target) {
                back.remove_all(vertex);
            }
        }
        let mut incoming_len = 0;
        if let Some(sources) = &sources {
            incoming_len = sources.len();
            for source in sources.elements() {
                if let Some(forward) = self.out.get_mut::<K>(source) {
                    forward.remove_all(vertex);
                }
            }
        }

        let removed = targets.len() + incoming_len - self_loops;
        self.edge_count -= removed;
        self.vertex_count -= 1;
        graph_trace!(
            removed,
            vertex_count = self.vertex_count,
            edge_count = self.edge_count,
            "vertex erased"
        );
        Ok(removed)
    }

    /// Removes one occurrence of `from -> to` from both indices.
    fn unlink<Q>(&mut self, from: &Q, to: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(targets) = self.out.get_mut(from) else {
            return false;
        };
        if !targets.remove(to) {
            return false;
        }
        let mirrored = self
            .incoming
            .get_mut(to)
            .is_some_and(|sources| sources.remove(from));
        debug_assert!(mirrored, "edge missing from in-index");
        true
    }

    /// Reserves room for at least `additional` more vertices.
    pub fn reserve(&mut self, additional: usize) {
        self.out.reserve(additional);
        self.incoming.reserve(additional);
    }

    /// Releases unused capacity in both indices and every adjacency multiset.
    pub fn shrink_to_fit(&mut self) {
        for index in [&mut self.out, &mut self.incoming] {
            index.shrink_to_fit();
            for (_, neighbours) in index.iter_mut() {
                neighbours.shrink_to_fit();
            }
        }
    }

    /// Checks the structural invariants by a full scan.
    ///
    /// Returns `true` when both indices hold the same vertices, every edge is
    /// mirrored with equal multiplicity, and both counters match the stored data.
    pub fn validate_invariants(&self) -> bool {
        super::invariants::check(
            &self.out,
            &self.incoming,
            self.vertex_count,
            self.edge_count,
        )
    }
}

impl<K, S> DirectedMultigraph<K, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    /// Adds `vertex` if absent. Adding an existing vertex changes nothing.
    ///
    /// Returns a cursor positioned at the vertex.
    pub fn add_vertex(&mut self, vertex: K) -> VertexCursor<'_, K> {
        let idx = self.ensure_vertex(vertex);
        VertexCursor::new(self.out.keys(), idx)
    }

    /// Adds an edge `from -> to`, creating either endpoint if needed.
    ///
    /// Adding an existing edge again creates a parallel edge. Returns a cursor
    /// positioned at the newly added occurrence of `to` within `out[from]`.
    pub fn add_edge(&mut self, from: K, to: K) -> EdgeCursor<'_, K> {
        let from_idx = self.ensure_vertex(from.clone());
        self.ensure_vertex(to.clone());
        let multiplicity = self.link(from_idx, from, to.clone());
        self.edge_count += 1;
        graph_trace!(multiplicity, edge_count = self.edge_count, "edge added");

        match self.out.get_index(from_idx) {
            Some((_, targets)) => match targets.position(&to) {
                Some(slot) => EdgeCursor::at(targets, slot, multiplicity - 1),
                None => EdgeCursor::exhausted(),
            },
            None => EdgeCursor::exhausted(),
        }
    }

    /// Inserts `vertex` into both indices if needed; returns its dense index in `out`.
    fn ensure_vertex(&mut self, vertex: K) -> usize {
        let hasher = &self.hash_builder;
        let empty = || HashMultiset::with_hasher(hasher.clone());
        let (idx, created) = self.out.insert_with(vertex.clone(), empty);
        if created {
            self.incoming.insert_with(vertex, empty);
            self.vertex_count += 1;
            graph_trace!(vertex_count = self.vertex_count, "vertex added");
        }
        idx
    }

    /// Records one occurrence of `from -> to` in both indices.
    ///
    /// Both endpoints must already be vertices. Returns the new multiplicity.
    fn link(&mut self, from_idx: usize, from: K, to: K) -> usize {
        if let Some(sources) = self.incoming.get_mut(&to) {
            sources.insert(from);
        }
        self.out
            .get_index_mut(from_idx)
            .map_or(0, |(_, targets)| targets.insert(to))
    }
}

impl<K> Default for DirectedMultigraph<K, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, S: Clone> Clone for DirectedMultigraph<K, S> {
    fn clone(&self) -> Self {
        Self {
            out: self.out.clone(),
            incoming: self.incoming.clone(),
            vertex_count: self.vertex_count,
            edge_count: self.edge_count,
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<K, S> PartialEq for DirectedMultigraph<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Two graphs are equal when they hold the same vertices and the same edges
    /// with the same multiplicities, regardless of storage order.
    fn eq(&self, other: &Self) -> bool {
        self.vertex_count == other.vertex_count
            && self.edge_count == other.edge_count
            && self
                .out
                .iter()
                .all(|(v, targets)| other.out.get(v).is_some_and(|theirs| theirs == targets))
    }
}

impl<K, S> Eq for DirectedMultigraph<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
}

impl<K: fmt::Debug, S> fmt::Debug for DirectedMultigraph<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectedMultigraph")
            .field("vertex_count", &self.vertex_count)
            .field("edge_count", &self.edge_count)
            .field("out", &self.out)
            .field("incoming", &self.incoming)
            .finish()
    }
}

impl<K, S> Extend<(K, K)> for DirectedMultigraph<K, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    fn extend<I: IntoIterator<Item = (K, K)>>(&mut self, edges: I) {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }
}

impl<K> FromIterator<(K, K)> for DirectedMultigraph<K, RandomState>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, K)>>(edges: I) -> Self {
        let mut graph = Self::new();
        graph.extend(edges);
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirectedMultigraph<u32> {
        [(1, 2), (2, 5), (1, 3), (3, 4), (4, 5)]
            .into_iter()
            .collect()
    }

    #[test]
    fn sample_graph_counts() {
        let graph = sample();

        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.contains_edge(&1, &2));
        assert!(!graph.contains_edge(&2, &1));
        assert_eq!(graph.vertex_degree(&1), Some(2));
        assert_eq!(graph.vertex_degree(&5), Some(0));
        assert_eq!(graph.in_degree(&5), Some(2));
        assert!(graph.validate_invariants());
    }

    #[test]
    fn add_edge_cursor_points_at_new_occurrence() {
        let mut graph = DirectedMultigraph::new();
        graph.add_edge('a', 'x');
        graph.add_edge('a', 'b');

        let cursor = graph.add_edge('a', 'b');
        assert_eq!(*cursor.current(), 'b');
        // Only the newest occurrence of `b` remains in its run.
        let rest: Vec<_> = cursor.collect();
        assert_eq!(rest.iter().filter(|&&&k| k == 'b').count(), 1);
    }

    #[test]
    fn add_vertex_cursor_points_at_vertex() {
        let mut graph = DirectedMultigraph::new();
        graph.add_vertex("a");
        let cursor = graph.add_vertex("b");
        assert_eq!(*cursor.current(), "b");

        let again = graph.add_vertex("a");
        assert_eq!(*again.current(), "a");
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn erase_vertex_cascades_to_neighbours() {
        let mut graph = sample();

        // 2 has one incoming (1->2) and one outgoing (2->5) edge.
        assert_eq!(graph.erase_vertex(&2), Ok(2));
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert!(!graph.contains_edge(&1, &2));
        assert_eq!(graph.vertex_degree(&1), Some(1));
        assert_eq!(graph.in_degree(&5), Some(1));
        assert!(graph.begin_edge(&1).all(|&t| t != 2));
        assert!(graph.validate_invariants());
    }

    #[test]
    fn erase_vertex_counts_self_loop_once() {
        let mut graph = DirectedMultigraph::new();
        graph.add_edge(1, 1);
        graph.add_edge(1, 2);
        graph.add_edge(3, 1);

        assert_eq!(graph.erase_vertex(&1), Ok(3));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.validate_invariants());
    }

    #[test]
    fn erase_vertex_missing_is_not_found() {
        let mut graph = sample();
        assert_eq!(graph.erase_vertex(&42), Err(GraphError::VertexNotFound));
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn erase_edges_removes_all_parallel() {
        let mut graph = DirectedMultigraph::new();
        for _ in 0..3 {
            graph.add_edge("a", "b");
        }
        graph.add_edge("b", "a");

        assert_eq!(graph.edge_multiplicity("a", "b"), 3);
        assert_eq!(graph.erase_edges("a", "b"), 3);
        assert_eq!(graph.erase_edges("a", "b"), 0);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge("b", "a"));
        assert!(graph.validate_invariants());
    }

    #[test]
    fn try_erase_edge_reports_missing() {
        let mut graph = sample();
        assert_eq!(graph.try_erase_edge(&1, &2), Ok(()));
        assert_eq!(graph.try_erase_edge(&1, &2), Err(GraphError::EdgeNotFound));
    }

    #[test]
    fn in_edge_cursor_lists_sources() {
        let graph = sample();
        let mut sources: Vec<_> = graph.begin_in_edge(&5).copied().collect();
        sources.sort_unstable();
        assert_eq!(sources, vec![2, 4]);
        assert!(graph.begin_in_edge(&99).is_exhausted());
    }

    #[test]
    fn find_vertex_advances_to_tail_of_vertex_order() {
        let mut graph = sample();
        graph.add_vertex(9);
        graph.erase_vertex(&1).unwrap();

        let order: Vec<u32> = graph.begin_vertex().copied().collect();
        for (i, v) in order.iter().enumerate() {
            let mut cursor = graph.find_vertex(v);
            for expected in &order[i..] {
                assert_eq!(cursor.current(), expected);
                cursor.advance();
            }
            assert!(cursor.is_exhausted());
        }
    }

    #[test]
    fn erase_vertex_keeps_moved_vertex_reachable() {
        let mut graph = sample();
        let last = *graph.begin_vertex().last().unwrap();
        let first = *graph.begin_vertex().current();
        graph.add_edge(last, first);

        graph.erase_vertex(&first).unwrap();
        assert!(graph.contains_vertex(&last));
        assert_eq!(graph.find_vertex(&last).current(), &last);
        assert!(graph.begin_edge(&last).all(|t| *t != first));
        assert!(graph.validate_invariants());
    }

    #[test]
    fn debug_lists_both_indices() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("out"));
        assert!(rendered.contains("incoming"));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = sample();
        let b: DirectedMultigraph<u32> = [(4, 5), (3, 4), (1, 3), (2, 5), (1, 2)]
            .into_iter()
            .collect();
        assert_eq!(a, b);

        let mut c = b.clone();
        c.add_edge(1, 2);
        assert_ne!(a, c);
    }

    #[test]
    fn custom_hasher_is_propagated() {
        let hasher = RandomState::new();
        let mut graph = DirectedMultigraph::with_capacity_and_hasher(4, hasher);
        graph.add_edge(1u8, 2u8);
        graph.reserve(16);
        graph.shrink_to_fit();
        assert!(graph.contains_edge(&1, &2));
        assert!(graph.validate_invariants());
    }
}
