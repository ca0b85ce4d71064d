//! # `multidigraph` - Directed Multigraph Container
//!
//! An in-memory directed graph that permits parallel edges, keyed by
//! caller-supplied vertex values.
//!
//! ## Design
//!
//! The graph keeps two adjacency indices over the same vertex set:
//! - **Out-index**: vertex -> multiset of the targets of its outgoing edges
//! - **In-index**: vertex -> multiset of the sources of its incoming edges
//!
//! Edges are not stored as objects; an edge `a -> b` exists as one occurrence of
//! `b` in `out[a]` mirrored by one occurrence of `a` in `in[b]`. Both indices are
//! private and only ever written together, so the following hold before and after
//! every public call:
//!
//! 1. A key is a vertex iff it is present in both indices.
//! 2. The multiplicity of `b` in `out[a]` equals the multiplicity of `a` in `in[b]`.
//! 3. `vertex_count()` and `edge_count()` match the stored data and are O(1).
//! 4. Adding an existing vertex is idempotent; adding an existing edge creates a
//!    parallel edge.
//!
//! Erasing a vertex removes every edge touching it from both indices, including the
//! reverse references held by its neighbours.
//!
//! ### Cursors
//!
//! [`VertexCursor`] and [`EdgeCursor`] are lazy, forward-only views that borrow the
//! graph. The borrow checker forbids mutating the graph while a cursor is alive, so
//! cursor invalidation cannot happen in safe code. Reading past the end through
//! `current()` panics; `get()` and `try_current()` are the non-panicking forms.
//!
//! ## Features
//!
//! - `tracing`: emit `trace`-level events for every mutation
//! - `proptest`: export strategies for generating graphs in property tests
//!
//! ## Example
//!
//! ```rust
//! use multidigraph::DirectedMultigraph;
//!
//! let mut graph = DirectedMultigraph::new();
//! graph.add_edge(1, 2);
//! graph.add_edge(1, 2);
//! graph.add_edge(2, 3);
//!
//! assert_eq!(graph.vertex_count(), 3);
//! assert_eq!(graph.edge_count(), 3);
//! assert_eq!(graph.vertex_degree(&1), Some(2));
//! assert!(!graph.contains_edge(&2, &1));
//!
//! let targets: Vec<_> = graph.begin_edge(&1).copied().collect();
//! assert_eq!(targets, vec![2, 2]);
//!
//! assert!(graph.erase_edge(&1, &2));
//! assert!(graph.contains_edge(&1, &2));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
mod macros;

pub mod collections;
pub mod error;
pub mod graph;

pub use collections::{DenseIndexMap, HashMultiset};
pub use error::{GraphError, Result};
pub use graph::{DirectedMultigraph, EdgeCursor, VertexCursor, EDGE_DEGREE};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Cursors are a borrowed slice plus position words; no hidden allocation.
    assert!(
        mem::size_of::<VertexCursor<'static, u64>>() == mem::size_of::<usize>() * 3
    );
    assert!(
        mem::size_of::<EdgeCursor<'static, u64>>() == mem::size_of::<usize>() * 6
    );

    assert!(EDGE_DEGREE == 2);
};
