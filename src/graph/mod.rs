//! Graph containers.
//!
//! - `basic`: the dynamic directed multigraph with mirrored out/in adjacency indices

pub mod basic;

pub use basic::{DirectedMultigraph, EdgeCursor, VertexCursor, EDGE_DEGREE};
