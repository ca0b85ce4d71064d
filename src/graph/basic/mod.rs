//! The directed multigraph container and its cursors.

pub mod cursor;
mod invariants;
pub mod multigraph;
#[cfg(feature = "proptest")]
pub mod strategy;

pub use cursor::{EdgeCursor, VertexCursor};
pub use multigraph::{DirectedMultigraph, EDGE_DEGREE};
