//! Collections used as building blocks by the graph.
//!
//! - `hash`: ordered hash map and counted multiset

pub mod hash;

pub use hash::{DenseIndexMap, HashMultiset};
