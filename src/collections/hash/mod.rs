//! Hash-based collections backing the graph's adjacency indices.

pub mod index_map;
pub mod multiset;

pub use index_map::DenseIndexMap;
pub use multiset::HashMultiset;
