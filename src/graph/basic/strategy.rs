//! `proptest` strategies for generating graphs in downstream property tests.
//!
//! Enabled by the `proptest` cargo feature.

use core::fmt::Debug;
use core::hash::Hash;

use proptest::collection::{vec, SizeRange};
use proptest::prelude::*;

use super::DirectedMultigraph;

/// Lists of `(from, to)` pairs drawn from `keys`. Repeated pairs are kept, so the
/// lists naturally contain parallel edges and self-loops when the key space is small.
pub fn edge_lists<T>(
    keys: T,
    len: impl Into<SizeRange>,
) -> impl Strategy<Value = Vec<(T::Value, T::Value)>>
where
    T: Strategy + Clone,
{
    vec((keys.clone(), keys), len)
}

/// Graphs built by inserting an edge list drawn from `keys`.
pub fn multigraphs<T>(
    keys: T,
    len: impl Into<SizeRange>,
) -> impl Strategy<Value = DirectedMultigraph<T::Value>>
where
    T: Strategy + Clone,
    T::Value: Eq + Hash + Clone + Debug,
{
    edge_lists(keys, len)
        .prop_map(|edges| edges.into_iter().collect::<DirectedMultigraph<_>>())
}
