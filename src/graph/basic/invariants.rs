//! Structural invariant checks for [`DirectedMultigraph`](super::DirectedMultigraph).
//!
//! Checked properties:
//! 1. The out-index and in-index hold exactly the same vertex keys.
//! 2. Every edge is mirrored: the multiplicity of `b` in `out[a]` equals the
//!    multiplicity of `a` in `in[b]`, in both directions.
//! 3. The vertex counter equals the number of keys and the edge counter equals the
//!    total multiplicity of either index.
//!
//! Debug builds assert on the first violation so the failing property is named in
//! the panic message; release builds report it through the return value.

use core::hash::{BuildHasher, Hash};

use crate::collections::{DenseIndexMap, HashMultiset};

/// Debug-asserts an invariant with a message and passes the condition through.
#[inline(always)]
fn invariant(condition: bool, message: &str) -> bool {
    debug_assert!(condition, "Graph invariant violated: {}", message);
    condition
}

/// Every `(a, b, n)` recorded in `forward` appears as `(b, a, n)` in `backward`.
fn mirrored<K, S>(
    forward: &DenseIndexMap<K, HashMultiset<K, S>, S>,
    backward: &DenseIndexMap<K, HashMultiset<K, S>, S>,
) -> bool
where
    K: Eq + Hash,
    S: BuildHasher,
{
    forward.iter().all(|(a, neighbours)| {
        neighbours
            .iter_counts()
            .all(|(b, n)| backward.get(b).map_or(0, |back| back.count(a)) == n)
    })
}

pub(crate) fn check<K, S>(
    out: &DenseIndexMap<K, HashMultiset<K, S>, S>,
    incoming: &DenseIndexMap<K, HashMultiset<K, S>, S>,
    vertex_count: usize,
    edge_count: usize,
) -> bool
where
    K: Eq + Hash,
    S: BuildHasher,
{
    let same_keys =
        out.len() == incoming.len() && out.keys().iter().all(|v| incoming.contains_key(v));
    if !invariant(same_keys, "indices must hold the same vertices") {
        return false;
    }
    if !invariant(mirrored(out, incoming), "out-edges must be mirrored") {
        return false;
    }
    if !invariant(mirrored(incoming, out), "in-edges must be mirrored") {
        return false;
    }
    if !invariant(vertex_count == out.len(), "vertex counter mismatch") {
        return false;
    }

    let out_total: usize = out.values().iter().map(HashMultiset::len).sum();
    let in_total: usize = incoming.values().iter().map(HashMultiset::len).sum();
    let edges_match = edge_count == out_total && edge_count == in_total;
    invariant(edges_match, "edge counter mismatch")
}
