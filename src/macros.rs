//! Crate-internal macros.

/// Emits a `tracing::trace!` event when the `tracing` feature is enabled.
///
/// With the feature disabled the invocation expands to nothing, so call sites
/// carry no cost in default builds.
#[cfg(feature = "tracing")]
macro_rules! graph_trace {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "multidigraph", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! graph_trace {
    ($($arg:tt)*) => {};
}
