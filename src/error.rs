//! Error type shared by the graph and its cursors.

use thiserror::Error;

/// Failures reported by [`DirectedMultigraph`](crate::DirectedMultigraph) and its cursors.
///
/// Queries that are naturally optional (degrees, lookups) use `Option` instead;
/// this type is reserved for operations whose caller may want to propagate with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GraphError {
    /// The requested vertex is not part of the graph.
    #[error("vertex not found")]
    VertexNotFound,
    /// No edge exists for the requested ordered pair.
    #[error("edge not found")]
    EdgeNotFound,
    /// A cursor was read after it ran past its last element.
    #[error("cursor is exhausted")]
    ExhaustedCursor,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(GraphError::VertexNotFound.to_string(), "vertex not found");
        assert_eq!(GraphError::EdgeNotFound.to_string(), "edge not found");
        assert_eq!(
            GraphError::ExhaustedCursor.to_string(),
            "cursor is exhausted"
        );
    }
}
