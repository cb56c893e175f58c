//! Graph Errors
//!
//! Every fallible operation in this crate reports one of these variants.
//! Lookups that routinely miss (`Graph::get_vertex`) return `Option` instead;
//! the `VertexNotFound` variant exists for callers that prefer `?`.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, K> = std::result::Result<T, GraphError<K>>;

/// Errors produced by the graph store and the topological sorter.
///
/// Generic over the vertex key type so callers get their own keys back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError<K> {
    /// No vertex is registered under `key`.
    #[error("vertex {key:?} not found")]
    VertexNotFound { key: K },

    /// Both endpoints exist but there is no edge `from -> to`.
    #[error("no edge from {from:?} to {to:?}")]
    EdgeNotFound { from: K, to: K },

    /// `add_vertex` was called for an existing key under
    /// [`DuplicateVertexPolicy::Reject`](crate::config::DuplicateVertexPolicy::Reject).
    #[error("vertex {key:?} already exists")]
    DuplicateVertex { key: K },

    /// The graph is not a DAG.
    ///
    /// `unsorted` holds the vertices whose in-degree never dropped to zero,
    /// in graph iteration order.
    #[error("graph contains a cycle: {} vertices could not be ordered", .unsorted.len())]
    CycleDetected { unsorted: Vec<K> },
}

impl<K> GraphError<K> {
    /// Returns true for [`GraphError::CycleDetected`].
    pub fn is_cycle(&self) -> bool {
        matches!(self, GraphError::CycleDetected { .. })
    }
}
