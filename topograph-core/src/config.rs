//! Graph Configuration
//!
//! The crate reads no files or environment variables. A host application that
//! wants these settings in its own config can deserialize [`GraphConfig`]
//! directly, since both types derive serde traits.

use serde::{Deserialize, Serialize};

/// What `Graph::add_vertex` does when the key is already registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateVertexPolicy {
    /// Replace the vertex with a fresh one that has no edges.
    ///
    /// Edges leaving the old vertex are dropped, and so are edges pointing at
    /// it from other vertices. The arena slot (and its `VertexId`) is reused.
    #[default]
    Overwrite,

    /// Refuse with `GraphError::DuplicateVertex` and leave the graph unchanged.
    Reject,
}

/// Settings for a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Policy applied by explicit `add_vertex` calls. Implicit creation in
    /// `add_edge` never consults it.
    pub duplicate_vertex: DuplicateVertexPolicy,
}

impl GraphConfig {
    /// Set the duplicate-vertex policy.
    pub fn duplicate_vertex(mut self, policy: DuplicateVertexPolicy) -> Self {
        self.duplicate_vertex = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_overwrites() {
        assert_eq!(
            GraphConfig::default().duplicate_vertex,
            DuplicateVertexPolicy::Overwrite
        );
    }

    #[test]
    fn builder_sets_policy() {
        let config = GraphConfig::default().duplicate_vertex(DuplicateVertexPolicy::Reject);
        assert_eq!(config.duplicate_vertex, DuplicateVertexPolicy::Reject);
    }

    #[test]
    fn deserializes_from_host_config() {
        let config: GraphConfig =
            serde_json::from_str(r#"{ "duplicate_vertex": "reject" }"#).unwrap();
        assert_eq!(config.duplicate_vertex, DuplicateVertexPolicy::Reject);

        // Missing fields fall back to defaults.
        let config: GraphConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GraphConfig::default());
    }
}
