//! Graph Store
//!
//! The graph owns every vertex in an insertion-ordered arena keyed by the
//! caller's key. Edges refer to their target by [`VertexId`], never by
//! pointer, so the structure may contain cycles without any ownership cycle.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::topo;
use super::vertex::{next_graph_tag, Vertex, VertexId, Weight};
use crate::config::{DuplicateVertexPolicy, GraphConfig};
use crate::error::{GraphError, Result};

/// Iterator over the vertices of a graph, in insertion order.
pub type Vertices<'a, K> = indexmap::map::Values<'a, K, Vertex<K>>;

/// A directed graph with weighted edges.
///
/// Grows monotonically: there is no removal API. Mutation needs `&mut self`,
/// so no vertex or key iterator can outlive a change to the graph.
///
/// Cloning yields an independent graph: the copy gets its own tag, so its
/// vertices never match edges of the original.
#[derive(Debug)]
pub struct Graph<K> {
    /// Process-unique tag stamped into every `VertexId` this graph issues.
    tag: u64,

    /// All vertices, indexed by key. A vertex's position is its `VertexId`.
    vertices: IndexMap<K, Vertex<K>>,

    config: GraphConfig,
}

impl<K> Graph<K> {
    /// Create a new empty graph with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create a new empty graph.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            tag: next_graph_tag(),
            vertices: IndexMap::new(),
            config,
        }
    }

    /// Get the graph's configuration.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Get a vertex by arena id. Ids issued by another graph resolve to `None`.
    pub fn get_vertex_by_id(&self, id: VertexId) -> Option<&Vertex<K>> {
        if !id.belongs_to(self.tag) {
            return None;
        }
        self.vertices.get_index(id.index()).map(|(_, vertex)| vertex)
    }

    /// Resolve the neighbours of `vertex` in edge insertion order.
    ///
    /// Empty for a vertex of another graph.
    pub fn connections<'a>(
        &'a self,
        vertex: &'a Vertex<K>,
    ) -> impl Iterator<Item = &'a Vertex<K>> + 'a {
        vertex
            .get_connections()
            .filter_map(move |id| self.get_vertex_by_id(id))
    }

    /// Keys of all registered vertices, in insertion order.
    pub fn get_vertices(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.vertices.keys()
    }

    /// Iterate over all vertices, in insertion order.
    ///
    /// Can be called any number of times; each call sees the current state.
    pub fn iter(&self) -> Vertices<'_, K> {
        self.vertices.values()
    }

    /// Get the total number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.iter().map(Vertex::out_degree).sum()
    }

    /// Check whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl<K> Graph<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Register a vertex under `key`.
    ///
    /// If `key` is already present the configured [`DuplicateVertexPolicy`]
    /// applies: `Overwrite` replaces it with an edgeless vertex and also drops
    /// every edge that pointed at it; `Reject` returns
    /// [`GraphError::DuplicateVertex`].
    pub fn add_vertex(&mut self, key: K) -> Result<VertexId, K> {
        let Some(index) = self.vertices.get_index_of(&key) else {
            return Ok(self.insert_vertex(key));
        };

        match self.config.duplicate_vertex {
            DuplicateVertexPolicy::Reject => Err(GraphError::DuplicateVertex { key }),
            DuplicateVertexPolicy::Overwrite => {
                let id = VertexId::new(self.tag, index);
                let mut dropped = 0;
                for vertex in self.vertices.values_mut() {
                    if vertex.remove_neighbor(id).is_some() {
                        dropped += 1;
                    }
                }
                if let Some((_, slot)) = self.vertices.get_index_mut(index) {
                    dropped += slot.out_degree();
                    debug!(key = ?key, dropped, "overwriting vertex");
                    *slot = Vertex::new(id, key);
                }
                Ok(id)
            }
        }
    }

    /// Get a vertex by key, or `None` if it is not registered.
    pub fn get_vertex<Q>(&self, key: &Q) -> Option<&Vertex<K>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.vertices.get(key)
    }

    /// Get a vertex by key, failing with [`GraphError::VertexNotFound`].
    pub fn vertex<Q>(&self, key: &Q) -> Result<&Vertex<K>, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        self.vertices
            .get(key)
            .ok_or_else(|| GraphError::VertexNotFound {
                key: key.to_owned(),
            })
    }

    /// Check whether `key` is registered.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.vertices.contains_key(key)
    }

    /// Add an edge `from -> to` with weight 0.
    ///
    /// See [`add_weighted_edge`](Self::add_weighted_edge).
    pub fn add_edge(&mut self, from: K, to: K) {
        self.add_weighted_edge(from, to, 0);
    }

    /// Add an edge `from -> to` with the given weight.
    ///
    /// Missing endpoints are created first, as edgeless vertices; this never
    /// consults the duplicate-vertex policy. An existing edge between the same
    /// endpoints has its weight overwritten.
    pub fn add_weighted_edge(&mut self, from: K, to: K, weight: Weight) {
        let from_id = self.ensure_vertex(from);
        let to_id = self.ensure_vertex(to);

        if let Some((key, vertex)) = self.vertices.get_index_mut(from_id.index()) {
            trace!(from = ?key, to = to_id.index(), weight, "adding edge");
            vertex.add_neighbor(to_id, weight);
        }
    }

    /// Get the weight of the edge `from -> to`.
    ///
    /// Fails with `VertexNotFound` for a missing endpoint and with
    /// `EdgeNotFound` when both exist but are not connected.
    pub fn weight<Q>(&self, from: &Q, to: &Q) -> Result<Weight, K>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let source = self.vertex(from)?;
        let target = self.vertex(to)?;
        source.get_weight(target)
    }

    /// Order all vertices so that every edge points forward.
    ///
    /// Shorthand for [`topological_sort`](crate::graph::topological_sort).
    pub fn topological_sort(&self) -> Result<Vec<K>, K> {
        topo::topological_sort(self)
    }

    fn ensure_vertex(&mut self, key: K) -> VertexId {
        match self.vertices.get_index_of(&key) {
            Some(index) => VertexId::new(self.tag, index),
            None => self.insert_vertex(key),
        }
    }

    fn insert_vertex(&mut self, key: K) -> VertexId {
        let id = VertexId::new(self.tag, self.vertices.len());
        trace!(key = ?key, id = id.index(), "adding vertex");
        self.vertices.insert(key.clone(), Vertex::new(id, key));
        id
    }
}

impl<K> Clone for Graph<K>
where
    K: Clone + Eq + Hash,
{
    fn clone(&self) -> Self {
        let tag = next_graph_tag();
        Self {
            tag,
            vertices: self
                .vertices
                .iter()
                .map(|(key, vertex)| (key.clone(), vertex.retagged(tag)))
                .collect(),
            config: self.config,
        }
    }
}

impl<K> Default for Graph<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K> IntoIterator for &'a Graph<K> {
    type Item = &'a Vertex<K>;
    type IntoIter = Vertices<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
