//! Graph Vertices
//!
//! This module defines the vertex type that lives in the graph arena.
//! Edges are stored on the source vertex as an ordered map from the target's
//! [`VertexId`] to the edge weight.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::error::{GraphError, Result};

/// Edge weight. Stored on every edge, never read by the sorter.
pub type Weight = i64;

/// Generate a new process-unique graph tag.
pub(crate) fn next_graph_tag() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Position of a vertex in its graph's arena.
///
/// Ids are dense and stable: a graph never removes vertices, and overwriting
/// a key keeps its slot. Each id also carries the tag of the graph that
/// issued it, so an id from one graph never matches a vertex of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId {
    graph: u64,
    index: usize,
}

impl VertexId {
    pub(crate) fn new(graph: u64, index: usize) -> Self {
        Self { graph, index }
    }

    /// Get the raw arena index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check whether this id was issued by the graph with `tag`.
    pub(crate) fn belongs_to(&self, tag: u64) -> bool {
        self.graph == tag
    }
}

/// A vertex in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex<K> {
    /// Arena slot of this vertex.
    id: VertexId,

    /// Caller-supplied key. Never changes after creation.
    key: K,

    /// Outgoing edges, in the order they were first added.
    neighbours: IndexMap<VertexId, Weight>,
}

impl<K> Vertex<K> {
    pub(crate) fn new(id: VertexId, key: K) -> Self {
        Self {
            id,
            key,
            neighbours: IndexMap::new(),
        }
    }

    /// Get the vertex's arena id.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Get the vertex's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Add or overwrite the edge to `neighbor`.
    ///
    /// Re-adding an existing edge updates its weight in place and keeps its
    /// position in [`get_connections`](Self::get_connections).
    /// Crate-internal so that an edge can only point into the owning graph.
    pub(crate) fn add_neighbor(&mut self, neighbor: VertexId, weight: Weight) {
        self.neighbours.insert(neighbor, weight);
    }

    /// Copy this vertex into the graph tagged `tag`, keeping every index.
    pub(crate) fn retagged(&self, tag: u64) -> Self
    where
        K: Clone,
    {
        Self {
            id: VertexId::new(tag, self.id.index),
            key: self.key.clone(),
            neighbours: self
                .neighbours
                .iter()
                .map(|(id, weight)| (VertexId::new(tag, id.index), *weight))
                .collect(),
        }
    }

    /// Remove the edge to `neighbor`, preserving the order of the others.
    pub(crate) fn remove_neighbor(&mut self, neighbor: VertexId) -> Option<Weight> {
        self.neighbours.shift_remove(&neighbor)
    }

    /// Ids of all neighbours, in edge insertion order.
    ///
    /// Resolve them with [`Graph::get_vertex_by_id`](crate::graph::Graph::get_vertex_by_id)
    /// or iterate [`Graph::connections`](crate::graph::Graph::connections) instead.
    pub fn get_connections(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        self.neighbours.keys().copied()
    }

    /// Check whether there is an edge from this vertex to `neighbor`.
    ///
    /// Always false for a vertex of another graph.
    pub fn has_neighbor(&self, neighbor: &Vertex<K>) -> bool {
        self.neighbours.contains_key(&neighbor.id)
    }

    /// Number of outgoing edges.
    pub fn out_degree(&self) -> usize {
        self.neighbours.len()
    }
}

impl<K: Clone> Vertex<K> {
    /// Get the weight of the edge to `neighbor`.
    ///
    /// A missing edge is an error, not a zero weight. So is a `neighbor` taken
    /// from another graph, even if it sits at the same arena index.
    pub fn get_weight(&self, neighbor: &Vertex<K>) -> Result<Weight, K> {
        self.neighbours
            .get(&neighbor.id)
            .copied()
            .ok_or_else(|| GraphError::EdgeNotFound {
                from: self.key.clone(),
                to: neighbor.key.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Vertex<&'static str>, Vertex<&'static str>) {
        (
            Vertex::new(VertexId::new(0, 0), "a"),
            Vertex::new(VertexId::new(0, 1), "b"),
        )
    }

    #[test]
    fn new_vertex_has_no_edges() {
        let (a, _) = pair();
        assert_eq!(*a.key(), "a");
        assert_eq!(a.id().index(), 0);
        assert_eq!(a.out_degree(), 0);
        assert_eq!(a.get_connections().len(), 0);
    }

    #[test]
    fn neighbour_management() {
        let (mut a, b) = pair();
        let c = Vertex::new(VertexId::new(0, 2), "c");

        a.add_neighbor(c.id(), 3);
        a.add_neighbor(b.id(), 5);

        assert!(a.has_neighbor(&b));
        assert_eq!(a.get_weight(&b), Ok(5));
        assert_eq!(a.get_weight(&c), Ok(3));

        // Insertion order, not id order.
        let ids: Vec<_> = a.get_connections().collect();
        assert_eq!(ids, vec![c.id(), b.id()]);

        assert_eq!(a.remove_neighbor(c.id()), Some(3));
        assert!(!a.has_neighbor(&c));
        assert_eq!(a.out_degree(), 1);
    }

    #[test]
    fn overwriting_edge_keeps_position() {
        let (mut a, b) = pair();
        let c = Vertex::new(VertexId::new(0, 2), "c");

        a.add_neighbor(b.id(), 1);
        a.add_neighbor(c.id(), 2);
        a.add_neighbor(b.id(), 9);

        assert_eq!(a.out_degree(), 2);
        assert_eq!(a.get_weight(&b), Ok(9));
        assert_eq!(a.get_connections().next(), Some(b.id()));
    }

    #[test]
    fn missing_edge_weight_is_an_error() {
        let (a, b) = pair();
        assert_eq!(
            a.get_weight(&b),
            Err(GraphError::EdgeNotFound { from: "a", to: "b" })
        );
    }

    #[test]
    fn vertex_from_another_graph_never_matches() {
        let (mut a, b) = pair();
        a.add_neighbor(b.id(), 0);

        let foreign = Vertex::new(VertexId::new(1, 1), "y");

        assert!(!a.has_neighbor(&foreign));
        assert_eq!(
            a.get_weight(&foreign),
            Err(GraphError::EdgeNotFound { from: "a", to: "y" })
        );
    }

    #[test]
    fn retagging_moves_every_edge() {
        let (mut a, b) = pair();
        a.add_neighbor(b.id(), 4);

        let copy = a.retagged(9);

        assert_eq!(copy.id(), VertexId::new(9, 0));
        assert_eq!(copy.get_weight(&b.retagged(9)), Ok(4));
        assert!(!copy.has_neighbor(&b));
    }
}
