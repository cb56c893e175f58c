//! Shared Graph
//!
//! [`Graph`] has no internal synchronization. `SharedGraph` puts the whole
//! store behind a single reader-writer lock so several threads can build and
//! sort the same graph. A sort holds the read lock for its entire run, so it
//! never observes a half-applied mutation.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::store::Graph;
use super::topo;
use super::vertex::{VertexId, Weight};
use crate::error::Result;

/// A cloneable, thread-safe handle to a [`Graph`].
#[derive(Debug)]
pub struct SharedGraph<K> {
    inner: Arc<RwLock<Graph<K>>>,
}

impl<K> SharedGraph<K> {
    /// Wrap an existing graph.
    pub fn new(graph: Graph<K>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    /// Acquire shared access. Blocks while a writer holds the lock.
    pub fn read(&self) -> RwLockReadGuard<'_, Graph<K>> {
        self.inner.read()
    }

    /// Acquire exclusive access for a batch of mutations.
    pub fn write(&self) -> RwLockWriteGuard<'_, Graph<K>> {
        self.inner.write()
    }

    /// Get the total number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.read().vertex_count()
    }
}

impl<K> SharedGraph<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// See [`Graph::add_vertex`].
    pub fn add_vertex(&self, key: K) -> Result<VertexId, K> {
        self.write().add_vertex(key)
    }

    /// See [`Graph::add_edge`].
    pub fn add_edge(&self, from: K, to: K) {
        self.write().add_edge(from, to);
    }

    /// See [`Graph::add_weighted_edge`].
    pub fn add_weighted_edge(&self, from: K, to: K, weight: Weight) {
        self.write().add_weighted_edge(from, to, weight);
    }

    /// See [`Graph::contains`].
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().contains(key)
    }

    /// Sort under the read lock. See [`topological_sort`](crate::graph::topological_sort).
    pub fn topological_sort(&self) -> Result<Vec<K>, K> {
        let graph = self.read();
        topo::topological_sort(&graph)
    }
}

impl<K> Clone for SharedGraph<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> Default for SharedGraph<K> {
    fn default() -> Self {
        Self::new(Graph::new())
    }
}

impl<K> From<Graph<K>> for SharedGraph<K> {
    fn from(graph: Graph<K>) -> Self {
        Self::new(graph)
    }
}
