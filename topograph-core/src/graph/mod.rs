//! Directed Graph
//!
//! This module implements the graph store and the topological sorter that
//! reads it.
//!
//! # Overview
//!
//! - Vertices live in an arena owned by [`Graph`], indexed by the caller's key
//! - Edges are directed and weighted, stored on the source vertex as an
//!   ordered map from the target's [`VertexId`] to its [`Weight`]
//! - [`topological_sort`] orders the keys so every edge points forward, or
//!   reports the vertices trapped on cycles
//!
//! # Design Decisions
//!
//! 1. Edges hold arena ids rather than references, so a cyclic graph never
//!    becomes a cyclic ownership structure.
//!
//! 2. Both the vertex set and each neighbour map preserve insertion order.
//!    Sorting the same construction sequence always yields the same output.
//!
//! 3. The graph only grows. The one exception is overwriting a vertex with
//!    `add_vertex`, which clears its edges in place and keeps its id.

mod shared;
mod store;
mod topo;
mod vertex;

pub use shared::SharedGraph;
pub use store::{Graph, Vertices};
pub use topo::{in_degrees, topological_sort};
pub use vertex::{Vertex, VertexId, Weight};
