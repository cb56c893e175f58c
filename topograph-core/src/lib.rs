//! Topograph Core
//!
//! This crate provides a small directed-graph store and a topological sorter.
//! It implements:
//!
//! - An arena-backed graph with weighted, directed edges
//! - Kahn's algorithm for topological ordering with cycle detection
//! - A lock-wrapped handle for sharing one graph between threads
//!
//! # Architecture
//!
//! - `graph`: vertices, the graph store, the sorter, and the shared handle
//! - `config`: per-graph settings such as the duplicate-vertex policy
//! - `error`: the crate-wide error type
//!
//! # Example
//!
//! ```rust
//! use topograph_core::graph::{topological_sort, Graph};
//! use topograph_core::GraphError;
//!
//! let mut graph = Graph::new();
//! graph.add_edge("A", "C");
//! graph.add_edge("B", "C");
//! graph.add_edge("C", "D");
//!
//! assert_eq!(topological_sort(&graph).unwrap(), vec!["A", "B", "C", "D"]);
//!
//! graph.add_edge("D", "A");
//! assert!(matches!(
//!     topological_sort(&graph),
//!     Err(GraphError::CycleDetected { .. })
//! ));
//! ```

pub mod config;
pub mod error;
pub mod graph;

pub use config::{DuplicateVertexPolicy, GraphConfig};
pub use error::{GraphError, Result};
pub use graph::{topological_sort, Graph, SharedGraph, Vertex, VertexId, Weight};
