//! Topological Sort
//!
//! Kahn's algorithm over a graph snapshot:
//!
//! 1. Count incoming edges for every vertex
//! 2. Seed a FIFO queue with the zero in-degree vertices, in graph order
//! 3. Pop a vertex, emit its key, and decrement each neighbour's count;
//!    neighbours that reach zero join the back of the queue
//! 4. If fewer vertices were emitted than exist, the rest sit on a cycle
//!
//! Ties are broken by queue order, so the output is deterministic for a given
//! construction order but is only one of possibly many valid orderings.
//! Runs in O(V + E) time with O(V) auxiliary space.

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::store::Graph;
use super::vertex::{Vertex, VertexId};
use crate::error::{GraphError, Result};

/// Order the keys of `graph` so that for every edge `u -> v`, `u` comes first.
///
/// Fails with [`GraphError::CycleDetected`], listing the vertices that could
/// not be placed, when the graph is not acyclic. A self-loop counts as a
/// cycle. The graph is never modified.
pub fn topological_sort<K: Clone>(graph: &Graph<K>) -> Result<Vec<K>, K> {
    let mut in_degree = in_degrees(graph);
    let mut queue: VecDeque<VertexId> = graph
        .iter()
        .filter(|vertex| in_degree[vertex.id().index()] == 0)
        .map(Vertex::id)
        .collect();
    let mut order = Vec::with_capacity(graph.vertex_count());

    while let Some(id) = queue.pop_front() {
        let Some(vertex) = graph.get_vertex_by_id(id) else {
            continue;
        };
        order.push(vertex.key().clone());

        for neighbour in vertex.get_connections() {
            if let Some(degree) = in_degree.get_mut(neighbour.index()) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    queue.push_back(neighbour);
                }
            }
        }
    }

    if order.len() != graph.vertex_count() {
        let unsorted: Vec<K> = graph
            .iter()
            .filter(|vertex| in_degree[vertex.id().index()] > 0)
            .map(|vertex| vertex.key().clone())
            .collect();
        warn!(
            sorted = order.len(),
            unsorted = unsorted.len(),
            "cycle detected during topological sort"
        );
        return Err(GraphError::CycleDetected { unsorted });
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "topological sort complete"
    );
    Ok(order)
}

/// Count incoming edges per vertex.
///
/// The returned vector is indexed by [`VertexId::index`]. Parallel edges cannot
/// exist, so each entry is the number of distinct predecessors.
pub fn in_degrees<K>(graph: &Graph<K>) -> Vec<usize> {
    let mut in_degree = vec![0; graph.vertex_count()];
    for vertex in graph {
        for neighbour in vertex.get_connections() {
            if let Some(degree) = in_degree.get_mut(neighbour.index()) {
                *degree += 1;
            }
        }
    }
    in_degree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position<K: PartialEq>(order: &[K], key: K) -> usize {
        order.iter().position(|k| *k == key).unwrap()
    }

    #[test]
    fn empty_graph_sorts_to_nothing() {
        let graph: Graph<&str> = Graph::new();
        assert_eq!(topological_sort(&graph), Ok(vec![]));
    }

    #[test]
    fn chain_sorts_in_order() {
        let mut graph = Graph::new();
        graph.add_edge(3, 2);
        graph.add_edge(2, 1);
        graph.add_edge(1, 0);

        assert_eq!(topological_sort(&graph), Ok(vec![3, 2, 1, 0]));
    }

    #[test]
    fn ties_follow_insertion_order() {
        let mut graph = Graph::new();
        graph.add_edge("a", "c");
        graph.add_edge("b", "c");
        graph.add_edge("c", "d");

        assert_eq!(topological_sort(&graph), Ok(vec!["a", "b", "c", "d"]));
    }

    #[test]
    fn diamond_respects_every_edge() {
        let mut graph = Graph::new();
        graph.add_edge("top", "left");
        graph.add_edge("top", "right");
        graph.add_edge("left", "bottom");
        graph.add_edge("right", "bottom");

        let order = topological_sort(&graph).unwrap();
        assert_eq!(order.len(), 4);
        assert!(position(&order, "top") < position(&order, "left"));
        assert!(position(&order, "top") < position(&order, "right"));
        assert!(position(&order, "left") < position(&order, "bottom"));
        assert!(position(&order, "right") < position(&order, "bottom"));
    }

    #[test]
    fn disconnected_components_are_all_included() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b");
        graph.add_vertex("lonely").unwrap();
        graph.add_edge("x", "y");

        assert_eq!(
            topological_sort(&graph),
            Ok(vec!["a", "lonely", "x", "b", "y"])
        );
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let mut graph = Graph::new();
        graph.add_edge("x", "x");

        assert_eq!(
            topological_sort(&graph),
            Err(GraphError::CycleDetected {
                unsorted: vec!["x"]
            })
        );
    }

    #[test]
    fn cycle_reports_only_stuck_vertices() {
        let mut graph = Graph::new();
        graph.add_edge("root", "a");
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("c", "a");
        graph.add_edge("c", "tail");

        assert_eq!(
            topological_sort(&graph),
            Err(GraphError::CycleDetected {
                unsorted: vec!["a", "b", "c", "tail"]
            })
        );
    }

    #[test]
    fn weights_do_not_affect_order() {
        let mut graph = Graph::new();
        graph.add_weighted_edge("a", "b", -10);
        graph.add_weighted_edge("a", "c", 100);

        assert_eq!(graph.topological_sort(), Ok(vec!["a", "b", "c"]));
    }

    #[test]
    fn in_degrees_count_predecessors() {
        let mut graph = Graph::new();
        graph.add_edge("a", "c");
        graph.add_edge("b", "c");
        graph.add_edge("c", "c");

        // Vertex order is a, c, b.
        assert_eq!(in_degrees(&graph), vec![0, 3, 0]);
    }
}
