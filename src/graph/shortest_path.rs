//! Dijkstra and all-pairs shortest-path distances.
//!
//! Weights are transit times, which the network guarantees to be finite and
//! non-negative.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use super::{DistanceMatrix, Graph};

#[derive(Debug, Clone, Copy)]
struct HeapItem {
    node: usize,
    distance: f64,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip distance to make this a min-heap
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Single-source shortest-path distances from `source`.
///
/// Unreachable nodes get `f64::INFINITY`.
///
/// # Examples
///
/// ```
/// use u_netdesign::models::Network;
/// use u_netdesign::graph::{dijkstra, AdjacencyGraph};
///
/// let network = Network::from_arcs([(0, 1, 5.0), (1, 2, 3.0), (0, 2, 10.0)]).unwrap();
/// let graph = AdjacencyGraph::from_network(&network);
/// assert_eq!(dijkstra(&graph, 0), vec![0.0, 5.0, 8.0]);
/// ```
pub fn dijkstra<G: Graph + ?Sized>(graph: &G, source: usize) -> Vec<f64> {
    let n = graph.node_count();
    let mut distances = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    distances[source] = 0.0;
    heap.push(HeapItem {
        node: source,
        distance: 0.0,
    });

    while let Some(HeapItem { node, distance }) = heap.pop() {
        if settled[node] {
            continue;
        }
        settled[node] = true;

        for edge in graph.out_edges(node) {
            let candidate = distance + edge.weight;
            if candidate < distances[edge.to] {
                distances[edge.to] = candidate;
                heap.push(HeapItem {
                    node: edge.to,
                    distance: candidate,
                });
            }
        }
    }

    distances
}

/// Shortest-path distances between every ordered pair of nodes.
///
/// Runs [`dijkstra`] once per source: O(n · (m + n) log n).
pub fn all_pairs_shortest_paths<G: Graph + ?Sized>(graph: &G) -> DistanceMatrix {
    let n = graph.node_count();
    let mut matrix = DistanceMatrix::new(n);
    for source in 0..n {
        matrix.set_row(source, &dijkstra(graph, source));
    }
    debug!(nodes = n, "computed all-pairs shortest paths");
    matrix
}
