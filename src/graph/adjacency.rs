//! Index-based adjacency list.

use std::collections::BTreeMap;

use crate::models::{Network, NodeId};

/// A weighted edge to `to` (a dense node index).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub to: usize,
    pub weight: f64,
}

/// Read access to a directed weighted graph over dense node indices
/// `0..node_count()`.
pub trait Graph {
    fn node_count(&self) -> usize;

    /// Outgoing edges of `node`.
    fn out_edges(&self, node: usize) -> &[WeightedEdge];
}

/// Adjacency-list graph weighted by transit time, with a mapping between
/// network node ids and dense indices.
///
/// # Examples
///
/// ```
/// use u_netdesign::models::Network;
/// use u_netdesign::graph::{AdjacencyGraph, Graph};
///
/// let network = Network::from_arcs([(10, 20, 5.0), (20, 30, 3.0)]).unwrap();
/// let graph = AdjacencyGraph::from_network(&network);
///
/// assert_eq!(graph.node_count(), 3);
/// let (a, b) = (graph.index_of(10).unwrap(), graph.index_of(20).unwrap());
/// assert_eq!(graph.out_edges(a)[0].to, b);
/// assert_eq!(graph.out_edges(a)[0].weight, 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    nodes: Vec<NodeId>,
    index: BTreeMap<NodeId, usize>,
    adj: Vec<Vec<WeightedEdge>>,
}

impl AdjacencyGraph {
    /// Builds the graph from the network's transit times.
    pub fn from_network(network: &Network) -> Self {
        let nodes: Vec<NodeId> = network.nodes().into_iter().collect();
        let index: BTreeMap<NodeId, usize> =
            nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();

        let mut adj = vec![Vec::new(); nodes.len()];
        for (arc, time) in network.arcs() {
            adj[index[&arc.origin]].push(WeightedEdge {
                to: index[&arc.destination],
                weight: time,
            });
        }

        Self { nodes, index, adj }
    }

    /// Dense index of a network node.
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.index.get(&node).copied()
    }

    /// Network nodes in index order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}

impl Graph for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn out_edges(&self, node: usize) -> &[WeightedEdge] {
        &self.adj[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_network() {
        let network = Network::from_arcs([(1, 2, 5.0), (2, 3, 3.0), (1, 3, 9.0)]).expect("valid");
        let g = AdjacencyGraph::from_network(&network);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.nodes(), &[1, 2, 3]);
        assert_eq!(g.out_edges(0).len(), 2);
        assert!(g.out_edges(2).is_empty());
        assert_eq!(
            g.out_edges(0)[1],
            WeightedEdge {
                to: 2,
                weight: 9.0
            }
        );
    }

    #[test]
    fn test_sparse_ids() {
        let network = Network::from_arcs([(100, 7, 1.0)]).expect("valid");
        let g = AdjacencyGraph::from_network(&network);
        assert_eq!(g.index_of(7), Some(0));
        assert_eq!(g.index_of(100), Some(1));
        assert_eq!(g.index_of(8), None);
        assert_eq!(g.nodes()[1], 100);
    }
}
