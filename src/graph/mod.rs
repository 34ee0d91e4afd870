//! Graph view of a network and shortest-path distances.
//!
//! [`AdjacencyGraph`] is built on demand from a [`Network`](crate::models::Network)
//! and never cached inside it. Algorithms only depend on the [`Graph`] trait.

mod adjacency;
mod matrix;
mod shortest_path;

pub use adjacency::{AdjacencyGraph, Graph, WeightedEdge};
pub use matrix::DistanceMatrix;
pub use shortest_path::{all_pairs_shortest_paths, dijkstra};
