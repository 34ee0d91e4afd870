//! Domain model types for time-windowed service network design instances.
//!
//! Provides the directed network with per-arc transit times, capacities and
//! costs, the commodities routed through it, and the optional solution that
//! instance files can carry along.

mod arc;
mod commodity;
mod network;
mod network_model;
mod solution;

pub use arc::{ArcKey, Capacity, NodeId, Position};
pub use commodity::Commodity;
pub use network::{Network, VariableCost};
pub use network_model::NetworkModel;
pub use solution::{Consolidation, Solution};
