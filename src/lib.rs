//! # u-netdesign
//!
//! Instance library for time-windowed service network design: directed
//! networks with transit times, capacities, and costs carrying commodities
//! that must move between an origin and a destination inside a time window.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (ArcKey, Commodity, Network, NetworkModel, Solution)
//! - [`graph`] — Adjacency view of a network and shortest-path distances
//! - [`discretize`] — Time rescaling and coarsening (pessimistic, optimistic, simple)
//! - [`generator`] — Random commodity sets with shortest-path feasible windows
//! - [`io`] — Sectioned CSV, directory CSV, and TSP-TW instance readers/writers
//! - [`error`] — Error type shared by all fallible operations
//!
//! ## Example
//!
//! ```
//! use u_netdesign::models::{ArcKey, Commodity, Network, NetworkModel};
//!
//! let network = Network::from_arcs([(1, 2, 5.0), (2, 3, 3.0)]).unwrap();
//! let model = NetworkModel::new(network, vec![Commodity::new(1, 0.0, 3, 20.0, 1.5)])
//!     .pessimistic_round(2.0)
//!     .unwrap();
//!
//! assert_eq!(model.transit_time(ArcKey::new(1, 2)).unwrap(), 3.0);
//! assert_eq!(model.fixed_cost(ArcKey::new(1, 2)).unwrap(), 5.0);
//! assert_eq!(model.commodities()[0].deadline, 10.0);
//! ```

pub mod discretize;
pub mod error;
pub mod generator;
pub mod graph;
pub mod io;
pub mod models;

pub use error::{InstanceError, Result};
