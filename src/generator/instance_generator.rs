//! Shortest-path driven commodity sampling.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::GeneratorConfig;
use crate::error::{InstanceError, Result};
use crate::graph::{all_pairs_shortest_paths, AdjacencyGraph, DistanceMatrix, Graph};
use crate::models::{Commodity, Network, NetworkModel, NodeId};

const MIN_QUANTITY: f64 = 0.01;

/// Generates random commodity sets over a network.
///
/// # Examples
///
/// ```
/// use u_netdesign::models::Network;
/// use u_netdesign::generator::{GeneratorConfig, InstanceGenerator};
///
/// let network = Network::from_arcs([(0, 1, 2.0), (1, 2, 3.0), (2, 0, 4.0)]).unwrap();
/// let mut generator = InstanceGenerator::seeded(GeneratorConfig::default().with_commodity_count(4), 7);
///
/// let model = generator.random_problem(&network).unwrap();
/// assert_eq!(model.num_commodities(), 4);
/// assert!(model.commodities().iter().all(|c| c.origin != c.destination));
/// ```
pub struct InstanceGenerator<R: Rng> {
    config: GeneratorConfig,
    rng: R,
}

impl InstanceGenerator<StdRng> {
    /// Creates a reproducible generator from a seed.
    pub fn seeded(config: GeneratorConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> InstanceGenerator<R> {
    /// Creates a generator drawing from `rng`.
    pub fn new(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Returns the generator configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds a fresh instance over the transit times of `network`.
    ///
    /// Capacities, costs, and positions of `network` are not carried over.
    pub fn random_problem(&mut self, network: &Network) -> Result<NetworkModel> {
        let commodities = self.generate_commodities(network)?;
        Ok(NetworkModel::new(network.topology(), commodities))
    }

    /// Regenerates the commodities of an existing instance, keeping its node
    /// positions.
    pub fn randomize(&mut self, model: &NetworkModel) -> Result<NetworkModel> {
        let network = model.network();
        let commodities = self.generate_commodities(network)?;
        Ok(NetworkModel::new(
            network.topology().with_positions(network.positions().clone()),
            commodities,
        ))
    }

    fn generate_commodities(&mut self, network: &Network) -> Result<Vec<Commodity>> {
        self.config.validate()?;
        let config = &self.config;
        let rng = &mut self.rng;

        let count = match config.commodity_count {
            Some(count) => count,
            None => {
                let (lower, upper) = config.commodity_range;
                upper - rng.random_range(lower..upper)
            }
        };

        let graph = AdjacencyGraph::from_network(network);
        let distances = all_pairs_shortest_paths(&graph);

        let origins = if config.origins.is_empty() {
            graph.nodes()
        } else {
            config.origins.as_slice()
        };
        let destinations = if config.destinations.is_empty() {
            graph.nodes()
        } else {
            config.destinations.as_slice()
        };

        let mut commodities = Vec::with_capacity(count);
        for k in 0..count {
            let (origin, destination, distance) = sample_pair(
                &mut *rng,
                &graph,
                &distances,
                origins,
                destinations,
                config.max_attempts,
            )
            .ok_or(InstanceError::UnreachablePair {
                commodity: k,
                attempts: config.max_attempts,
            })?;

            let (start_lower, start_upper) = config.start_range;
            let release_time = rng.random_range(start_lower..start_upper) as f64;

            let scope = match config.scope {
                Some(scope) => scope,
                None => {
                    let (lower, upper) = config.scope_range;
                    rng.random_range(lower..=upper)
                }
            };
            let deadline = release_time + window_length(distance, scope);

            let (q_lower, q_upper) = config.quantity_range;
            let quantity = round_to_cents(q_upper - rng.random_range(q_lower..=q_upper));

            commodities.push(Commodity::new(
                origin,
                release_time,
                destination,
                deadline,
                quantity.max(MIN_QUANTITY),
            ));
        }

        info!(
            commodities = commodities.len(),
            nodes = graph.node_count(),
            "generated random commodities"
        );
        Ok(commodities)
    }
}

/// Draws origin/destination pairs until they differ and the destination is
/// reachable, giving up after `max_attempts` draws.
fn sample_pair<R: Rng + ?Sized>(
    rng: &mut R,
    graph: &AdjacencyGraph,
    distances: &DistanceMatrix,
    origins: &[NodeId],
    destinations: &[NodeId],
    max_attempts: usize,
) -> Option<(NodeId, NodeId, f64)> {
    for attempt in 0..max_attempts {
        let (&origin, &destination) = (origins.choose(rng)?, destinations.choose(rng)?);
        if origin == destination {
            continue;
        }

        let (Some(i), Some(j)) = (graph.index_of(origin), graph.index_of(destination)) else {
            continue;
        };

        if distances.is_reachable(i, j) {
            if attempt > 0 {
                debug!(attempt, origin, destination, "resampled origin/destination");
            }
            return Some((origin, destination, distances.get(i, j)));
        }
    }
    None
}

/// `round(distance * scope)`, but never shorter than the shortest path when
/// `scope >= 1`, which fractional transit times could otherwise cause.
fn window_length(distance: f64, scope: f64) -> f64 {
    let window = (distance * scope).round();
    if scope >= 1.0 {
        window.max(distance.ceil())
    } else {
        window
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
