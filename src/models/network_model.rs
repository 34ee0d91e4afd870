//! Network plus commodities: one problem instance.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ArcKey, Capacity, Commodity, Network, NodeId, Solution};
use crate::error::Result;

/// A problem instance: a [`Network`], the commodities routed through it, and
/// optionally a solution and fixed commodity paths loaded from file.
///
/// Instances are owned by one pipeline stage at a time. Transforms in
/// [`discretize`](crate::discretize) consume the instance and hand back the
/// transformed one.
///
/// # Examples
///
/// ```
/// use u_netdesign::models::{ArcKey, Commodity, Network, NetworkModel};
///
/// let network = Network::from_arcs([(1, 2, 5.0), (2, 3, 3.0)]).unwrap();
/// let model = NetworkModel::new(network, vec![Commodity::new(1, 0.0, 3, 20.0, 1.5)]);
///
/// assert_eq!(model.num_commodities(), 1);
/// assert_eq!(model.horizon(), 20.0);
/// assert_eq!(model.transit_time(ArcKey::new(2, 3)).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkModel {
    network: Network,
    commodities: Vec<Commodity>,
    solution: Option<Solution>,
    fixed_paths: Option<Vec<Vec<ArcKey>>>,
}

impl NetworkModel {
    /// Creates an instance without solution or fixed paths.
    pub fn new(network: Network, commodities: Vec<Commodity>) -> Self {
        Self {
            network,
            commodities,
            solution: None,
            fixed_paths: None,
        }
    }

    /// Attaches a solution for round-tripping through instance files.
    pub fn with_solution(mut self, solution: Solution) -> Self {
        self.solution = Some(solution);
        self
    }

    /// Attaches a fixed arc path per commodity.
    pub fn with_fixed_paths(mut self, paths: Vec<Vec<ArcKey>>) -> Self {
        self.fixed_paths = Some(paths);
        self
    }

    /// Returns the underlying network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Returns the commodities in index order.
    pub fn commodities(&self) -> &[Commodity] {
        &self.commodities
    }

    /// Returns the number of commodities.
    pub fn num_commodities(&self) -> usize {
        self.commodities.len()
    }

    /// Returns the attached solution, if any.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Returns the fixed arc paths, one per commodity, if any.
    pub fn fixed_paths(&self) -> Option<&[Vec<ArcKey>]> {
        self.fixed_paths.as_deref()
    }

    /// See [`Network::transit_time`].
    pub fn transit_time(&self, arc: ArcKey) -> Result<f64> {
        self.network.transit_time(arc)
    }

    /// See [`Network::capacity`].
    pub fn capacity(&self, arc: ArcKey) -> Capacity {
        self.network.capacity(arc)
    }

    /// See [`Network::fixed_cost`].
    pub fn fixed_cost(&self, arc: ArcKey) -> Result<f64> {
        self.network.fixed_cost(arc)
    }

    /// See [`Network::variable_cost`].
    pub fn variable_cost(&self, arc: ArcKey, commodity: usize) -> f64 {
        self.network.variable_cost(arc, commodity)
    }

    /// See [`Network::nodes`].
    pub fn nodes(&self) -> BTreeSet<NodeId> {
        self.network.nodes()
    }

    /// Latest deadline minus earliest release, 0 without commodities.
    pub fn horizon(&self) -> f64 {
        let latest = self
            .commodities
            .iter()
            .map(|c| c.deadline)
            .fold(f64::NEG_INFINITY, f64::max);
        let earliest = self
            .commodities
            .iter()
            .map(|c| c.release_time)
            .fold(f64::INFINITY, f64::min);

        if self.commodities.is_empty() {
            0.0
        } else {
            latest - earliest
        }
    }

    /// Indices of commodities whose release time is after their deadline.
    pub fn window_violations(&self) -> Vec<usize> {
        self.commodities
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.has_valid_window())
            .map(|(k, _)| k)
            .collect()
    }

    /// Splits the instance into network and commodities, dropping attachments.
    pub fn into_parts(self) -> (Network, Vec<Commodity>) {
        (self.network, self.commodities)
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Network, &mut Vec<Commodity>) {
        (&mut self.network, &mut self.commodities)
    }
}
