//! TSP with time windows, read as a multi-commodity flow instance.
//!
//! The file holds the node count `n`, an `n × n` whitespace-separated
//! distance matrix, a depot line whose second token is the horizon `M`, and
//! one `earliest latest` window line per customer `1..n`.
//!
//! Each customer `i` becomes two commodities: a pickup `(i, earliest) →
//! (0, M)` and a delivery `(0, 0) → (i, latest)`, both with quantity
//! `1 / (n + 1)`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::record::{field, LineCursor};
use crate::error::{InstanceError, Result, Section};
use crate::models::{ArcKey, Commodity, Network, NetworkModel, NodeId, VariableCost};

/// Fixed cost put on zero-distance arcs so they are not free shortcuts.
pub const ZERO_DISTANCE_FIXED_COST: f64 = 1000.0;

const DEPOT: NodeId = 0;

/// Reads a TSP-with-time-windows file. See [`parse_tsp`].
pub fn read_tsp<P: AsRef<Path>>(path: P) -> Result<NetworkModel> {
    parse_tsp(&fs::read_to_string(path)?)
}

/// Parses a TSP-with-time-windows instance.
///
/// # Examples
///
/// ```
/// use u_netdesign::io::parse_tsp;
///
/// let text = "3\n0 4 5\n4 0 2\n5 2 0\n0 100\n10 20\n30 40\n";
/// let model = parse_tsp(text).unwrap();
/// assert_eq!(model.network().arc_count(), 6);
/// assert_eq!(model.num_commodities(), 4);
/// ```
pub fn parse_tsp(text: &str) -> Result<NetworkModel> {
    let mut cursor = LineCursor::new(text);

    let (line, header) = cursor
        .next_line()
        .ok_or(InstanceError::MissingSection(Section::TspMatrix))?;
    let n: usize = field(&tokens(header), 0, "node count", Section::TspMatrix, line)?;

    let mut transit: BTreeMap<NodeId, BTreeMap<NodeId, f64>> = BTreeMap::new();
    let mut fixed_costs = BTreeMap::new();
    for i in 0..n {
        let (line, row) = cursor.next_line().ok_or_else(|| {
            InstanceError::parse(
                Section::TspMatrix,
                cursor.line_number(),
                format!("expected {n} matrix rows, found {i}"),
            )
        })?;
        let row = tokens(row);
        let successors = transit.entry(i).or_default();
        for j in (0..n).filter(|&j| j != i) {
            let distance: f64 = field(&row, j, "distance", Section::TspMatrix, line)?;
            if distance == 0.0 {
                fixed_costs.insert(ArcKey::new(i, j), ZERO_DISTANCE_FIXED_COST);
            }
            successors.insert(j, distance);
        }
    }

    let (line, depot) = cursor
        .next_line()
        .ok_or(InstanceError::MissingSection(Section::TspWindows))?;
    let horizon: f64 = field(&tokens(depot), 1, "horizon", Section::TspWindows, line)?;

    let quantity = 1.0 / (n + 1) as f64;
    let mut commodities = Vec::with_capacity(2 * n.saturating_sub(1));
    for customer in 1..n {
        let (line, window) = cursor.next_line().ok_or_else(|| {
            InstanceError::parse(
                Section::TspWindows,
                cursor.line_number(),
                format!("missing time window for node {customer}"),
            )
        })?;
        let window = tokens(window);
        let earliest: f64 = field(&window, 0, "earliest time", Section::TspWindows, line)?;
        let latest: f64 = field(&window, 1, "latest time", Section::TspWindows, line)?;

        commodities.push(Commodity::new(customer, earliest, DEPOT, horizon, quantity));
        commodities.push(Commodity::new(DEPOT, 0.0, customer, latest, quantity));
    }

    let network = Network::new(transit, BTreeMap::new(), fixed_costs, VariableCost::default())?;
    debug!(nodes = n, commodities = commodities.len(), "read TSP instance");
    Ok(NetworkModel::new(network, commodities))
}

fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
