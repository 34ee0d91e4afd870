//! Directed network with arc attributes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{ArcKey, Capacity, NodeId, Position};
use crate::error::{InstanceError, Result};

/// Variable (per-unit) arc costs.
///
/// Costs are either shared by all commodities or priced per commodity,
/// indexed by commodity position and then by arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariableCost {
    Flat(BTreeMap<ArcKey, f64>),
    PerCommodity(Vec<BTreeMap<ArcKey, f64>>),
}

impl VariableCost {
    /// Cost of moving one unit of `commodity` over `arc`, if one is set.
    ///
    /// Flat costs ignore the commodity index.
    pub fn get(&self, arc: ArcKey, commodity: usize) -> Option<f64> {
        match self {
            VariableCost::Flat(costs) => costs.get(&arc).copied(),
            VariableCost::PerCommodity(costs) => {
                costs.get(commodity).and_then(|c| c.get(&arc)).copied()
            }
        }
    }

    /// Flat cost of `arc`. Always `None` for per-commodity pricing.
    pub fn flat(&self, arc: ArcKey) -> Option<f64> {
        match self {
            VariableCost::Flat(costs) => costs.get(&arc).copied(),
            VariableCost::PerCommodity(_) => None,
        }
    }

    /// Returns `true` for per-commodity pricing.
    pub fn is_per_commodity(&self) -> bool {
        matches!(self, VariableCost::PerCommodity(_))
    }

    /// Every arc that carries at least one cost entry.
    pub fn arcs(&self) -> BTreeSet<ArcKey> {
        match self {
            VariableCost::Flat(costs) => costs.keys().copied().collect(),
            VariableCost::PerCommodity(costs) => {
                costs.iter().flat_map(|c| c.keys().copied()).collect()
            }
        }
    }
}

impl Default for VariableCost {
    fn default() -> Self {
        VariableCost::Flat(BTreeMap::new())
    }
}

/// A directed network: arcs with transit times plus optional capacities,
/// fixed costs, variable costs, and node positions.
///
/// The set of arcs with a transit time defines connectivity. Every other
/// attribute map may only reference those arcs; missing entries fall back to
/// defaults (uncapacitated, fixed cost = transit time, variable cost = 0).
///
/// # Examples
///
/// ```
/// use u_netdesign::models::{ArcKey, Capacity, Network};
///
/// let network = Network::from_arcs([(1, 2, 5.0), (2, 3, 3.0)]).unwrap();
/// assert_eq!(network.transit_time(ArcKey::new(1, 2)).unwrap(), 5.0);
/// assert_eq!(network.capacity(ArcKey::new(1, 2)), Capacity::Uncapacitated);
/// assert_eq!(network.fixed_cost(ArcKey::new(2, 3)).unwrap(), 3.0);
/// assert_eq!(network.nodes().len(), 3);
/// assert!(network.transit_time(ArcKey::new(3, 1)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    transit: BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
    capacities: BTreeMap<ArcKey, f64>,
    fixed_costs: BTreeMap<ArcKey, f64>,
    variable_costs: VariableCost,
    positions: BTreeMap<NodeId, Position>,
}

impl Network {
    /// Creates a network from its attribute maps.
    ///
    /// Negative capacities mean "uncapacitated" and are dropped. Fails if a
    /// transit time is negative or not finite, or if any attribute map names
    /// an arc that has no transit time.
    pub fn new(
        transit: BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
        capacities: BTreeMap<ArcKey, f64>,
        fixed_costs: BTreeMap<ArcKey, f64>,
        variable_costs: VariableCost,
    ) -> Result<Self> {
        let network = Self {
            transit,
            capacities: capacities
                .into_iter()
                .filter(|(_, capacity)| *capacity >= 0.0)
                .collect(),
            fixed_costs,
            variable_costs,
            positions: BTreeMap::new(),
        };
        network.validate()?;
        Ok(network)
    }

    /// Creates a network carrying only transit times.
    pub fn from_transit_times(transit: BTreeMap<NodeId, BTreeMap<NodeId, f64>>) -> Result<Self> {
        Self::new(
            transit,
            BTreeMap::new(),
            BTreeMap::new(),
            VariableCost::default(),
        )
    }

    /// Creates a network from `(origin, destination, transit_time)` triples.
    pub fn from_arcs(arcs: impl IntoIterator<Item = (NodeId, NodeId, f64)>) -> Result<Self> {
        let mut transit: BTreeMap<NodeId, BTreeMap<NodeId, f64>> = BTreeMap::new();
        for (a, b, time) in arcs {
            transit.entry(a).or_default().insert(b, time);
        }
        Self::from_transit_times(transit)
    }

    /// Sets node positions.
    pub fn with_positions(mut self, positions: BTreeMap<NodeId, Position>) -> Self {
        self.positions = positions;
        self
    }

    fn validate(&self) -> Result<()> {
        for (arc, time) in self.arcs() {
            if !time.is_finite() || time < 0.0 {
                return Err(InstanceError::InvalidTransitTime { arc, time });
            }
        }

        let check = |kind: &'static str, arc: &ArcKey| {
            if self.has_arc(*arc) {
                Ok(())
            } else {
                Err(InstanceError::UnknownArc { kind, arc: *arc })
            }
        };

        for arc in self.capacities.keys() {
            check("capacity", arc)?;
        }
        for arc in self.fixed_costs.keys() {
            check("fixed cost", arc)?;
        }
        for arc in &self.variable_costs.arcs() {
            check("variable cost", arc)?;
        }
        Ok(())
    }

    /// Returns `true` if the arc has a transit time.
    pub fn has_arc(&self, arc: ArcKey) -> bool {
        self.transit
            .get(&arc.origin)
            .is_some_and(|d| d.contains_key(&arc.destination))
    }

    /// Transit time of an arc. There is no default travel time.
    pub fn transit_time(&self, arc: ArcKey) -> Result<f64> {
        self.transit
            .get(&arc.origin)
            .and_then(|d| d.get(&arc.destination))
            .copied()
            .ok_or(InstanceError::MissingArc(arc))
    }

    /// Capacity of an arc, `Uncapacitated` when none is set.
    pub fn capacity(&self, arc: ArcKey) -> Capacity {
        self.capacities
            .get(&arc)
            .map_or(Capacity::Uncapacitated, |&c| Capacity::Limited(c))
    }

    /// Fixed cost of an arc, defaulting to its transit time.
    pub fn fixed_cost(&self, arc: ArcKey) -> Result<f64> {
        match self.fixed_costs.get(&arc) {
            Some(&cost) => Ok(cost),
            None => self.transit_time(arc),
        }
    }

    /// Variable cost of moving `commodity` over `arc`, defaulting to 0.
    pub fn variable_cost(&self, arc: ArcKey, commodity: usize) -> f64 {
        self.variable_costs.get(arc, commodity).unwrap_or(0.0)
    }

    /// All nodes, derived as the union of arc endpoints.
    pub fn nodes(&self) -> BTreeSet<NodeId> {
        self.transit
            .iter()
            .flat_map(|(&a, destinations)| {
                std::iter::once(a).chain(destinations.keys().copied())
            })
            .collect()
    }

    /// All arcs with their transit times, ordered by origin then destination.
    pub fn arcs(&self) -> impl Iterator<Item = (ArcKey, f64)> + '_ {
        self.transit.iter().flat_map(|(&a, destinations)| {
            destinations
                .iter()
                .map(move |(&b, &time)| (ArcKey::new(a, b), time))
        })
    }

    /// Number of arcs.
    pub fn arc_count(&self) -> usize {
        self.transit.values().map(BTreeMap::len).sum()
    }

    /// Transit times keyed by origin, then destination.
    pub fn transit_times(&self) -> &BTreeMap<NodeId, BTreeMap<NodeId, f64>> {
        &self.transit
    }

    /// Explicit capacities; arcs without an entry are uncapacitated.
    pub fn capacities(&self) -> &BTreeMap<ArcKey, f64> {
        &self.capacities
    }

    /// Explicit fixed costs; arcs without an entry cost their transit time.
    pub fn fixed_costs(&self) -> &BTreeMap<ArcKey, f64> {
        &self.fixed_costs
    }

    /// Returns the variable cost table.
    pub fn variable_costs(&self) -> &VariableCost {
        &self.variable_costs
    }

    /// Known node positions.
    pub fn positions(&self) -> &BTreeMap<NodeId, Position> {
        &self.positions
    }

    /// Position of a node, if known.
    pub fn position(&self, node: NodeId) -> Option<Position> {
        self.positions.get(&node).copied()
    }

    /// A copy holding only the transit times.
    pub fn topology(&self) -> Network {
        Network {
            transit: self.transit.clone(),
            capacities: BTreeMap::new(),
            fixed_costs: BTreeMap::new(),
            variable_costs: VariableCost::default(),
            positions: BTreeMap::new(),
        }
    }

    pub(crate) fn transit_times_mut(&mut self) -> &mut BTreeMap<NodeId, BTreeMap<NodeId, f64>> {
        &mut self.transit
    }

    pub(crate) fn fixed_costs_mut(&mut self) -> &mut BTreeMap<ArcKey, f64> {
        &mut self.fixed_costs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_network() -> Network {
        Network::from_arcs([(1, 2, 5.0), (2, 3, 3.0), (1, 3, 9.0)]).expect("valid")
    }

    #[test]
    fn test_transit_time() {
        let n = sample_network();
        assert_eq!(n.transit_time(ArcKey::new(1, 2)).expect("arc"), 5.0);
        assert_eq!(n.arc_count(), 3);
    }

    #[test]
    fn test_missing_arc() {
        let n = sample_network();
        let err = n.transit_time(ArcKey::new(3, 1)).unwrap_err();
        assert!(matches!(err, InstanceError::MissingArc(arc) if arc == ArcKey::new(3, 1)));
    }

    #[test]
    fn test_defaults() {
        let n = sample_network();
        let arc = ArcKey::new(2, 3);
        assert_eq!(n.capacity(arc), Capacity::Uncapacitated);
        assert_eq!(n.fixed_cost(arc).expect("arc"), 3.0);
        assert_eq!(n.variable_cost(arc, 0), 0.0);
        assert!(n.fixed_cost(ArcKey::new(3, 2)).is_err());
    }

    #[test]
    fn test_explicit_attributes() {
        let arc = ArcKey::new(1, 2);
        let n = Network::new(
            sample_network().transit_times().clone(),
            BTreeMap::from([(arc, 4.0), (ArcKey::new(2, 3), -1.0)]),
            BTreeMap::from([(arc, 100.0)]),
            VariableCost::Flat(BTreeMap::from([(arc, 2.5)])),
        )
        .expect("valid");

        assert_eq!(n.capacity(arc), Capacity::Limited(4.0));
        assert_eq!(n.capacity(ArcKey::new(2, 3)), Capacity::Uncapacitated);
        assert!(!n.capacities().contains_key(&ArcKey::new(2, 3)));
        assert_eq!(n.fixed_cost(arc).expect("arc"), 100.0);
        assert_eq!(n.variable_cost(arc, 7), 2.5);
    }

    #[test]
    fn test_per_commodity_variable_cost() {
        let arc = ArcKey::new(1, 2);
        let costs = VariableCost::PerCommodity(vec![
            BTreeMap::from([(arc, 1.0)]),
            BTreeMap::from([(arc, 3.0)]),
        ]);
        let n = Network::new(
            sample_network().transit_times().clone(),
            BTreeMap::new(),
            BTreeMap::new(),
            costs,
        )
        .expect("valid");

        assert_eq!(n.variable_cost(arc, 0), 1.0);
        assert_eq!(n.variable_cost(arc, 1), 3.0);
        assert_eq!(n.variable_cost(arc, 2), 0.0);
        assert!(n.variable_costs().is_per_commodity());
        assert_eq!(n.variable_costs().flat(arc), None);
    }

    #[test]
    fn test_unknown_arc_rejected() {
        let err = Network::new(
            sample_network().transit_times().clone(),
            BTreeMap::new(),
            BTreeMap::from([(ArcKey::new(3, 1), 1.0)]),
            VariableCost::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            InstanceError::UnknownArc {
                kind: "fixed cost",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_transit_rejected() {
        let err = Network::from_arcs([(0, 1, -2.0)]).unwrap_err();
        assert!(matches!(err, InstanceError::InvalidTransitTime { .. }));
        assert!(Network::from_arcs([(0, 1, f64::NAN)]).is_err());
    }

    #[test]
    fn test_nodes_union_of_endpoints() {
        let n = Network::from_arcs([(5, 1, 1.0), (1, 9, 1.0)]).expect("valid");
        assert_eq!(n.nodes(), BTreeSet::from([1, 5, 9]));
    }

    #[test]
    fn test_arcs_ordered() {
        let n = sample_network();
        let arcs: Vec<ArcKey> = n.arcs().map(|(arc, _)| arc).collect();
        assert_eq!(
            arcs,
            vec![ArcKey::new(1, 2), ArcKey::new(1, 3), ArcKey::new(2, 3)]
        );
    }

    #[test]
    fn test_topology_drops_attributes() {
        let arc = ArcKey::new(1, 2);
        let n = Network::new(
            sample_network().transit_times().clone(),
            BTreeMap::from([(arc, 4.0)]),
            BTreeMap::from([(arc, 100.0)]),
            VariableCost::default(),
        )
        .expect("valid")
        .with_positions(BTreeMap::from([(1, Position::new(0.0, 1.0))]));

        let t = n.topology();
        assert_eq!(t.transit_times(), n.transit_times());
        assert!(t.capacities().is_empty());
        assert!(t.fixed_costs().is_empty());
        assert!(t.positions().is_empty());
    }
}
