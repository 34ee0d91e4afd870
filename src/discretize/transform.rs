//! Transforms over a whole instance.
//!
//! Every transform consumes the instance and returns the transformed one, so
//! pipelines chain with `?` and callers `clone()` when they need the input
//! afterwards.

use std::collections::BTreeMap;

use tracing::debug;

use super::RoundingPolicy;
use crate::error::{InstanceError, Result};
use crate::models::{ArcKey, NetworkModel};

/// Multiplies every commodity time and transit time by `factor`, rounding up.
///
/// Release times and deadlines are both rounded up, so a short window can
/// become empty when `factor` is not an integer. That artifact is left as is.
///
/// # Examples
///
/// ```
/// use u_netdesign::models::{ArcKey, Commodity, Network, NetworkModel};
/// use u_netdesign::discretize::scale;
///
/// let network = Network::from_arcs([(1, 2, 2.5)]).unwrap();
/// let model = NetworkModel::new(network, vec![Commodity::new(1, 0.5, 2, 7.0, 1.0)]);
///
/// let scaled = scale(model, 2.0).unwrap();
/// assert_eq!(scaled.transit_time(ArcKey::new(1, 2)).unwrap(), 5.0);
/// assert_eq!(scaled.commodities()[0].release_time, 1.0);
/// assert_eq!(scaled.commodities()[0].deadline, 14.0);
/// ```
pub fn scale(mut model: NetworkModel, factor: f64) -> Result<NetworkModel> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(InstanceError::InvalidScaleFactor(factor));
    }

    let (network, commodities) = model.parts_mut();

    for c in commodities.iter_mut() {
        c.release_time = (c.release_time * factor).ceil();
        c.deadline = (c.deadline * factor).ceil();
    }

    for destinations in network.transit_times_mut().values_mut() {
        for time in destinations.values_mut() {
            *time = (*time * factor).ceil();
        }
    }

    debug!(
        factor,
        commodities = commodities.len(),
        arcs = network.arc_count(),
        "scaled time horizon"
    );
    Ok(model)
}

/// Divides every commodity time and transit time by `granularity` and rounds
/// according to `policy`.
///
/// If the network has no fixed costs yet, the transit times before rounding
/// are copied into the fixed-cost map first, so cost accounting keeps using
/// the true travel times. The emptiness of the fixed-cost map is the only
/// guard: a second call never overwrites them.
///
/// # Examples
///
/// ```
/// use u_netdesign::models::{ArcKey, Commodity, Network, NetworkModel};
/// use u_netdesign::discretize::{round, RoundingPolicy};
///
/// let network = Network::from_arcs([(1, 2, 5.0), (2, 3, 3.0)]).unwrap();
/// let model = NetworkModel::new(network, vec![Commodity::new(1, 0.0, 3, 20.0, 1.5)]);
///
/// let coarse = round(model, 2.0, RoundingPolicy::Pessimistic).unwrap();
/// assert_eq!(coarse.transit_time(ArcKey::new(1, 2)).unwrap(), 3.0);
/// assert_eq!(coarse.fixed_cost(ArcKey::new(1, 2)).unwrap(), 5.0);
/// assert_eq!(coarse.commodities()[0].deadline, 10.0);
/// ```
pub fn round(
    mut model: NetworkModel,
    granularity: f64,
    policy: RoundingPolicy,
) -> Result<NetworkModel> {
    if !granularity.is_finite() || granularity <= 0.0 {
        return Err(InstanceError::InvalidGranularity(granularity));
    }

    let (network, commodities) = model.parts_mut();
    let preserve_costs = network.fixed_costs().is_empty();

    for c in commodities.iter_mut() {
        c.release_time = policy.release(c.release_time / granularity);
        c.deadline = policy.deadline(c.deadline / granularity);
    }

    let mut original = BTreeMap::new();
    for (&a, destinations) in network.transit_times_mut().iter_mut() {
        for (&b, time) in destinations.iter_mut() {
            if preserve_costs {
                original.insert(ArcKey::new(a, b), *time);
            }
            *time = policy.transit(*time / granularity);
        }
    }

    if preserve_costs {
        *network.fixed_costs_mut() = original;
    }

    debug!(
        ?policy,
        granularity,
        commodities = commodities.len(),
        arcs = network.arc_count(),
        preserve_costs,
        "rounded time horizon"
    );
    Ok(model)
}

/// [`round`] with [`RoundingPolicy::Pessimistic`]: windows only shrink.
pub fn pessimistic_round(model: NetworkModel, granularity: f64) -> Result<NetworkModel> {
    round(model, granularity, RoundingPolicy::Pessimistic)
}

/// [`round`] with [`RoundingPolicy::Optimistic`]: windows only widen.
pub fn optimistic_round(model: NetworkModel, granularity: f64) -> Result<NetworkModel> {
    round(model, granularity, RoundingPolicy::Optimistic)
}

/// [`round`] with [`RoundingPolicy::Simple`].
pub fn simple_round(model: NetworkModel, granularity: f64) -> Result<NetworkModel> {
    round(model, granularity, RoundingPolicy::Simple)
}

impl NetworkModel {
    /// Fluent form of [`scale`].
    pub fn scale(self, factor: f64) -> Result<Self> {
        scale(self, factor)
    }

    /// Fluent form of [`pessimistic_round`].
    pub fn pessimistic_round(self, granularity: f64) -> Result<Self> {
        pessimistic_round(self, granularity)
    }

    /// Fluent form of [`optimistic_round`].
    pub fn optimistic_round(self, granularity: f64) -> Result<Self> {
        optimistic_round(self, granularity)
    }

    /// Fluent form of [`simple_round`].
    pub fn simple_round(self, granularity: f64) -> Result<Self> {
        simple_round(self, granularity)
    }
}
