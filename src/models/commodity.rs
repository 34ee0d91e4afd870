//! Commodity type.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A unit of demand to be routed from `origin` to `destination`.
///
/// It becomes available at `origin` at `release_time` and must arrive at
/// `destination` by `deadline`. Windows are not validated on construction;
/// see [`NetworkModel::window_violations`](super::NetworkModel::window_violations).
///
/// # Examples
///
/// ```
/// use u_netdesign::models::Commodity;
///
/// let c = Commodity::new(1, 0.0, 3, 20.0, 1.5);
/// assert_eq!(c.window(), 20.0);
/// assert!(c.has_valid_window());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commodity {
    pub origin: NodeId,
    pub release_time: f64,
    pub destination: NodeId,
    pub deadline: f64,
    pub quantity: f64,
}

impl Commodity {
    /// Creates a commodity.
    pub fn new(
        origin: NodeId,
        release_time: f64,
        destination: NodeId,
        deadline: f64,
        quantity: f64,
    ) -> Self {
        Self {
            origin,
            release_time,
            destination,
            deadline,
            quantity,
        }
    }

    /// Width of the time window (`deadline - release_time`). Negative when
    /// the window is inverted.
    pub fn window(&self) -> f64 {
        self.deadline - self.release_time
    }

    /// Returns `true` if `release_time <= deadline`.
    pub fn has_valid_window(&self) -> bool {
        self.release_time <= self.deadline
    }
}
