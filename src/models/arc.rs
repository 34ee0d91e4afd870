//! Node, arc, and capacity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Node identifier. Nodes have no attributes of their own; they exist as arc
/// endpoints.
pub type NodeId = usize;

/// A directed arc `origin → destination`.
///
/// # Examples
///
/// ```
/// use u_netdesign::models::ArcKey;
///
/// let arc = ArcKey::new(1, 2);
/// assert_eq!(arc.origin, 1);
/// assert_eq!(arc.destination, 2);
/// assert_eq!(arc.reversed(), ArcKey::new(2, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArcKey {
    pub origin: NodeId,
    pub destination: NodeId,
}

impl ArcKey {
    /// Creates the arc `origin → destination`.
    pub fn new(origin: NodeId, destination: NodeId) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// The arc in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self::new(self.destination, self.origin)
    }
}

impl From<(NodeId, NodeId)> for ArcKey {
    fn from((origin, destination): (NodeId, NodeId)) -> Self {
        Self::new(origin, destination)
    }
}

impl fmt::Display for ArcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.origin, self.destination)
    }
}

/// Capacity of an arc.
///
/// Instance files mark uncapacitated arcs with a negative value; those never
/// become `Limited`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Capacity {
    Uncapacitated,
    Limited(f64),
}

impl Capacity {
    /// Interprets a raw file value: negative means uncapacitated.
    pub fn from_raw(value: f64) -> Self {
        if value < 0.0 {
            Capacity::Uncapacitated
        } else {
            Capacity::Limited(value)
        }
    }

    /// Value written to instance files (`-1` when uncapacitated).
    pub fn to_raw(self) -> f64 {
        match self {
            Capacity::Uncapacitated => -1.0,
            Capacity::Limited(value) => value,
        }
    }

    /// Returns the limit, or `None` when uncapacitated.
    pub fn limit(self) -> Option<f64> {
        match self {
            Capacity::Uncapacitated => None,
            Capacity::Limited(value) => Some(value),
        }
    }

    /// Returns `true` if the arc has a finite capacity.
    pub fn is_limited(self) -> bool {
        matches!(self, Capacity::Limited(_))
    }
}

/// A 2D node position, only used for visualization and carried through file
/// round trips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_ordering() {
        let mut arcs = vec![ArcKey::new(2, 1), ArcKey::new(1, 3), ArcKey::new(1, 2)];
        arcs.sort();
        assert_eq!(
            arcs,
            vec![ArcKey::new(1, 2), ArcKey::new(1, 3), ArcKey::new(2, 1)]
        );
    }

    #[test]
    fn test_arc_from_tuple() {
        let arc: ArcKey = (4, 7).into();
        assert_eq!(arc, ArcKey::new(4, 7));
    }

    #[test]
    fn test_capacity_from_raw() {
        assert_eq!(Capacity::from_raw(-1.0), Capacity::Uncapacitated);
        assert_eq!(Capacity::from_raw(-0.5), Capacity::Uncapacitated);
        assert_eq!(Capacity::from_raw(0.0), Capacity::Limited(0.0));
        assert_eq!(Capacity::from_raw(12.5), Capacity::Limited(12.5));
    }

    #[test]
    fn test_capacity_to_raw() {
        assert_eq!(Capacity::Uncapacitated.to_raw(), -1.0);
        assert_eq!(Capacity::Limited(3.0).to_raw(), 3.0);
        assert_eq!(Capacity::Limited(3.0).limit(), Some(3.0));
        assert!(!Capacity::Uncapacitated.is_limited());
    }
}
