//! Rounding policies for coarsening time values.

use serde::{Deserialize, Serialize};

/// How release times, deadlines, and transit times are rounded onto a
/// coarser grid.
///
/// | policy      | release | deadline | transit |
/// |-------------|---------|----------|---------|
/// | Pessimistic | up      | down     | up      |
/// | Optimistic  | down    | up       | down    |
/// | Simple      | nearest | nearest  | nearest |
///
/// Nearest rounding sends ties away from zero.
///
/// # Examples
///
/// ```
/// use u_netdesign::discretize::RoundingPolicy;
///
/// assert_eq!(RoundingPolicy::Pessimistic.release(2.5), 3.0);
/// assert_eq!(RoundingPolicy::Pessimistic.deadline(2.5), 2.0);
/// assert_eq!(RoundingPolicy::Optimistic.transit(2.5), 2.0);
/// assert_eq!(RoundingPolicy::Simple.transit(2.5), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingPolicy {
    Pessimistic,
    Optimistic,
    Simple,
}

impl RoundingPolicy {
    /// Rounds a release time already divided by the granularity.
    pub fn release(self, time: f64) -> f64 {
        match self {
            RoundingPolicy::Pessimistic => time.ceil(),
            RoundingPolicy::Optimistic => time.floor(),
            RoundingPolicy::Simple => time.round(),
        }
    }

    /// Rounds a deadline already divided by the granularity.
    pub fn deadline(self, time: f64) -> f64 {
        match self {
            RoundingPolicy::Pessimistic => time.floor(),
            RoundingPolicy::Optimistic => time.ceil(),
            RoundingPolicy::Simple => time.round(),
        }
    }

    /// Rounds a transit time already divided by the granularity.
    pub fn transit(self, time: f64) -> f64 {
        match self {
            RoundingPolicy::Pessimistic => time.ceil(),
            RoundingPolicy::Optimistic => time.floor(),
            RoundingPolicy::Simple => time.round(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_unchanged() {
        for policy in [
            RoundingPolicy::Pessimistic,
            RoundingPolicy::Optimistic,
            RoundingPolicy::Simple,
        ] {
            assert_eq!(policy.release(4.0), 4.0);
            assert_eq!(policy.deadline(4.0), 4.0);
            assert_eq!(policy.transit(4.0), 4.0);
        }
    }

    #[test]
    fn test_pessimistic_shrinks() {
        let p = RoundingPolicy::Pessimistic;
        assert_eq!(p.release(0.1), 1.0);
        assert_eq!(p.deadline(9.9), 9.0);
        assert_eq!(p.transit(0.1), 1.0);
    }

    #[test]
    fn test_optimistic_widens() {
        let p = RoundingPolicy::Optimistic;
        assert_eq!(p.release(0.9), 0.0);
        assert_eq!(p.deadline(9.1), 10.0);
        assert_eq!(p.transit(0.9), 0.0);
    }

    #[test]
    fn test_simple_ties_away_from_zero() {
        let p = RoundingPolicy::Simple;
        assert_eq!(p.release(0.5), 1.0);
        assert_eq!(p.deadline(1.5), 2.0);
        assert_eq!(p.transit(1.49), 1.0);
    }
}
