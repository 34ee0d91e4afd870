//! Generator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{InstanceError, Result};
use crate::models::NodeId;

/// Parameters for [`InstanceGenerator`](super::InstanceGenerator).
///
/// Ranges are `(lower, upper)` pairs:
///
/// - `commodity_range`: count drawn as `upper - U[lower, upper)`, so in
///   `[1, upper - lower]`, when no fixed `commodity_count` is set
/// - `quantity_range`: quantities in `[lower, upper]`, floored at 0.01
/// - `start_range`: integer release times in `[lower, upper)`
/// - `scope_range`: deadline scope drawn per commodity from `[lower, upper]`
///   when no fixed `scope` is set
///
/// Empty `origins`/`destinations` mean "any node of the network".
/// `max_attempts` bounds the origin/destination rejection loop per commodity.
///
/// # Examples
///
/// ```
/// use u_netdesign::generator::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_commodity_count(5)
///     .with_scope(2.0)
///     .with_origins(vec![0, 1]);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.commodity_count, Some(5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub commodity_count: Option<usize>,
    pub commodity_range: (usize, usize),
    pub quantity_range: (f64, f64),
    pub start_range: (i64, i64),
    pub origins: Vec<NodeId>,
    pub destinations: Vec<NodeId>,
    pub scope: Option<f64>,
    pub scope_range: (f64, f64),
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            commodity_count: None,
            commodity_range: (0, 10),
            quantity_range: (0.0, 2.0),
            start_range: (0, 10),
            origins: Vec::new(),
            destinations: Vec::new(),
            scope: None,
            scope_range: (1.0, 4.0),
            max_attempts: 10_000,
        }
    }
}

impl GeneratorConfig {
    /// Sets a fixed commodity count, overriding `commodity_range`.
    pub fn with_commodity_count(mut self, count: usize) -> Self {
        self.commodity_count = Some(count);
        self
    }

    /// Sets the range the commodity count is drawn from.
    pub fn with_commodity_range(mut self, lower: usize, upper: usize) -> Self {
        self.commodity_range = (lower, upper);
        self
    }

    /// Sets the quantity range.
    pub fn with_quantity_range(mut self, lower: f64, upper: f64) -> Self {
        self.quantity_range = (lower, upper);
        self
    }

    /// Sets the release time range (upper bound exclusive).
    pub fn with_start_range(mut self, lower: i64, upper: i64) -> Self {
        self.start_range = (lower, upper);
        self
    }

    /// Restricts origins to the given nodes.
    pub fn with_origins(mut self, origins: Vec<NodeId>) -> Self {
        self.origins = origins;
        self
    }

    /// Restricts destinations to the given nodes.
    pub fn with_destinations(mut self, destinations: Vec<NodeId>) -> Self {
        self.destinations = destinations;
        self
    }

    /// Sets a fixed scope for every commodity.
    pub fn with_scope(mut self, scope: f64) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Sets the range a per-commodity scope is drawn from.
    pub fn with_scope_range(mut self, lower: f64, upper: f64) -> Self {
        self.scope_range = (lower, upper);
        self
    }

    /// Sets the origin/destination draw limit per commodity.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Checks that every range the generator will sample from is non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.commodity_count.is_none() {
            let (lower, upper) = self.commodity_range;
            if lower >= upper {
                return Err(invalid("commodity", lower as f64, upper as f64));
            }
        }

        let (lower, upper) = self.quantity_range;
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(invalid("quantity", lower, upper));
        }

        let (lower, upper) = self.start_range;
        if lower >= upper {
            return Err(invalid("start", lower as f64, upper as f64));
        }

        match self.scope {
            Some(scope) if !scope.is_finite() || scope < 0.0 => {
                return Err(invalid("scope", scope, scope));
            }
            Some(_) => {}
            None => {
                let (lower, upper) = self.scope_range;
                if !lower.is_finite() || !upper.is_finite() || lower < 0.0 || lower > upper {
                    return Err(invalid("scope", lower, upper));
                }
            }
        }

        Ok(())
    }
}

fn invalid(name: &'static str, lower: f64, upper: f64) -> InstanceError {
    InstanceError::InvalidRange { name, lower, upper }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scope_range, (1.0, 4.0));
        assert_eq!(config.max_attempts, 10_000);
    }

    #[test]
    fn test_empty_commodity_range() {
        let config = GeneratorConfig::default().with_commodity_range(3, 3);
        assert!(matches!(
            config.validate(),
            Err(InstanceError::InvalidRange {
                name: "commodity",
                ..
            })
        ));
        // irrelevant once the count is fixed
        assert!(config.with_commodity_count(3).validate().is_ok());
    }

    #[test]
    fn test_empty_start_range() {
        let config = GeneratorConfig::default().with_start_range(5, 5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_quantity_range() {
        let config = GeneratorConfig::default().with_quantity_range(2.0, 1.0);
        assert!(config.validate().is_err());
        let point = GeneratorConfig::default().with_quantity_range(1.0, 1.0);
        assert!(point.validate().is_ok());
    }

    #[test]
    fn test_scope_checks() {
        assert!(GeneratorConfig::default()
            .with_scope_range(3.0, 1.0)
            .validate()
            .is_err());
        assert!(GeneratorConfig::default()
            .with_scope(f64::NAN)
            .validate()
            .is_err());
        // a fixed scope overrides a bad range
        assert!(GeneratorConfig::default()
            .with_scope_range(3.0, 1.0)
            .with_scope(1.5)
            .validate()
            .is_ok());
    }
}
