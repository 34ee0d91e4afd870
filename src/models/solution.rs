//! Solution types carried alongside an instance.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ArcKey, NodeId};

/// A group of commodities sharing physical movement on one arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consolidation {
    pub arc: ArcKey,
    /// Commodity indices moved together on `arc`.
    pub commodities: BTreeSet<usize>,
}

impl Consolidation {
    /// Creates a consolidation, deduplicating commodity indices.
    pub fn new(arc: ArcKey, commodities: impl IntoIterator<Item = usize>) -> Self {
        Self {
            arc,
            commodities: commodities.into_iter().collect(),
        }
    }
}

/// A solved routing, as produced by an external solver and persisted in the
/// common instance format.
///
/// # Examples
///
/// ```
/// use u_netdesign::models::{ArcKey, Consolidation, Solution};
///
/// let mut sol = Solution::new(42.0);
/// sol.add_path(vec![1, 2, 3]);
/// sol.add_consolidation(Consolidation::new(ArcKey::new(1, 2), [0, 1]));
/// assert_eq!(sol.num_paths(), 1);
/// assert_eq!(sol.consolidations()[0].commodities.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    objective: f64,
    paths: Vec<Vec<NodeId>>,
    consolidations: Vec<Consolidation>,
}

impl Solution {
    /// Creates a solution with the given objective and no paths.
    pub fn new(objective: f64) -> Self {
        Self {
            objective,
            paths: Vec::new(),
            consolidations: Vec::new(),
        }
    }

    /// Adds the node sequence travelled by the next commodity.
    pub fn add_path(&mut self, path: Vec<NodeId>) {
        self.paths.push(path);
    }

    /// Adds a consolidation.
    pub fn add_consolidation(&mut self, consolidation: Consolidation) {
        self.consolidations.push(consolidation);
    }

    /// Returns the objective value.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Node sequences, one per commodity in commodity order.
    pub fn paths(&self) -> &[Vec<NodeId>] {
        &self.paths
    }

    /// Returns the number of paths.
    pub fn num_paths(&self) -> usize {
        self.paths.len()
    }

    /// Returns the consolidations in insertion order.
    pub fn consolidations(&self) -> &[Consolidation] {
        &self.consolidations
    }

    /// Arcs travelled by path `index`.
    pub fn path_arcs(&self, index: usize) -> Vec<ArcKey> {
        self.paths
            .get(index)
            .map(|p| p.windows(2).map(|w| ArcKey::new(w[0], w[1])).collect())
            .unwrap_or_default()
    }
}
