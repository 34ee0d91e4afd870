//! Dense distance matrix.

/// A dense n×n distance matrix stored in row-major order, indexed by dense
/// node index. Unreachable pairs hold `f64::INFINITY`.
///
/// # Examples
///
/// ```
/// use u_netdesign::graph::DistanceMatrix;
///
/// let mut dm = DistanceMatrix::new(3);
/// dm.set_row(0, &[0.0, 5.0, f64::INFINITY]);
/// assert!(dm.is_reachable(0, 1));
/// assert!(!dm.is_reachable(0, 2));
/// assert!(dm.is_reachable(2, 2));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix where every location reaches only itself.
    pub fn new(size: usize) -> Self {
        let mut data = vec![f64::INFINITY; size * size];
        for i in 0..size {
            data[i * size + i] = 0.0;
        }
        Self { data, size }
    }

    /// Returns the distance from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Overwrites row `from` with the given distances.
    pub fn set_row(&mut self, from: usize, distances: &[f64]) {
        let start = from * self.size;
        self.data[start..start + self.size].copy_from_slice(distances);
    }

    /// Returns `true` if `to` can be reached from `from`.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_only_self_reachable() {
        let dm = DistanceMatrix::new(2);
        assert_eq!(dm.get(0, 0), 0.0);
        assert!(dm.get(0, 1).is_infinite());
        assert!(!dm.is_reachable(1, 0));
    }

    #[test]
    fn test_set_row() {
        let mut dm = DistanceMatrix::new(3);
        dm.set_row(1, &[4.0, 0.0, 2.0]);
        assert_eq!(dm.get(1, 0), 4.0);
        assert_eq!(dm.get(1, 2), 2.0);
        assert!(dm.get(0, 1).is_infinite());
    }

    #[test]
    fn test_directed_reachability() {
        let mut dm = DistanceMatrix::new(2);
        dm.set_row(0, &[0.0, 10.0]);
        assert!(dm.is_reachable(0, 1));
        assert!(!dm.is_reachable(1, 0));
    }
}
