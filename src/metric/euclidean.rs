use super::metric::Metric;
use crate::Energy;
use crate::Histogram;

/// Element-wise distance across the flattened histogram.
///
/// Squared by default, so k-means inertia is the usual within-cluster sum of
/// squares. [`Euclidean::root`] gives the proper L2 norm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Euclidean {
    root: bool,
}

impl Euclidean {
    pub const fn squared() -> Self {
        Self { root: false }
    }
    pub const fn root() -> Self {
        Self { root: true }
    }
    /// Sum of squared differences, accumulated in f64.
    pub fn sum_of_squares(a: &[f32], b: &[f32]) -> Energy {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| *x as f64 - *y as f64)
            .map(|d| d * d)
            .sum::<f64>() as Energy
    }
}

impl Default for Euclidean {
    fn default() -> Self {
        Self::squared()
    }
}

impl Metric for Euclidean {
    fn distance(&self, a: &Histogram, b: &Histogram) -> Energy {
        let ss = Self::sum_of_squares(a.values(), b.values());
        if self.root { ss.sqrt() } else { ss }
    }
    fn name(&self) -> &'static str {
        "euclidean"
    }
}
