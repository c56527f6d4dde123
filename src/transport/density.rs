use super::support::Support;
use crate::Probability;

/// A discrete probability distribution over a support set.
///
/// Provides access to probability mass at each point and iteration over
/// the support. This abstraction lets the couplings work with any
/// collection type that maps elements to probabilities.
pub trait Density {
    /// The type of elements in the distribution's support.
    type Support: Support;
    /// Returns the probability mass at point `x`, or 0 if not in support.
    fn density(&self, x: &Self::Support) -> Probability;
    /// Iterates over all points with positive probability mass.
    fn support(&self) -> impl Iterator<Item = Self::Support>;
}
