use super::density::Density;
use super::measure::Measure;
use super::support::Support;
use crate::Energy;

/// A transport plan (coupling) between two probability distributions.
///
/// A coupling is a joint distribution π(x,y) whose marginals match the source
/// distribution P and target distribution Q. The transport cost is the
/// expected ground cost under this joint distribution.
///
/// # Algorithm Contract
///
/// Implementations must ensure that after [`minimize`](Coupling::minimize) is called,
/// [`cost`](Coupling::cost) returns the (possibly approximate) optimal transport cost.
pub trait Coupling {
    /// Source support space.
    type X: Support;
    /// Target support space.
    type Y: Support;
    /// Ground metric for transport costs.
    type M: Measure<X = Self::X, Y = Self::Y>;
    /// Source probability distribution.
    type P: Density<Support = Self::X>;
    /// Target probability distribution.
    type Q: Density<Support = Self::Y>;
    /// Optimizes the coupling to minimize total transport cost.
    fn minimize(self) -> Self;
    /// Returns the mass transported from `x` to `y` in the coupling.
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Energy;
    /// Returns the total transport cost of this coupling,
    /// the integral of `flow(x, y) * distance(x, y)` over all pairs.
    fn cost(&self) -> Energy;
}
