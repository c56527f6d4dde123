/// Trait for k-means centroid computation via incremental aggregation.
///
/// The "absorb" pattern generalizes mean computation: samples are combined
/// one at a time without tracking the count explicitly, and the result is
/// read off at the end. Absorption must be associative and commutative so
/// that the fold order over a cluster's members is irrelevant up to
/// floating point rounding.
///
/// # Required Methods
///
/// - `identity()` — Returns the neutral element for absorption
/// - `absorb()` — Combines two partial aggregates into one
pub trait Absorb {
    /// Returns the identity element (empty accumulator of the same shape).
    fn identity(&self) -> Self;
    /// Combines this aggregate with another, producing a merged result.
    fn absorb(self, other: &Self) -> Self;
}
