//! Optimal transport abstractions.
//!
//! The transport metric treats each histogram as a discrete distribution over
//! its 2D bin grid and asks for the cheapest way to move one distribution's
//! mass onto the other's, under a ground cost between bins.
//!
//! ## Core Types
//!
//! - [`Support`] — elements a distribution places mass on (histogram bins)
//! - [`Density`] — a discrete probability distribution over a support
//! - [`Measure`] — ground cost of moving unit mass between two support points
//! - [`Coupling`] — a transport plan between two distributions, and its cost
//!
//! Concrete couplings live next to the metric that uses them, see
//! [`crate::metric`].
mod coupling;
mod density;
mod measure;
mod support;

pub use coupling::*;
pub use density::*;
pub use measure::*;
pub use support::*;
