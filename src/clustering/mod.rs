//! Lloyd-style k-means over histogram feature vectors.
//!
//! The engine is written once against [`crate::Metric`]; Euclidean and
//! transport clustering share every line of it.
//!
//! ## Core Types
//!
//! - [`Params`] — iteration limit, tolerance, restarts, seed, [`Initialization`]
//! - [`RunResult`] — centroids, labels, inertia, convergence and degeneracy
//! - [`Assignment`] — labels against premade centroids
//!
//! ## Operations
//!
//! - [`cluster`] — best of `n_init` seeded Lloyd runs
//! - [`assign`] — nearest-centroid labelling without moving centroids
mod absorb;
mod assign;
mod lloyd;
mod params;
mod run;

#[cfg(test)]
pub(crate) mod fixtures;

pub use absorb::*;
pub use assign::*;
pub use lloyd::*;
pub use params::*;
pub use run::*;
