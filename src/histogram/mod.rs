//! Histogram-valued feature vectors.
//!
//! ## Core Types
//!
//! - [`Shape`] — (rows, columns) bin layout shared by every vector in a run
//! - [`Bin`] — one cell of the pressure × optical depth grid
//! - [`Histogram`] — one observation's flattened joint histogram
//! - [`Dataset`] — ordered samples plus their shape and optional weights
//! - [`Mean`] — weighted accumulator that centroids are recomputed with
mod bin;
mod dataset;
mod histogram;
mod mean;
mod shape;

pub use bin::*;
pub use dataset::*;
pub use histogram::*;
pub use mean::*;
pub use shape::*;
