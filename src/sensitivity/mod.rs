//! Sensitivity of the regimes to the choice of k.
//!
//! - [`sweep_k`] — one clustering per k, collected into a [`KCurve`]
//! - [`self_correlation`], [`cross_correlation`], [`label_correlation`] —
//!   correlation matrices for reading a sweep
mod curve;
mod diagnostics;

pub use curve::*;
pub use diagnostics::*;
