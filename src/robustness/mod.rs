//! Stability of cloud regimes under re-initialization.
//!
//! - [`pearson`] / [`correlations`] — centroid similarity
//! - [`greedy`] — best-first one-to-one centroid matching
//! - [`assess_robustness`] — seeded trials, pairwise matched, summarized
mod correlation;
mod matching;
mod robustness;

pub use correlation::*;
pub use matching::*;
pub use robustness::*;
