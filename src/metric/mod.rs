//! Histogram dissimilarity measures.
//!
//! The clustering engine is written once against the [`Metric`] capability
//! and never branches on which metric it was given.
//!
//! ## Implementations
//!
//! - [`Euclidean`] — squared (or rooted) element-wise difference, O(bins)
//! - [`Transport`] — earth mover's distance over the 2D bin grid under a
//!   configurable [`Ground`] cost, solved by [`Exact`] or [`Sinkhorn`]
//! - [`Distance`] — runtime-selected wrapper, built from a [`MetricKind`]
mod costs;
mod distance;
mod euclidean;
mod exact;
mod ground;
mod kind;
mod metric;
mod sinkhorn;
mod transport;

pub use costs::*;
pub use distance::*;
pub use euclidean::*;
pub use exact::*;
pub use ground::*;
pub use kind::*;
pub use metric::*;
pub use sinkhorn::*;
pub use transport::*;
