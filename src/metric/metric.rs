use crate::Dataset;
use crate::Energy;
use crate::Error;
use crate::Histogram;

/// Scalar dissimilarity between two histograms of identical shape.
///
/// Implementations must be non-negative and deterministic for identical
/// inputs. Symmetry is not required in general.
///
/// `Sync` because the engine evaluates sample-centroid distances from
/// worker threads while sharing one metric.
pub trait Metric: Sync {
    /// Dissimilarity of `a` from `b`.
    fn distance(&self, a: &Histogram, b: &Histogram) -> Energy;
    /// Short name for logs and serialized results.
    fn name(&self) -> &'static str;
    /// Metric-specific admission check, run once per clustering call after
    /// the dataset's own validation.
    fn validate(&self, dataset: &Dataset) -> Result<(), Error> {
        let _ = dataset;
        Ok(())
    }
}

impl<M> Metric for &M
where
    M: Metric + ?Sized,
{
    fn distance(&self, a: &Histogram, b: &Histogram) -> Energy {
        (**self).distance(a, b)
    }
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn validate(&self, dataset: &Dataset) -> Result<(), Error> {
        (**self).validate(dataset)
    }
}
