use super::euclidean::Euclidean;
use super::ground::Ground;
use super::kind::MetricKind;
use super::metric::Metric;
use super::transport::Transport;
use crate::Dataset;
use crate::Energy;
use crate::Error;
use crate::Histogram;
use crate::Shape;

/// A metric chosen at runtime, e.g. from a CLI flag or a config file.
#[derive(Debug, Clone, PartialEq)]
pub enum Distance {
    Euclidean(Euclidean),
    Transport(Transport),
}

impl Distance {
    pub fn build(kind: MetricKind, shape: Shape, ground: &Ground) -> Self {
        match kind {
            MetricKind::Euclidean => Self::Euclidean(Euclidean::default()),
            MetricKind::Transport => Self::Transport(Transport::new(shape, ground)),
        }
    }
    pub fn kind(&self) -> MetricKind {
        match self {
            Self::Euclidean(_) => MetricKind::Euclidean,
            Self::Transport(_) => MetricKind::Transport,
        }
    }
}

impl Metric for Distance {
    fn distance(&self, a: &Histogram, b: &Histogram) -> Energy {
        match self {
            Self::Euclidean(m) => m.distance(a, b),
            Self::Transport(m) => m.distance(a, b),
        }
    }
    fn name(&self) -> &'static str {
        match self {
            Self::Euclidean(m) => m.name(),
            Self::Transport(m) => m.name(),
        }
    }
    fn validate(&self, dataset: &Dataset) -> Result<(), Error> {
        match self {
            Self::Euclidean(m) => m.validate(dataset),
            Self::Transport(m) => m.validate(dataset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_requested_kind() {
        let shape = Shape::default();
        for kind in [MetricKind::Euclidean, MetricKind::Transport] {
            let metric = Distance::build(kind, shape, &Ground::default());
            assert_eq!(metric.kind(), kind);
            assert_eq!(metric.name(), kind.to_string());
        }
    }
}
