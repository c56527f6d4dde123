use super::costs::Costs;
use super::exact::Exact;
use super::ground::Ground;
use super::metric::Metric;
use super::sinkhorn::Entropic;
use super::sinkhorn::Sinkhorn;
use crate::Dataset;
use crate::Energy;
use crate::Error;
use crate::Histogram;
use crate::Shape;
use crate::transport::Coupling;
use serde::Deserialize;
use serde::Serialize;

/// Which coupling solves the transport problem.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Solver {
    /// Successive shortest paths. Exact, and the reference.
    #[default]
    Exact,
    /// Entropy-regularized Sinkhorn iteration. Approximate, slightly biased upward.
    Sinkhorn(Entropic),
}

/// Earth mover's distance between histograms over their 2D bin grid.
///
/// Both histograms are normalized to unit mass, so the distance compares
/// shapes of the cloud distribution and not total cloud amount. Moving unit
/// mass between two bins costs the [`Ground`] distance between them.
///
/// The cost matrix is built once per shape and reused for every call, since
/// the engine evaluates this metric once per (sample, centroid) pair per
/// iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    costs: Costs,
    ground: Ground,
    solver: Solver,
}

impl Transport {
    pub fn new(shape: Shape, ground: &Ground) -> Self {
        Self {
            costs: ground.costs(shape),
            ground: *ground,
            solver: Solver::default(),
        }
    }
    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }
    pub fn shape(&self) -> Shape {
        self.costs.shape()
    }
    pub fn costs(&self) -> &Costs {
        &self.costs
    }
    pub fn solver(&self) -> Solver {
        self.solver
    }
    pub fn ground(&self) -> &Ground {
        &self.ground
    }
    /// Rejects ground or solver settings that would make costs meaningless.
    pub fn settings(&self) -> Result<(), Error> {
        self.ground.validate()?;
        match self.solver {
            Solver::Exact => Ok(()),
            Solver::Sinkhorn(params) => params.validate(),
        }
    }

    /// Checked distance: both histograms must match the cost grid and be
    /// valid distributions. Zero-mass histograms are rejected, never scored.
    pub fn emd(&self, a: &Histogram, b: &Histogram) -> Result<Energy, Error> {
        self.settings()?;
        for h in [a, b] {
            if h.shape() != self.shape() {
                return Err(Error::data(format!(
                    "histogram shape {} differs from transport grid {}",
                    h.shape(),
                    self.shape()
                )));
            }
            h.check().map_err(Error::data)?;
        }
        Ok(self.distance(a, b))
    }
}

impl Metric for Transport {
    fn distance(&self, a: &Histogram, b: &Histogram) -> Energy {
        debug_assert!(a.mass() > 0. && b.mass() > 0., "zero-mass histogram reached transport");
        match self.solver {
            Solver::Exact => Exact::from((a, b, &self.costs)).minimize().cost(),
            Solver::Sinkhorn(params) => Sinkhorn::from((a, b, &self.costs, params)).minimize().cost(),
        }
    }
    fn name(&self) -> &'static str {
        "transport"
    }
    fn validate(&self, dataset: &Dataset) -> Result<(), Error> {
        self.settings()?;
        match dataset.shape() == self.shape() {
            true => Ok(()),
            false => Err(Error::config(
                "metric",
                format!(
                    "transport grid {} does not match dataset shape {}",
                    self.shape(),
                    dataset.shape()
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    #[test]
    fn is_transport_zero_on_self() {
        let ref a = Histogram::random();
        let metric = Transport::new(a.shape(), &Ground::default());
        assert!(metric.distance(a, a) < 1e-6);
    }

    #[test]
    fn is_transport_positive() {
        let shape = Shape::new(2, 2);
        let a = Histogram::new(shape, vec![1., 0., 0., 0.]).unwrap();
        let b = Histogram::new(shape, vec![0., 0., 0., 1.]).unwrap();
        let metric = Transport::new(shape, &Ground::default());
        // opposite corners of the grid are one full diagonal apart
        assert!((metric.distance(&a, &b) - 1.).abs() < 1e-6);
    }

    #[test]
    fn emd_rejects_zero_mass() {
        let shape = Shape::new(1, 3);
        let a = Histogram::new(shape, vec![1., 2., 3.]).unwrap();
        let b = Histogram::zeroes(shape);
        let metric = Transport::new(shape, &Ground::default());
        assert!(metric.emd(&a, &b).unwrap_err().is_data());
        assert!(metric.emd(&a, &a).is_ok());
    }

    #[test]
    fn emd_rejects_foreign_shape() {
        let a = Histogram::new(Shape::new(1, 4), vec![1., 2., 3., 4.]).unwrap();
        let metric = Transport::new(Shape::new(2, 2), &Ground::default());
        assert!(metric.emd(&a, &a).is_err());
    }

    #[test]
    fn validate_rejects_mismatched_dataset() {
        let shape = Shape::new(1, 2);
        let dataset = Dataset::from_rows(shape, vec![vec![1., 0.]]).unwrap();
        assert!(Transport::new(shape, &Ground::default()).validate(&dataset).is_ok());
        let metric = Transport::new(Shape::new(2, 1), &Ground::default());
        assert!(metric.validate(&dataset).unwrap_err().is_config());
    }

    #[test]
    fn validate_rejects_bad_ground_and_solver() {
        let shape = Shape::new(1, 2);
        let dataset = Dataset::from_rows(shape, vec![vec![1., 0.], vec![0., 1.]]).unwrap();
        let flat = Ground {
            scale: Some(0.),
            ..Ground::default()
        };
        let metric = Transport::new(shape, &flat);
        assert!(matches!(
            metric.validate(&dataset),
            Err(Error::InvalidConfig { param: "ground", .. })
        ));
        let a = dataset.point(0);
        assert!(metric.emd(a, a).unwrap_err().is_config());
        let frozen = Entropic {
            temperature: 0.,
            ..Entropic::default()
        };
        let metric = Transport::new(shape, &Ground::default()).with_solver(Solver::Sinkhorn(frozen));
        assert!(matches!(
            metric.validate(&dataset),
            Err(Error::InvalidConfig { param: "solver", .. })
        ));
    }

    #[test]
    fn sinkhorn_solver_tracks_exact() {
        let ref a = Histogram::random();
        let ref b = Histogram::random();
        let exact = Transport::new(a.shape(), &Ground::default());
        let approx = exact.clone().with_solver(Solver::Sinkhorn(Entropic::default()));
        assert!((exact.distance(a, b) - approx.distance(a, b)).abs() < 0.15);
    }
}
