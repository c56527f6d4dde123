use super::costs::Costs;
use crate::Bin;
use crate::Energy;
use crate::Entropy;
use crate::Error;
use crate::Histogram;
use crate::transport::Coupling;
use serde::Deserialize;
use serde::Serialize;

/// Hyperparameters of entropic optimal transport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entropic {
    /// Regularization strength. Lower = closer to exact EMD.
    pub temperature: Entropy,
    /// Maximum iteration count before forced termination.
    pub iterations: usize,
    /// Convergence tolerance for early stopping.
    pub tolerance: Energy,
}

impl Default for Entropic {
    fn default() -> Self {
        Self {
            temperature: crate::SINKHORN_TEMPERATURE,
            iterations: crate::SINKHORN_ITERATIONS,
            tolerance: crate::SINKHORN_TOLERANCE,
        }
    }
}

impl Entropic {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.temperature.is_finite() || self.temperature <= 0. {
            return Err(Error::config(
                "solver",
                format!("temperature {} is not finite and positive", self.temperature),
            ));
        }
        if self.iterations == 0 {
            return Err(Error::config("solver", "iterations must be at least 1"));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0. {
            return Err(Error::config(
                "solver",
                format!("tolerance {} is not finite and non-negative", self.tolerance),
            ));
        }
        Ok(())
    }
}

/// Entropic optimal transport via Sinkhorn iteration.
///
/// Approximates the earth mover's distance between two histograms with
/// entropic regularization, trading a small bias for O(n × m) work per
/// iteration. Potentials are kept in log space for stability.
///
/// # Algorithm
///
/// 1. Initialize potentials uniformly
/// 2. Alternately scale LHS and RHS potentials
/// 3. Stop when potential changes fall below tolerance
/// 4. Compute transport cost from final coupling
pub struct Sinkhorn<'a> {
    /// Ground cost between bins.
    costs: &'a Costs,
    /// Regularization hyperparameters.
    params: Entropic,
    /// Source support as flat bin indices, with normalized masses.
    sources: Vec<(usize, Entropy)>,
    /// Target support as flat bin indices, with normalized masses.
    sinks: Vec<(usize, Entropy)>,
    /// LHS potential (dual variable), aligned with `sources`.
    lhs: Vec<Entropy>,
    /// RHS potential (dual variable), aligned with `sinks`.
    rhs: Vec<Entropy>,
}

impl Sinkhorn<'_> {
    /// Positive support of a histogram with normalized masses.
    fn support(h: &Histogram) -> Vec<(usize, Entropy)> {
        let mass = h.mass();
        h.values()
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0.)
            .map(|(i, v)| (i, v / mass))
            .collect()
    }
    /// Uniform log-potential over a support.
    fn uniform(n: usize) -> Vec<Entropy> {
        vec![-(n as Entropy).ln(); n]
    }
    /// Runs Sinkhorn iteration until convergence.
    fn sinkhorn(&mut self) {
        for _ in 0..self.params.iterations {
            let next = self.lhs();
            let lhs_err = Self::delta(&self.lhs, &next);
            self.lhs = next;
            let next = self.rhs();
            let rhs_err = Self::delta(&self.rhs, &next);
            self.rhs = next;
            if lhs_err + rhs_err < self.params.tolerance {
                break;
            }
        }
    }
    /// Computes updated LHS potential via Sinkhorn scaling.
    fn lhs(&self) -> Vec<Entropy> {
        self.sources
            .iter()
            .map(|(x, p)| self.divergence(*p, &self.rhs, |j| self.regularization(*x, self.sinks[j].0)))
            .inspect(|d| debug_assert!(d.is_finite(), "lhs entropy overflow"))
            .collect()
    }
    /// Computes updated RHS potential via Sinkhorn scaling.
    fn rhs(&self) -> Vec<Entropy> {
        self.sinks
            .iter()
            .map(|(y, q)| self.divergence(*q, &self.lhs, |i| self.regularization(self.sources[i].0, *y)))
            .inspect(|d| debug_assert!(d.is_finite(), "rhs entropy overflow"))
            .collect()
    }
    /// Log-scale potential update for one support element.
    /// Balances the marginal constraint via softmin over the opposing potential.
    fn divergence<F>(&self, mass: Entropy, potential: &[Entropy], kernel: F) -> Entropy
    where
        F: Fn(usize) -> Entropy,
    {
        mass.ln()
            - potential
                .iter()
                .enumerate()
                .map(|(k, phi)| phi - kernel(k))
                .map(|e| e.exp())
                .map(|e| e.max(Energy::MIN_POSITIVE))
                .sum::<Energy>()
                .ln()
    }
    /// Regularized cost: distance / temperature.
    fn regularization(&self, x: usize, y: usize) -> Entropy {
        self.costs.get(x, y) / self.params.temperature
    }
    /// Coupling mass between the i-th source and j-th sink.
    fn coupling(&self, i: usize, j: usize) -> Energy {
        (self.lhs[i] + self.rhs[j] - self.regularization(self.sources[i].0, self.sinks[j].0)).exp()
    }
    /// L1 change in potential (stopping criterion).
    fn delta(prev: &[Entropy], next: &[Entropy]) -> Energy {
        prev.iter()
            .zip(next.iter())
            .map(|(a, b)| b.exp() - a.exp())
            .map(|e| e.abs())
            .sum::<Energy>()
    }
}

impl Coupling for Sinkhorn<'_> {
    type X = Bin;
    type Y = Bin;
    type P = Histogram;
    type Q = Histogram;
    type M = Costs;

    fn minimize(mut self) -> Self {
        self.sinkhorn();
        self
    }
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Energy {
        let shape = self.costs.shape();
        let i = self.sources.iter().position(|(s, _)| *s == shape.index(x));
        let j = self.sinks.iter().position(|(s, _)| *s == shape.index(y));
        match (i, j) {
            (Some(i), Some(j)) => self.coupling(i, j),
            _ => 0.,
        }
    }
    fn cost(&self) -> Energy {
        (0..self.sources.len())
            .flat_map(|i| (0..self.sinks.len()).map(move |j| (i, j)))
            .map(|(i, j)| self.coupling(i, j) * self.costs.get(self.sources[i].0, self.sinks[j].0))
            .inspect(|x| debug_assert!(x.is_finite()))
            .sum::<Energy>()
    }
}

impl<'a> From<(&'a Histogram, &'a Histogram, &'a Costs, Entropic)> for Sinkhorn<'a> {
    fn from((mu, nu, costs, params): (&'a Histogram, &'a Histogram, &'a Costs, Entropic)) -> Self {
        let sources = Self::support(mu);
        let sinks = Self::support(nu);
        Self {
            costs,
            params,
            lhs: Self::uniform(sources.len()),
            rhs: Self::uniform(sinks.len()),
            sources,
            sinks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use crate::Exact;
    use crate::Ground;

    fn sinkhorn(a: &Histogram, b: &Histogram, costs: &Costs) -> Energy {
        Sinkhorn::from((a, b, costs, Entropic::default())).minimize().cost()
    }

    #[test]
    fn entropic_rejects_bad_settings() {
        let ok = Entropic::default();
        assert!(ok.validate().is_ok());
        let bad = [
            Entropic { temperature: 0., ..ok },
            Entropic { temperature: -0.1, ..ok },
            Entropic { temperature: f32::NAN, ..ok },
            Entropic { iterations: 0, ..ok },
            Entropic { tolerance: -1., ..ok },
        ];
        for params in bad {
            assert!(matches!(
                params.validate(),
                Err(Error::InvalidConfig { param: "solver", .. })
            ));
        }
    }

    /// sinkhorn implementation should be
    /// 1. positive semidefinite
    /// 2. approximately self-annihilating
    /// 3. close to the exact solution

    #[test]
    fn is_sinkhorn_emd_positive() {
        let a = Histogram::random();
        let b = Histogram::random();
        let costs = Ground::default().costs(a.shape());
        assert!(sinkhorn(&a, &b, &costs) >= 0.);
        assert!(sinkhorn(&b, &a, &costs) >= 0.);
    }

    #[test]
    fn is_sinkhorn_emd_zero() {
        const TOLERANCE: f32 = 0.05;
        let a = Histogram::random();
        let costs = Ground::default().costs(a.shape());
        let d = sinkhorn(&a, &a, &costs);
        assert!(d <= TOLERANCE, "consider decreasing temp or tolerance\n{d} {TOLERANCE}");
    }

    #[test]
    fn is_sinkhorn_emd_near_exact() {
        const TOLERANCE: f32 = 0.15;
        let a = Histogram::random();
        let b = Histogram::random();
        let costs = Ground::default().costs(a.shape());
        let approx = sinkhorn(&a, &b, &costs);
        let exact = Exact::from((&a, &b, &costs)).minimize().cost();
        assert!((approx - exact).abs() <= TOLERANCE, "{approx} vs {exact}");
    }
}
