use super::correlation::correlations;
use super::matching::Match;
use super::matching::greedy;
use crate::Cancel;
use crate::Dataset;
use crate::Energy;
use crate::Error;
use crate::Metric;
use crate::Params;
use crate::Probability;
use crate::RunResult;
use crate::cluster;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;

/// Robustness test settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobustnessParams {
    /// Independently seeded clustering runs. At least 2.
    pub trial_count: usize,
    /// Matched centroid pairs at or above this correlation are successes.
    pub correlation_threshold: Probability,
}

impl Default for RobustnessParams {
    fn default() -> Self {
        Self {
            trial_count: crate::ROBUSTNESS_TRIALS,
            correlation_threshold: crate::ROBUSTNESS_THRESHOLD,
        }
    }
}

impl RobustnessParams {
    pub fn validate(&self) -> Result<(), Error> {
        if self.trial_count < 2 {
            return Err(Error::config(
                "trial_count",
                format!("{} trials, at least 2 are needed for a comparison", self.trial_count),
            ));
        }
        if !(-1. ..=1.).contains(&self.correlation_threshold) {
            return Err(Error::config(
                "correlation_threshold",
                format!("{} is outside [-1, 1]", self.correlation_threshold),
            ));
        }
        Ok(())
    }
}

/// Seed of trial `t`, derived from the base seed.
pub fn trial_seed(seed: u64, trial: usize) -> u64 {
    use std::hash::DefaultHasher;
    use std::hash::Hash;
    use std::hash::Hasher;
    let ref mut hasher = DefaultHasher::new();
    seed.hash(hasher);
    trial.hash(hasher);
    hasher.finish()
}

/// What one trial contributed, without its centroids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub seed: u64,
    pub inertia: Energy,
    pub iterations: usize,
    pub converged: bool,
    pub cancelled: bool,
    pub degenerate: Vec<usize>,
}

impl From<(u64, &RunResult)> for Trial {
    fn from((seed, run): (u64, &RunResult)) -> Self {
        Self {
            seed,
            inertia: run.inertia(),
            iterations: run.iterations(),
            converged: run.converged(),
            cancelled: run.cancelled(),
            degenerate: run.degenerate().to_vec(),
        }
    }
}

/// Comparison of two trials after aligning their centroids.
///
/// Degenerate centroids take no part in matching. They, and any centroid
/// left over once the other side is exhausted, are listed as unmatched and
/// counted neither as successes nor as failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSummary {
    pub a: usize,
    pub b: usize,
    pub matches: Vec<Match>,
    pub successes: usize,
    pub failures: usize,
    pub unmatched_a: Vec<usize>,
    pub unmatched_b: Vec<usize>,
    /// Mean correlation over all matched pairs, `None` if nothing matched.
    pub mean_correlation: Option<Probability>,
}

impl PairSummary {
    fn compare(a: (usize, &RunResult), b: (usize, &RunResult), threshold: Probability) -> Self {
        let (ia, ra) = a;
        let (ib, rb) = b;
        let matrix = correlations(ra.centroids(), rb.centroids());
        let matches = greedy(&matrix, ra.degenerate(), rb.degenerate());
        let unmatched = |k: usize, side: fn(&Match) -> usize| {
            (0..k)
                .filter(|j| !matches.iter().any(|m| side(m) == *j))
                .collect::<Vec<usize>>()
        };
        let unmatched_a = unmatched(ra.k(), |m: &Match| m.a);
        let unmatched_b = unmatched(rb.k(), |m: &Match| m.b);
        let successes = matches
            .iter()
            .filter(|m| m.correlation >= threshold)
            .count();
        let mean_correlation = match matches.is_empty() {
            true => None,
            false => Some(
                matches.iter().map(|m| m.correlation).sum::<Probability>() / matches.len() as Probability,
            ),
        };
        Self {
            a: ia,
            b: ib,
            failures: matches.len() - successes,
            successes,
            matches,
            unmatched_a,
            unmatched_b,
            mean_correlation,
        }
    }
    pub fn comparisons(&self) -> usize {
        self.successes + self.failures
    }
}

/// Stability of the regimes found at one k across seeded trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robustness {
    pub k: usize,
    pub threshold: Probability,
    pub trials: Vec<Trial>,
    pub pairs: Vec<PairSummary>,
    pub successes: usize,
    pub failures: usize,
    /// Any trial stopped early on cancellation.
    pub cancelled: bool,
}

impl Robustness {
    /// Share of all matched centroid comparisons that succeeded, `None` if
    /// no pair of trials matched anything.
    pub fn success_fraction(&self) -> Option<Probability> {
        match self.successes + self.failures {
            0 => None,
            n => Some(self.successes as Probability / n as Probability),
        }
    }
}

/// Repeats `cluster` under `trial_count` derived seeds and checks that the
/// same centroids keep coming back.
///
/// Cluster indices are arbitrary across runs, so for every unordered pair
/// of trials the centroids are aligned by greedy best-first correlation
/// matching before any comparison. Trials run concurrently; results are
/// reported in trial order.
pub fn assess_robustness<M>(
    dataset: &Dataset,
    k: usize,
    metric: &M,
    params: &Params,
    robustness: &RobustnessParams,
    cancel: &Cancel,
) -> Result<Robustness, Error>
where
    M: Metric + ?Sized,
{
    robustness.validate()?;
    log::info!(
        "{:<32}{:<32}",
        "robustness trials",
        format!("k={} trials={}", k, robustness.trial_count)
    );
    let runs = (0..robustness.trial_count)
        .into_par_iter()
        .map(|t| trial_seed(params.seed, t))
        .map(|seed| {
            let params = params.clone().with_seed(seed);
            cluster(dataset, k, metric, &params, cancel).map(|run| (seed, run))
        })
        .collect::<Result<Vec<_>, Error>>()?;
    let pairs = (0..runs.len())
        .flat_map(|a| (a + 1..runs.len()).map(move |b| (a, b)))
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(a, b)| {
            PairSummary::compare(
                (a, &runs[a].1),
                (b, &runs[b].1),
                robustness.correlation_threshold,
            )
        })
        .collect::<Vec<PairSummary>>();
    let summary = Robustness {
        k,
        threshold: robustness.correlation_threshold,
        trials: runs.iter().map(|(seed, run)| Trial::from((*seed, run))).collect(),
        successes: pairs.iter().map(|p| p.successes).sum(),
        failures: pairs.iter().map(|p| p.failures).sum(),
        cancelled: runs.iter().any(|(_, run)| run.cancelled()),
        pairs,
    };
    log::info!(
        "{:<32}{:<32}",
        "robustness success",
        summary
            .success_fraction()
            .map_or("n/a".to_string(), |f| format!("{:.3}", f))
    );
    Ok(summary)
}
