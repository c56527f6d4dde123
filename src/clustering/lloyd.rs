use super::assign::neighbors;
use super::params::Initialization;
use super::params::Params;
use super::run::RunResult;
use crate::Absorb;
use crate::Cancel;
use crate::Dataset;
use crate::Energy;
use crate::Error;
use crate::Histogram;
use crate::Mean;
use crate::Metric;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;

/// Clusters `dataset` into `k` regimes by Lloyd relocation under `metric`.
///
/// Runs `params.n_init` independently seeded initializations and returns
/// the one with the lowest inertia (the earliest on ties). Each run
/// alternates two steps until total centroid movement is at most
/// `params.tolerance` or `params.max_iterations` is reached:
///
/// 1. Assign every sample to its nearest centroid, lowest index on ties
/// 2. Move every centroid to the (weighted) mean of its members; a centroid
///    with no members stays where it is
///
/// Configuration and data errors are returned before any iteration runs.
/// Hitting the iteration limit, empty clusters and cancellation are
/// reported on the [`RunResult`]. `cancel` is checked at the top of every
/// iteration; once tripped, the best result so far is returned.
pub fn cluster<M>(
    dataset: &Dataset,
    k: usize,
    metric: &M,
    params: &Params,
    cancel: &Cancel,
) -> Result<RunResult, Error>
where
    M: Metric + ?Sized,
{
    if k == 0 {
        return Err(Error::config("k", "must be at least 1"));
    }
    params.validate()?;
    dataset.validate()?;
    if k > dataset.len() {
        return Err(Error::config(
            "k",
            format!("{} exceeds sample count {}", k, dataset.len()),
        ));
    }
    metric.validate(dataset)?;
    let explicit = params.init.explicit(k, dataset.shape())?;
    log::info!(
        "{:<32}{:<32}",
        "kmeans initializing",
        format!("k={} n={} metric={}", k, dataset.len(), metric.name())
    );
    let lloyd = Lloyd {
        dataset,
        metric,
        params,
        k,
    };
    let mut best = None::<RunResult>;
    let mut cancelled = false;
    for index in 0..params.restarts() {
        let init = match (&explicit, &params.init) {
            (Some(centroids), _) => centroids.clone(),
            (None, Initialization::PlusPlus) => lloyd.plusplus(index),
            (None, _) => lloyd.random(index),
        };
        let run = lloyd.run(index, init, cancel);
        cancelled = run.cancelled();
        best = match best {
            Some(best) if best.inertia() <= run.inertia() => Some(best),
            _ => Some(run),
        };
        if cancelled {
            log::warn!("{:<32}{:<32}", "kmeans cancelled", format!("after init {}", index));
            break;
        }
    }
    let best = best.ok_or_else(|| Error::config("n_init", "must be at least 1"))?;
    log::info!(
        "{:<32}{:<32}",
        "kmeans finished",
        format!(
            "inertia={:.6} iterations={} degenerate={}",
            best.inertia(),
            best.iterations(),
            best.degenerate().len()
        )
    );
    Ok(match cancelled {
        true => best.cancel(),
        false => best,
    })
}

/// One clustering problem, shared read-only by every initialization.
struct Lloyd<'a, M: ?Sized> {
    dataset: &'a Dataset,
    metric: &'a M,
    params: &'a Params,
    k: usize,
}

impl<M> Lloyd<'_, M>
where
    M: Metric + ?Sized,
{
    /// Deterministic stream for one initialization, from (seed, index).
    fn rng(&self, index: usize) -> SmallRng {
        use std::hash::DefaultHasher;
        use std::hash::Hash;
        use std::hash::Hasher;
        let ref mut hasher = DefaultHasher::new();
        self.params.seed.hash(hasher);
        index.hash(hasher);
        SmallRng::seed_from_u64(hasher.finish())
    }

    /// `k` distinct members, uniformly at random.
    fn random(&self, index: usize) -> Vec<Histogram> {
        let ref mut rng = self.rng(index);
        rand::seq::index::sample(rng, self.dataset.len(), self.k)
            .into_iter()
            .map(|i| self.dataset.point(i).clone())
            .collect()
    }

    /// k-means++ seeding.
    /// 1. choose the 1st centroid with probability proportional to sample weight
    /// 2. choose each next centroid with probability proportional to weighted distance from its nearest centroid
    /// 3. if every remaining potential is zero, take the lowest unchosen index
    fn plusplus(&self, index: usize) -> Vec<Histogram> {
        use rand::distr::Distribution;
        use rand::distr::weighted::WeightedIndex;
        let ref mut rng = self.rng(index);
        let n = self.dataset.len();
        let mut nearest = vec![Energy::INFINITY; n];
        let mut chosen = Vec::<usize>::with_capacity(self.k);
        while chosen.len() < self.k {
            let potentials = (0..n)
                .map(|i| match chosen.contains(&i) {
                    true => 0.,
                    false if chosen.is_empty() => self.dataset.weight(i),
                    false => self.dataset.weight(i) * nearest[i],
                })
                .collect::<Vec<Energy>>();
            let i = WeightedIndex::new(potentials.iter())
                .map(|w| w.sample(rng))
                .ok()
                .or_else(|| (0..n).find(|i| !chosen.contains(i)))
                .expect("k does not exceed sample count");
            chosen.push(i);
            let ref x = self.dataset.point(i);
            nearest = self
                .dataset
                .points()
                .par_iter()
                .map(|h| self.metric.distance(h, x))
                .collect::<Vec<Energy>>()
                .into_iter()
                .zip(nearest)
                .map(|(d0, d1)| Energy::min(d0, d1))
                .collect();
        }
        chosen
            .into_iter()
            .map(|i| self.dataset.point(i).clone())
            .collect()
    }

    /// Runs Lloyd iterations from the given centroids until convergence,
    /// the iteration limit, or cancellation.
    fn run(&self, index: usize, mut kmeans: Vec<Histogram>, cancel: &Cancel) -> RunResult {
        let mut iterations = 0;
        let mut converged = false;
        let mut cancelled = false;
        while iterations < self.params.max_iterations {
            if cancel.interrupted() {
                cancelled = true;
                break;
            }
            let labels = self.labels(&kmeans);
            let next = self.centroids(&labels, &kmeans);
            let drift = self.drift(&next, &kmeans);
            kmeans = next;
            iterations += 1;
            log::debug!(
                "{:<32}{:<32}",
                "kmeans iterating",
                format!("init={} t={} drift={:.6}", index, iterations, drift)
            );
            if drift <= self.params.tolerance {
                converged = true;
                break;
            }
        }
        if !converged && !cancelled {
            log::warn!(
                "{:<32}{:<32}",
                "kmeans did not converge",
                format!("init={} after {} iterations", index, iterations)
            );
        }
        let neighbors = neighbors(self.metric, self.dataset, &kmeans);
        let inertia = self.inertia(&neighbors);
        let labels = neighbors.into_iter().map(|(j, _)| j).collect();
        let run = RunResult::new(kmeans, labels, inertia, iterations, converged);
        match cancelled {
            true => run.cancel(),
            false => run,
        }
    }

    /// Nearest centroid of every sample.
    fn labels(&self, kmeans: &[Histogram]) -> Vec<usize> {
        neighbors(self.metric, self.dataset, kmeans)
            .into_iter()
            .map(|(j, _)| j)
            .collect()
    }

    /// Weighted mean of each cluster's members, or the old centroid if empty.
    fn centroids(&self, labels: &[usize], kmeans: &[Histogram]) -> Vec<Histogram> {
        let identity = Mean::empty(self.dataset.shape());
        (0..self.k)
            .into_par_iter()
            .map(|j| {
                labels
                    .iter()
                    .enumerate()
                    .filter(|(_, l)| **l == j)
                    .map(|(i, _)| Mean::from((self.dataset.point(i), self.dataset.weight(i))))
                    .fold(identity.identity(), |acc, m| acc.absorb(&m))
                    .centroid()
                    .unwrap_or_else(|| kmeans[j].clone())
            })
            .collect()
    }

    /// Total distance moved by the centroids this iteration.
    fn drift(&self, news: &[Histogram], olds: &[Histogram]) -> Energy {
        news.iter()
            .zip(olds.iter())
            .map(|(new, old)| match new == old {
                true => 0.,
                false => self.metric.distance(new, old),
            })
            .sum::<Energy>()
    }

    /// Weighted sum of sample-to-centroid distances, in sample order.
    fn inertia(&self, neighbors: &[(usize, Energy)]) -> Energy {
        neighbors
            .iter()
            .enumerate()
            .map(|(i, (_, d))| self.dataset.weight(i) * d)
            .sum::<Energy>()
    }
}
