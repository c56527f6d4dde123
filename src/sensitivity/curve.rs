use super::diagnostics::cross_correlation;
use crate::Cancel;
use crate::Dataset;
use crate::Energy;
use crate::Error;
use crate::Histogram;
use crate::Metric;
use crate::Params;
use crate::Probability;
use crate::RunResult;
use crate::cluster;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;

/// One entry of a k-sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KPoint {
    pub k: usize,
    pub inertia: Energy,
    /// Number of clusters left empty by the final assignment.
    pub degenerate: usize,
    pub iterations: usize,
    pub converged: bool,
    pub cancelled: bool,
    pub centroids: Vec<Histogram>,
}

impl From<(usize, RunResult)> for KPoint {
    fn from((k, run): (usize, RunResult)) -> Self {
        Self {
            k,
            inertia: run.inertia(),
            degenerate: run.degenerate().len(),
            iterations: run.iterations(),
            converged: run.converged(),
            cancelled: run.cancelled(),
            centroids: run.centroids().to_vec(),
        }
    }
}

/// Inertia and degeneracy as a function of k, in the order requested.
///
/// Inertia usually falls as k grows but individual runs may break that;
/// the curve is reported as measured and interpreting the elbow is left to
/// the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KCurve {
    points: Vec<KPoint>,
}

impl KCurve {
    pub fn points(&self) -> &[KPoint] {
        &self.points
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn ks(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.k).collect()
    }
    pub fn inertias(&self) -> Vec<Energy> {
        self.points.iter().map(|p| p.inertia).collect()
    }
    /// Centroid correlations between each entry and the next one.
    ///
    /// Going from k to k+1, a column whose best correlation is low marks a
    /// regime that did not exist before; high correlations everywhere mean
    /// the extra cluster only split an existing regime.
    pub fn transitions(&self) -> Vec<Vec<Vec<Probability>>> {
        self.points
            .windows(2)
            .map(|w| cross_correlation(&w[0].centroids, &w[1].centroids))
            .collect()
    }
}

/// Clusters once per k in `ks` (each with the engine's own restarts) and
/// records inertia and degenerate cluster counts.
///
/// The whole range is checked before any clustering starts. Entries run
/// concurrently and come back in the order of `ks`.
pub fn sweep_k<M>(
    dataset: &Dataset,
    ks: &[usize],
    metric: &M,
    params: &Params,
    cancel: &Cancel,
) -> Result<KCurve, Error>
where
    M: Metric + ?Sized,
{
    if ks.is_empty() {
        return Err(Error::config("k_range", "no values of k to test"));
    }
    if let Some(k) = ks.iter().find(|k| **k == 0 || **k > dataset.len()) {
        return Err(Error::config(
            "k_range",
            format!("k = {} outside [1, {}]", k, dataset.len()),
        ));
    }
    params.validate()?;
    dataset.validate()?;
    log::info!("{:<32}{:<32}", "sweeping k", format!("{:?}", ks));
    let points = ks
        .par_iter()
        .map(|k| cluster(dataset, *k, metric, params, cancel).map(|run| KPoint::from((*k, run))))
        .collect::<Result<Vec<KPoint>, Error>>()?;
    points.iter().for_each(|p| {
        log::info!(
            "{:<32}{:<32}",
            format!("k={}", p.k),
            format!("inertia={:.6} degenerate={}", p.inertia, p.degenerate)
        )
    });
    Ok(KCurve { points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Euclidean;
    use crate::Initialization;
    use crate::clustering::fixtures;

    #[test]
    fn one_entry_per_k_in_order() {
        let dataset = fixtures::blobs(24);
        let ks = [4, 2, 3, 1];
        let curve = sweep_k(&dataset, &ks, &Euclidean::default(), &Params::default(), &Cancel::new()).unwrap();
        assert_eq!(curve.len(), ks.len());
        assert_eq!(curve.ks(), ks.to_vec());
        assert!(curve.points().iter().all(|p| p.centroids.len() == p.k));
    }

    #[test]
    fn inertia_drops_at_the_true_k() {
        let dataset = fixtures::blobs(30);
        let params = Params::default().with_init(Initialization::PlusPlus);
        let curve = sweep_k(&dataset, &[1, 2, 3], &Euclidean::default(), &params, &Cancel::new()).unwrap();
        let inertia = curve.inertias();
        assert!(inertia[0] > inertia[1]);
        assert!(inertia[1] > inertia[2]);
        assert!(curve.points().iter().all(|p| p.degenerate == 0));
    }

    #[test]
    fn transitions_pair_consecutive_entries() {
        let dataset = fixtures::blobs(24);
        let curve = sweep_k(&dataset, &[2, 3], &Euclidean::default(), &Params::default(), &Cancel::new()).unwrap();
        let transitions = curve.transitions();
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].len(), 2);
        assert_eq!(transitions[0][0].len(), 3);
    }

    #[test]
    fn rejects_empty_or_invalid_range() {
        let dataset = fixtures::pairs();
        let sweep = |ks: &[usize]| {
            sweep_k(&dataset, ks, &Euclidean::default(), &Params::default(), &Cancel::new()).unwrap_err()
        };
        assert!(matches!(sweep(&[]), Error::InvalidConfig { param: "k_range", .. }));
        assert!(matches!(sweep(&[1, 0]), Error::InvalidConfig { param: "k_range", .. }));
        assert!(matches!(sweep(&[2, 5]), Error::InvalidConfig { param: "k_range", .. }));
    }
}
