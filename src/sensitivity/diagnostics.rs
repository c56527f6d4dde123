use crate::Histogram;
use crate::Probability;
use crate::RunResult;
use crate::correlations;
use crate::pearson;

/// k × k correlations between the centroids of one run. Off-diagonal values
/// near 1 mean two regimes are the same pattern and k is too large.
pub fn self_correlation(centroids: &[Histogram]) -> Vec<Vec<Probability>> {
    correlations(centroids, centroids)
}

/// k₁ × k₂ correlations between the centroids of two runs.
pub fn cross_correlation(a: &[Histogram], b: &[Histogram]) -> Vec<Vec<Probability>> {
    correlations(a, b)
}

/// k × k correlations between the membership series of each regime.
///
/// Each regime becomes a 0/1 series over samples (1 where the sample
/// carries that label). Samples are ordered in space and time, so
/// positive values mean two regimes tend to occur together.
pub fn label_correlation(run: &RunResult) -> Vec<Vec<Probability>> {
    let series = (0..run.k())
        .map(|j| {
            run.labels()
                .iter()
                .map(|l| if *l == j { 1. } else { 0. })
                .collect::<Vec<f32>>()
        })
        .collect::<Vec<_>>();
    series
        .iter()
        .map(|a| series.iter().map(|b| pearson(a, b)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cancel;
    use crate::Euclidean;
    use crate::Initialization;
    use crate::Params;
    use crate::cluster;
    use crate::clustering::fixtures;

    fn two_pairs() -> RunResult {
        let params = Params::default().with_init(Initialization::Explicit(vec![
            vec![10., 0.],
            vec![0., 10.],
        ]));
        cluster(&fixtures::pairs(), 2, &Euclidean::default(), &params, &Cancel::new()).unwrap()
    }

    #[test]
    fn self_correlation_has_unit_diagonal() {
        let run = two_pairs();
        let m = self_correlation(run.centroids());
        assert!((m[0][0] - 1.).abs() < 1e-6);
        assert!((m[1][1] - 1.).abs() < 1e-6);
        assert!((m[0][1] + 1.).abs() < 1e-6);
    }

    #[test]
    fn cross_correlation_shape() {
        let prototypes = fixtures::prototypes();
        let m = cross_correlation(&prototypes[..2], &prototypes);
        assert_eq!(m.len(), 2);
        assert!(m.iter().all(|row| row.len() == 3));
        assert!((m[1][1] - 1.).abs() < 1e-6);
    }

    #[test]
    fn disjoint_regimes_anticorrelate() {
        let m = label_correlation(&two_pairs());
        assert_eq!(m[0][0], 1.);
        assert!((m[0][1] + 1.).abs() < 1e-6);
    }
}
