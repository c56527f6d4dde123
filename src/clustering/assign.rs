use crate::Dataset;
use crate::Energy;
use crate::Error;
use crate::Histogram;
use crate::Metric;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;

/// Nearest centroid to a point and its distance.
/// Ties go to the lowest centroid index. A NaN distance ranks last.
pub(crate) fn nearest<M>(metric: &M, point: &Histogram, centroids: &[Histogram]) -> (usize, Energy)
where
    M: Metric + ?Sized,
{
    centroids
        .iter()
        .enumerate()
        .map(|(j, c)| (j, metric.distance(point, c)))
        .map(|(j, d)| (j, if d.is_nan() { Energy::INFINITY } else { d }))
        .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2))
        .unwrap_or((0, Energy::INFINITY))
}

/// Nearest-centroid labels for every sample, in sample order.
pub(crate) fn neighbors<M>(metric: &M, dataset: &Dataset, centroids: &[Histogram]) -> Vec<(usize, Energy)>
where
    M: Metric + ?Sized,
{
    dataset
        .points()
        .par_iter()
        .map(|x| nearest(metric, x, centroids))
        .collect()
}

/// Labels of a dataset against premade regimes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub labels: Vec<usize>,
    pub distances: Vec<Energy>,
}

/// Labels every sample with its nearest premade centroid.
///
/// Used to place new observations into regimes learned elsewhere, without
/// moving the centroids. Centroids must share the dataset's shape and be
/// valid histograms themselves.
pub fn assign<M>(dataset: &Dataset, centroids: &[Histogram], metric: &M) -> Result<Assignment, Error>
where
    M: Metric + ?Sized,
{
    dataset.validate()?;
    metric.validate(dataset)?;
    if centroids.is_empty() {
        return Err(Error::config("centroids", "at least one centroid is required"));
    }
    for (j, c) in centroids.iter().enumerate() {
        if c.shape() != dataset.shape() {
            return Err(Error::config(
                "centroids",
                format!("centroid {} has shape {}, dataset has {}", j, c.shape(), dataset.shape()),
            ));
        }
        c.check()
            .map_err(|reason| Error::config("centroids", format!("centroid {}: {}", j, reason)))?;
    }
    log::info!("{:<32}{:<32}", "assigning to premade regimes", centroids.len());
    let (labels, distances) = neighbors(metric, dataset, centroids).into_iter().unzip();
    Ok(Assignment { labels, distances })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Euclidean;
    use crate::Shape;
    use crate::clustering::fixtures;

    #[test]
    fn labels_follow_nearest_centroid() {
        let dataset = fixtures::pairs();
        let shape = dataset.shape();
        let centroids = vec![
            Histogram::new(shape, vec![0.5, 9.5]).unwrap(),
            Histogram::new(shape, vec![9.5, 0.5]).unwrap(),
        ];
        let a = assign(&dataset, &centroids, &Euclidean::default()).unwrap();
        assert_eq!(a.labels, vec![1, 1, 0, 0]);
        assert!(a.distances.iter().all(|d| (d - 0.5).abs() < 1e-6));
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let shape = Shape::new(1, 2);
        let x = Histogram::new(shape, vec![1., 1.]).unwrap();
        let centroids = vec![
            Histogram::new(shape, vec![2., 1.]).unwrap(),
            Histogram::new(shape, vec![1., 2.]).unwrap(),
        ];
        assert_eq!(nearest(&Euclidean::default(), &x, &centroids), (0, 1.));
    }

    #[test]
    fn rejects_foreign_centroids() {
        let dataset = fixtures::pairs();
        let centroids = vec![Histogram::new(Shape::new(1, 3), vec![1., 1., 1.]).unwrap()];
        let e = assign(&dataset, &centroids, &Euclidean::default()).unwrap_err();
        assert!(matches!(e, Error::InvalidConfig { param: "centroids", .. }));
        let e = assign(&dataset, &[], &Euclidean::default()).unwrap_err();
        assert!(e.is_config());
    }
}
