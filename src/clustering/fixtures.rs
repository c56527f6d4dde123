//! Deterministic datasets shared by the clustering, robustness and
//! sensitivity tests.
use crate::Dataset;
use crate::Histogram;
use crate::Shape;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Four two-bin histograms in two obvious pairs.
pub fn pairs() -> Dataset {
    Dataset::from_rows(
        Shape::new(1, 2),
        vec![
            vec![10., 0.],
            vec![9., 1.],
            vec![0., 10.],
            vec![1., 9.],
        ],
    )
    .expect("two values per row")
}

/// Three well separated regimes on the default 7x6 grid: high thick cloud,
/// low thin cloud, and mid-level cloud of moderate depth.
pub fn prototypes() -> Vec<Histogram> {
    let shape = Shape::default();
    [(0, 4), (5, 0), (3, 2)]
        .into_iter()
        .map(|(r, c)| {
            let mut values = vec![0.; shape.bins()];
            for (dr, dc) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
                values[(r + dr) * shape.cols + (c + dc)] = 20.;
            }
            Histogram::new(shape, values).expect("values fill the grid")
        })
        .collect()
}

/// `n` samples, sample `i` drawn around prototype `i % 3` with seeded noise.
pub fn blobs(n: usize) -> Dataset {
    let shape = Shape::default();
    let prototypes = prototypes();
    let points = (0..n)
        .map(|i| {
            let ref mut rng = SmallRng::seed_from_u64(i as u64);
            let values = prototypes[i % prototypes.len()]
                .values()
                .iter()
                .map(|v| v + rng.random::<f32>())
                .collect();
            Histogram::new(shape, values).expect("values fill the grid")
        })
        .collect();
    Dataset::new(shape, points)
}

/// Whether two labelings describe the same partition, up to renaming.
pub fn same_partition(a: &[usize], b: &[usize]) -> bool {
    a.len() == b.len()
        && (0..a.len())
            .flat_map(|i| (0..a.len()).map(move |j| (i, j)))
            .all(|(i, j)| (a[i] == a[j]) == (b[i] == b[j]))
}
