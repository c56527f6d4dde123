criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        computing_euclidean_distance,
        computing_optimal_transport_exact,
        computing_optimal_transport_sinkhorns,
        clustering_kmeans_euclidean,
        clustering_kmeans_transport,
}

fn computing_euclidean_distance(c: &mut criterion::Criterion) {
    let ref h1 = Histogram::random();
    let ref h2 = Histogram::random();
    let metric = Euclidean::default();
    c.bench_function("compute squared euclidean distance (7x6)", |b| {
        b.iter(|| metric.distance(h1, h2))
    });
}

fn computing_optimal_transport_exact(c: &mut criterion::Criterion) {
    let ref h1 = Histogram::random();
    let ref h2 = Histogram::random();
    let metric = Transport::new(h1.shape(), &Ground::default());
    c.bench_function("compute optimal transport (exact)", |b| {
        b.iter(|| metric.distance(h1, h2))
    });
}

fn computing_optimal_transport_sinkhorns(c: &mut criterion::Criterion) {
    let ref h1 = Histogram::random();
    let ref h2 = Histogram::random();
    let metric = Transport::new(h1.shape(), &Ground::default())
        .with_solver(Solver::Sinkhorn(Entropic::default()));
    c.bench_function("compute optimal transport (sinkhorn)", |b| {
        b.iter(|| metric.distance(h1, h2))
    });
}

fn clustering_kmeans_euclidean(c: &mut criterion::Criterion) {
    let ref dataset = dataset(512);
    let params = Params::default().with_n_init(1);
    let metric = Euclidean::default();
    c.bench_function("cluster 512 histograms (euclidean, k=8)", |b| {
        b.iter(|| cluster(dataset, 8, &metric, &params, &Cancel::new()))
    });
}

fn clustering_kmeans_transport(c: &mut criterion::Criterion) {
    let ref dataset = dataset(64);
    let params = Params::default().with_n_init(1);
    let metric = Transport::new(dataset.shape(), &Ground::default());
    c.bench_function("cluster 64 histograms (transport, k=4)", |b| {
        b.iter(|| cluster(dataset, 4, &metric, &params, &Cancel::new()))
    });
}

fn dataset(n: usize) -> Dataset {
    let shape = Shape::default();
    Dataset::new(shape, (0..n).map(|_| Histogram::random()).collect())
}

use cloud_regimes::Arbitrary;
use cloud_regimes::Cancel;
use cloud_regimes::Dataset;
use cloud_regimes::Entropic;
use cloud_regimes::Euclidean;
use cloud_regimes::Ground;
use cloud_regimes::Histogram;
use cloud_regimes::Metric;
use cloud_regimes::Params;
use cloud_regimes::Shape;
use cloud_regimes::Solver;
use cloud_regimes::Transport;
use cloud_regimes::cluster;
