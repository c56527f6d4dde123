//! Cloud regime classification.
//!
//! Clusters joint histograms of cloud-top pressure and optical depth into a
//! small number of discrete "cloud regimes", and measures how stable those
//! regimes are under re-initialization and under changes of k.
//!
//! ## Components
//!
//! - [`metric`] — pluggable [`Metric`] capability: [`Euclidean`] and [`Transport`]
//! - [`clustering`] — Lloyd-style relocation engine, see [`cluster`]
//! - [`robustness`] — repeated seeded trials matched by correlation, see [`assess_robustness`]
//! - [`sensitivity`] — inertia / degeneracy curve over a range of k, see [`sweep_k`]
//!
//! Data ingestion, masking and plotting live outside this crate. They hand
//! validated [`Dataset`]s in and take [`RunResult`]s, [`Robustness`] summaries
//! and [`KCurve`]s back out.
pub mod cancel;
pub mod clustering;
pub mod error;
pub mod histogram;
pub mod metric;
pub mod robustness;
pub mod sensitivity;
pub mod transport;

pub use cancel::*;
pub use clustering::*;
pub use error::*;
pub use histogram::*;
pub use metric::*;
pub use robustness::*;
pub use sensitivity::*;
pub use transport::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Distances, inertia, convergence thresholds.
pub type Energy = f32;
/// Temperature parameters and information-theoretic measures.
pub type Entropy = f32;
/// Normalized bin masses and correlation coefficients.
pub type Probability = f32;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// HISTOGRAM LAYOUT
// ISCCP-style joint histogram: cloud-top pressure rows × optical depth columns.
// ============================================================================
/// Cloud-top pressure bins (rows).
pub const ISCCP_PRESSURE_BINS: usize = 7;
/// Optical depth bins (columns).
pub const ISCCP_TAU_BINS: usize = 6;

// ============================================================================
// K-MEANS CLUSTERING
// ============================================================================
/// Hard stop on Lloyd iterations per initialization.
pub const KMEANS_MAX_ITERATIONS: usize = 300;
/// Total centroid movement at or below which a run is converged.
pub const KMEANS_TOLERANCE: Energy = 1e-4;
/// Independent initializations per clustering call; lowest inertia wins.
pub const KMEANS_N_INIT: usize = 10;
/// Default seed for reproducible initialization.
pub const KMEANS_SEED: u64 = 0;

// ============================================================================
// ROBUSTNESS TESTING
// ============================================================================
/// Seeded trials per robustness assessment.
pub const ROBUSTNESS_TRIALS: usize = 10;
/// Minimum centroid correlation for a matched pair to count as a success.
pub const ROBUSTNESS_THRESHOLD: Probability = 0.8;

// ============================================================================
// SINKHORN OPTIMAL TRANSPORT
// Entropy-regularized EMD, optional alternative to the exact solver.
// ============================================================================
/// Entropy regularization strength. Lower = closer to true EMD, higher = faster convergence.
pub const SINKHORN_TEMPERATURE: Entropy = 0.025;
/// Maximum Sinkhorn-Knopp iterations before stopping.
pub const SINKHORN_ITERATIONS: usize = 128;
/// Early stopping threshold on marginal constraint violation.
pub const SINKHORN_TOLERANCE: Energy = 0.001;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> std::io::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).map_err(std::io::Error::other)
}
