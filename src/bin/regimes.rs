//! Regimes Binary
//!
//! JSON in, JSON out wrapper around the clustering core.
//!
//! Subcommands: cluster, robustness, sweep, assign
//!
//! Type Q + Enter to stop early; every run returns its best state so far.

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use cloud_regimes::*;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Cloud regime clustering", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// JSON file with `metric`, `params`, `ground` and `robustness` sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// euclidean | transport
    #[arg(long, global = true)]
    metric: Option<String>,
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[arg(long, global = true)]
    n_init: Option<usize>,
    #[arg(long, global = true)]
    max_iterations: Option<usize>,
    #[arg(long, global = true)]
    tolerance: Option<f32>,
    /// Wall-clock budget, e.g. 30s, 5m, 2h
    #[arg(long, global = true)]
    timeout: Option<String>,
    /// Write the result here instead of stdout
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Cluster a dataset into k regimes")]
    Cluster {
        #[arg(required = true)]
        input: PathBuf,
        #[arg(short, required = true)]
        k: usize,
    },
    #[command(about = "Repeat clustering under derived seeds and match centroids", alias = "rob")]
    Robustness {
        #[arg(required = true)]
        input: PathBuf,
        #[arg(short, required = true)]
        k: usize,
        #[arg(long)]
        trials: Option<usize>,
        #[arg(long)]
        threshold: Option<f32>,
    },
    #[command(about = "Cluster once per k and report the inertia curve")]
    Sweep {
        #[arg(required = true)]
        input: PathBuf,
        /// Comma separated, e.g. 2,3,4,5
        #[arg(long, required = true, value_delimiter = ',')]
        ks: Vec<usize>,
    },
    #[command(about = "Label a dataset with premade centroids")]
    Assign {
        #[arg(required = true)]
        input: PathBuf,
        /// JSON array of row-major centroid value arrays
        #[arg(long, required = true)]
        centroids: PathBuf,
    },
}

/// Contents of a `--config` file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    metric: MetricKind,
    params: Params,
    ground: Ground,
    robustness: RobustnessParams,
}

impl Args {
    /// Config file, then flags on top.
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match self.config {
            Some(ref path) => serde_json::from_str::<Config>(&read(path)?)
                .with_context(|| format!("parsing config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(ref metric) = self.metric {
            config.metric = metric.parse()?;
        }
        if let Some(seed) = self.seed {
            config.params.seed = seed;
        }
        if let Some(n_init) = self.n_init {
            config.params.n_init = n_init;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.params.max_iterations = max_iterations;
        }
        if let Some(tolerance) = self.tolerance {
            config.params.tolerance = tolerance;
        }
        Ok(config)
    }
    fn cancel(&self) -> anyhow::Result<Cancel> {
        let cancel = match self.timeout {
            Some(ref timeout) => parse_duration(timeout)
                .map(Cancel::after)
                .with_context(|| format!("invalid timeout {:?}, expected e.g. 30s, 5m, 2h", timeout))?,
            None => Cancel::new(),
        };
        brb(&cancel);
        Ok(cancel)
    }
    fn write<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<()> {
        match self.output {
            Some(ref path) => {
                let file = std::fs::File::create(path)
                    .with_context(|| format!("creating {}", path.display()))?;
                serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
                log::info!("{:<32}{:<32}", "wrote result", path.display());
            }
            None => println!("{}", serde_json::to_string_pretty(value)?),
        }
        Ok(())
    }
}

/// Trips `cancel` when the user types Q + Enter.
fn brb(cancel: &Cancel) {
    let cancel = cancel.clone();
    std::thread::spawn(move || {
        loop {
            let ref mut buffer = String::new();
            match std::io::stdin().read_line(buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) if buffer.trim().to_uppercase() == "Q" => {
                    log::warn!("graceful interrupt requested, finishing current iteration...");
                    cancel.cancel();
                    break;
                }
                Ok(_) => continue,
            }
        }
    });
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn dataset(path: &Path) -> anyhow::Result<Dataset> {
    let dataset = serde_json::from_str::<Dataset>(&read(path)?)
        .with_context(|| format!("parsing dataset {}", path.display()))?;
    log::info!(
        "{:<32}{:<32}",
        "loaded dataset",
        format!("{} samples of shape {}", dataset.len(), dataset.shape())
    );
    Ok(dataset)
}

fn main() -> anyhow::Result<()> {
    log()?;
    let args = Args::parse();
    let config = args.config()?;
    match args.command {
        Command::Cluster { ref input, k } => {
            let dataset = dataset(input)?;
            let metric = Distance::build(config.metric, dataset.shape(), &config.ground);
            let run = cluster(&dataset, k, &metric, &config.params, &args.cancel()?)?;
            args.write(&run)
        }
        Command::Robustness {
            ref input,
            k,
            trials,
            threshold,
        } => {
            let dataset = dataset(input)?;
            let metric = Distance::build(config.metric, dataset.shape(), &config.ground);
            let robustness = RobustnessParams {
                trial_count: trials.unwrap_or(config.robustness.trial_count),
                correlation_threshold: threshold.unwrap_or(config.robustness.correlation_threshold),
            };
            let summary = assess_robustness(
                &dataset,
                k,
                &metric,
                &config.params,
                &robustness,
                &args.cancel()?,
            )?;
            args.write(&summary)
        }
        Command::Sweep { ref input, ref ks } => {
            let dataset = dataset(input)?;
            let metric = Distance::build(config.metric, dataset.shape(), &config.ground);
            let curve = sweep_k(&dataset, ks, &metric, &config.params, &args.cancel()?)?;
            args.write(&curve)
        }
        Command::Assign {
            ref input,
            ref centroids,
        } => {
            let dataset = dataset(input)?;
            let metric = Distance::build(config.metric, dataset.shape(), &config.ground);
            let centroids = serde_json::from_str::<Vec<Vec<f32>>>(&read(centroids)?)
                .with_context(|| format!("parsing centroids {}", centroids.display()))?
                .into_iter()
                .map(|row| Histogram::new(dataset.shape(), row))
                .collect::<Result<Vec<_>, _>>()?;
            let assignment = assign(&dataset, &centroids, &metric)?;
            args.write(&assignment)
        }
    }
}
