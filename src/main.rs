//! tunecluster: cluster a labeled dataset into a target number of groups.
//!
//! Reads `{"labels": [...], "features": [[...], ...]}` from `--input`, or uses
//! the built-in reference dataset, and prints the converged clusters.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tunecluster::metrics::{cluster_sizes, n_singletons};
use tunecluster::{
    DataSource, JsonFile, JsonReporter, ReferenceData, Reporter, TextReporter,
    ThresholdClustering, TunerConfig,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "tunecluster")]
#[command(about = "Threshold-count clustering that tunes itself to a target cluster count")]
#[command(version)]
struct Args {
    /// Number of clusters to produce
    target: usize,

    /// JSON dataset file (defaults to the built-in A..J reference dataset)
    #[arg(long)]
    input: Option<PathBuf>,

    /// JSON tuner configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of tuning iterations
    #[arg(long)]
    max_iter: Option<usize>,

    /// Initial match range
    #[arg(long)]
    match_range: Option<f64>,

    /// Initial required match count
    #[arg(long)]
    required_matches: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Log every tuning iteration
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str::<TunerConfig>(&contents)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => TunerConfig::default(),
    };

    let mut model = ThresholdClustering::with_config(args.target, config);
    if let Some(max_iter) = args.max_iter {
        model = model.max_iter(max_iter);
    }
    if let Some(match_range) = args.match_range {
        model = model.match_range(match_range);
    }
    if let Some(required_matches) = args.required_matches {
        model = model.required_matches(required_matches);
    }

    let source: Box<dyn DataSource> = match &args.input {
        Some(path) => Box::new(JsonFile::new(path)),
        None => Box::new(ReferenceData),
    };

    let stdout = std::io::stdout().lock();
    let mut reporter: Box<dyn Reporter> = match args.format {
        Format::Text => Box::new(TextReporter::new(stdout)),
        Format::Json => Box::new(JsonReporter::new(stdout).pretty(args.pretty)),
    };

    model
        .fit_report(source.as_ref(), reporter.as_mut())
        .context("Clustering failed")?;

    if let Some(clusters) = model.clusters.as_deref() {
        tracing::info!(
            iterations = model.history.len(),
            sizes = ?cluster_sizes(clusters),
            singletons = n_singletons(clusters),
            "clustering complete"
        );
    }

    Ok(())
}
