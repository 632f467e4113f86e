//! Result export binary.
//!
//! Pairs the true class of every test-set review with an externally produced
//! prediction and writes them as a TSV table.

use anyhow::{bail, Context, Result};
use charcnn::results::{collect_results, read_predictions, write_results};
use charcnn::{prepare, PrepareConfig};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "charcnn-export",
    about = "Write test-set true classes next to model predictions"
)]
struct Args {
    /// Predictions for the test split, one value per line
    #[arg(long)]
    predictions: PathBuf,

    /// Output TSV path
    #[arg(long, default_value = "results.tsv")]
    output: PathBuf,

    /// Tab-separated review file (used only if the cache is incomplete)
    #[arg(long, default_value = "data/reviews.tsv")]
    data_path: PathBuf,

    /// Directory holding the cached matrices
    #[arg(long, default_value = ".")]
    cache_dir: PathBuf,

    /// Characters kept per review (must match the cache)
    #[arg(long, default_value_t = 1014)]
    truncated_length: usize,

    /// Fraction of rows used for training
    #[arg(long, default_value_t = 0.8)]
    train_set_ratio: f64,

    /// Rows held out for dev after the training rows
    #[arg(long, default_value_t = 600)]
    dev_set_size: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = PrepareConfig {
        data_path: args.data_path,
        cache_dir: args.cache_dir,
        truncated_length: args.truncated_length,
        train_set_ratio: args.train_set_ratio,
        dev_set_size: args.dev_set_size,
    };

    let prepared = prepare(&config).context("failed to prepare dataset")?;
    let test = &prepared.splits.test;
    if test.is_empty() {
        bail!("test split is empty; lower --dev-set-size or --train-set-ratio");
    }

    let predicted = read_predictions(&args.predictions)
        .with_context(|| format!("failed to read {}", args.predictions.display()))?;
    if predicted.len() != test.len() {
        warn!(
            "{} predictions for {} test rows; extra entries are ignored",
            predicted.len(),
            test.len()
        );
    }

    let rows = collect_results(test.y.view(), &predicted);
    write_results(&args.output, &rows)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("Wrote {} rows to {}", rows.len(), args.output.display());

    Ok(())
}
