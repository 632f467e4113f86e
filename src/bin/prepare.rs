//! Dataset preparation binary.
//!
//! Encodes a review TSV (or reuses the cache), splits it, and reports the
//! split shapes and the batch schedule a training loop would see.

use anyhow::{Context, Result};
use charcnn::cache::DatasetCache;
use charcnn::pipeline::{load_or_encode, split};
use charcnn::{BatchConfig, BatchGenerator, PrepareConfig};
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "charcnn-prepare",
    about = "Encode review text into character-index matrices and split them"
)]
struct Args {
    /// Tab-separated review file with `text` and `stars` columns
    #[arg(long, default_value = "data/reviews.tsv")]
    data_path: PathBuf,

    /// Directory for dataset_x.json, dataset_y.json and vocab.json
    #[arg(long, default_value = ".")]
    cache_dir: PathBuf,

    /// Characters kept per review
    #[arg(long, default_value_t = 1014)]
    truncated_length: usize,

    /// Fraction of rows used for training
    #[arg(long, default_value_t = 0.8)]
    train_set_ratio: f64,

    /// Rows held out for dev after the training rows
    #[arg(long, default_value_t = 600)]
    dev_set_size: usize,

    /// Re-encode even if a complete cache exists
    #[arg(long, default_value_t = false)]
    no_cache: bool,

    /// Epochs in the reported batch schedule
    #[arg(long, default_value_t = 1)]
    epochs: usize,

    /// Mini-batch size
    #[arg(long, default_value_t = 128)]
    batch_size: usize,

    /// Shuffle training rows each epoch (fixed seed)
    #[arg(long, default_value_t = false)]
    shuffle: bool,
}

impl Args {
    fn prepare_config(&self) -> PrepareConfig {
        PrepareConfig {
            data_path: self.data_path.clone(),
            cache_dir: self.cache_dir.clone(),
            truncated_length: self.truncated_length,
            train_set_ratio: self.train_set_ratio,
            dev_set_size: self.dev_set_size,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.prepare_config();
    config.validate().context("invalid preparation parameters")?;

    let cache = DatasetCache::new(&config.cache_dir);
    if args.no_cache {
        info!("Ignoring any cached index set");
    }
    let (dataset, from_cache) = if args.no_cache {
        let (dataset, _) = load_or_encode(&config, None)
            .with_context(|| format!("failed to encode {}", config.data_path.display()))?;
        cache.save(&dataset).context("failed to write cache")?;
        (dataset, false)
    } else {
        load_or_encode(&config, Some(&cache))
            .with_context(|| format!("failed to prepare {}", config.data_path.display()))?
    };

    info!(
        "{} reviews, {} classes {:?}, embedding {:?}{}",
        dataset.len(),
        dataset.classes.len(),
        dataset.classes,
        dataset.embedding.dim(),
        if from_cache { " (cached)" } else { "" }
    );

    let splits = split(&dataset, &config)?;

    let batch_config = BatchConfig {
        epoch_size: args.epochs,
        batch_size: args.batch_size,
        shuffle: args.shuffle,
    };
    let batches = BatchGenerator::new(splits.train.x.view(), splits.train.y.view(), batch_config)
        .context("invalid batch parameters")?;
    println!(
        "train={} dev={} test={} batches/epoch={} total_batches={}",
        splits.train.len(),
        splits.dev.len(),
        splits.test.len(),
        batches.batches_per_epoch(),
        batches
            .total_batches()
            .map_or_else(|| "overflow".to_string(), |n| n.to_string())
    );

    Ok(())
}
