//! # charcnn
//!
//! Dataset preparation for character-level review classifiers.
//!
//! ## Overview
//!
//! Reviews are read from a TSV file, each text is encoded as a fixed-length
//! row of character indices (read back to front, so the end of the review
//! comes first), star ratings are one-hot encoded, and the result is split
//! into train/dev/test partitions without reordering.
//!
//! ```text
//! reviews.tsv ─► Vocabulary ─► encode_texts ─► features ┐
//!             └► LabelBinarizer ───────────────► labels ┴► split_dataset ─► train/dev/test
//!                                                                 train ─► BatchGenerator
//! ```
//!
//! ## Structure
//!
//! - [`data`] — Vocabulary, encoders, splitter, batch generator, loader
//! - [`cache`] — JSON cache of encoded matrices
//! - [`pipeline`] — Load-or-encode and split in one call
//! - [`results`] — Test-set result export

pub mod cache;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod results;

use ndarray::Array2;
use std::path::PathBuf;

pub use cache::DatasetCache;
pub use data::{BatchConfig, BatchGenerator, DatasetSplits, LabelBinarizer, Review, Split, Vocabulary};
pub use error::{DataError, DataResult};
pub use pipeline::{prepare, PreparedData};

/// Preparation parameters.
///
/// Used by [`pipeline::prepare`] and the `charcnn-prepare` binary.
#[derive(Debug, Clone)]
pub struct PrepareConfig {
    /// Tab-separated input with `text` and `stars` columns.
    pub data_path: PathBuf,
    /// Directory holding the cached matrices.
    pub cache_dir: PathBuf,
    /// Characters kept per review.
    pub truncated_length: usize,
    /// Fraction of rows assigned to training, in `(0, 1)`.
    pub train_set_ratio: f64,
    /// Rows assigned to dev after the training rows.
    pub dev_set_size: usize,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/reviews.tsv"),
            cache_dir: PathBuf::from("."),
            truncated_length: 1014,
            train_set_ratio: 0.8,
            dev_set_size: 600,
        }
    }
}

impl PrepareConfig {
    /// # Errors
    ///
    /// Returns [`DataError::InvalidConfig`] for a zero `truncated_length` or a
    /// `train_set_ratio` outside `(0, 1)`.
    pub fn validate(&self) -> DataResult<()> {
        if self.truncated_length == 0 {
            return Err(DataError::InvalidConfig(
                "truncated_length must be positive".to_string(),
            ));
        }
        if !(self.train_set_ratio > 0.0 && self.train_set_ratio < 1.0) {
            return Err(DataError::InvalidConfig(format!(
                "train_set_ratio must be in (0, 1), got {}",
                self.train_set_ratio
            )));
        }
        Ok(())
    }
}

/// Encoded matrices for a whole dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedDataset {
    /// `(n_reviews, truncated_length)` character indices.
    pub features: Array2<i64>,
    /// `(n_reviews, classes.len())` one-hot labels.
    pub labels: Array2<i64>,
    /// Star value for each label column, ascending.
    pub classes: Vec<i64>,
    /// `(truncated_length, vocab_size + 1)` one-hot character table.
    pub embedding: Array2<f32>,
}

impl EncodedDataset {
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Binarizer matching this dataset's label columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored classes are not sorted and distinct.
    pub fn binarizer(&self) -> DataResult<LabelBinarizer> {
        LabelBinarizer::from_classes(self.classes.clone())
    }
}
