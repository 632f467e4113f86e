//! Epoch-based mini-batch generation over the training split.
//!
//! Batches are produced lazily: only the index order for the current epoch
//! and the batch being yielded are held in memory.

use ndarray::{Array2, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{DataError, DataResult};

/// Seed used for every shuffled epoch.
pub const SHUFFLE_SEED: u64 = 1000;

/// Configuration for iterating over a training set.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of epochs to produce.
    pub epoch_size: usize,
    /// Maximum rows per batch.
    pub batch_size: usize,
    /// Permute rows at the start of each epoch.
    pub shuffle: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            epoch_size: 1,
            batch_size: 128,
            shuffle: false,
        }
    }
}

/// Reusable source of `(batch_x, batch_y)` pairs.
///
/// Holds borrowed views of the data; each call to [`BatchGenerator::iter`]
/// starts again from the first epoch.
#[derive(Debug, Clone)]
pub struct BatchGenerator<'a, X, Y> {
    x: ArrayView2<'a, X>,
    y: ArrayView2<'a, Y>,
    config: BatchConfig,
}

impl<'a, X: Clone, Y: Clone> BatchGenerator<'a, X, Y> {
    /// # Errors
    ///
    /// Returns [`DataError::InvalidConfig`] if `batch_size` is zero, or
    /// [`DataError::ShapeMismatch`] if `x` and `y` have different row counts.
    pub fn new(x: ArrayView2<'a, X>, y: ArrayView2<'a, Y>, config: BatchConfig) -> DataResult<Self> {
        if config.batch_size == 0 {
            return Err(DataError::InvalidConfig(
                "batch_size must be positive".to_string(),
            ));
        }
        if x.nrows() != y.nrows() {
            return Err(DataError::ShapeMismatch(format!(
                "batch inputs have {} rows but targets have {}",
                x.nrows(),
                y.nrows()
            )));
        }
        Ok(Self { x, y, config })
    }

    /// Batches per epoch: `n / batch_size + 1`.
    ///
    /// When `n` is an exact multiple of `batch_size` the last batch is empty.
    #[must_use]
    pub fn batches_per_epoch(&self) -> usize {
        self.x.nrows() / self.config.batch_size + 1
    }

    /// Total batches across all epochs, or `None` if the count overflows `usize`.
    #[must_use]
    pub fn total_batches(&self) -> Option<usize> {
        self.config.epoch_size.checked_mul(self.batches_per_epoch())
    }

    /// Start a fresh pass over every epoch.
    #[must_use]
    pub fn iter(&self) -> Batches<'_, X, Y> {
        Batches {
            x: self.x.view(),
            y: self.y.view(),
            config: &self.config,
            batches_per_epoch: self.batches_per_epoch(),
            epoch: 0,
            batch: 0,
            order: Vec::new(),
        }
    }
}

impl<'g, 'a, X: Clone, Y: Clone> IntoIterator for &'g BatchGenerator<'a, X, Y> {
    type Item = (Array2<X>, Array2<Y>);
    type IntoIter = Batches<'g, X, Y>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row order for one epoch.
///
/// Shuffled orders reseed the generator each time, so every epoch and every
/// run sees the same permutation.
#[must_use]
pub fn epoch_order(n: usize, shuffle: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    if shuffle {
        let mut rng = StdRng::seed_from_u64(SHUFFLE_SEED);
        order.shuffle(&mut rng);
    }
    order
}

/// Iterator returned by [`BatchGenerator::iter`].
#[derive(Debug)]
pub struct Batches<'g, X, Y> {
    x: ArrayView2<'g, X>,
    y: ArrayView2<'g, Y>,
    config: &'g BatchConfig,
    batches_per_epoch: usize,
    epoch: usize,
    batch: usize,
    order: Vec<usize>,
}

impl<X: Clone, Y: Clone> Iterator for Batches<'_, X, Y> {
    type Item = (Array2<X>, Array2<Y>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.epoch >= self.config.epoch_size {
            return None;
        }
        let n = self.x.nrows();
        if self.batch == 0 {
            self.order = epoch_order(n, self.config.shuffle);
        }

        let start = self.batch.saturating_mul(self.config.batch_size).min(n);
        let end = (self.batch + 1).saturating_mul(self.config.batch_size).min(n);
        let rows = &self.order[start..end];
        let item = (self.x.select(Axis(0), rows), self.y.select(Axis(0), rows));

        self.batch += 1;
        if self.batch == self.batches_per_epoch {
            self.batch = 0;
            self.epoch += 1;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.epoch >= self.config.epoch_size {
            return (0, Some(0));
        }
        let remaining = (self.config.epoch_size - self.epoch)
            .checked_mul(self.batches_per_epoch)
            .map(|total| total - self.batch);
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}
