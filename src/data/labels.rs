//! One-hot label encoding for star ratings.

use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Maps integer class labels to one-hot rows.
///
/// Fit once over the whole label column so the class order (sorted distinct
/// values) does not depend on how the data is later split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelBinarizer {
    classes: Vec<i64>,
}

impl LabelBinarizer {
    /// Fit on every label in the dataset.
    #[must_use]
    pub fn fit(labels: &[i64]) -> Self {
        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();
        Self { classes }
    }

    /// Rebuild a binarizer from a known class order.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidConfig`] if `classes` is not strictly ascending.
    pub fn from_classes(classes: Vec<i64>) -> DataResult<Self> {
        if classes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(DataError::InvalidConfig(format!(
                "label classes must be sorted and distinct, got {classes:?}"
            )));
        }
        Ok(Self { classes })
    }

    /// Fitted classes; column `j` of every one-hot row stands for `classes()[j]`.
    #[must_use]
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Number of columns in a transformed row.
    #[must_use]
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Column position of a label, if it was seen during fitting.
    #[must_use]
    pub fn position(&self, label: i64) -> Option<usize> {
        self.classes.binary_search(&label).ok()
    }

    /// One-hot encode `labels` into a `(labels.len(), num_classes())` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::UnknownLabel`] for a label outside the fitted classes.
    pub fn transform(&self, labels: &[i64]) -> DataResult<Array2<i64>> {
        let mut encoded = Array2::zeros((labels.len(), self.num_classes()));
        for (row, &label) in labels.iter().enumerate() {
            let col = self.position(label).ok_or(DataError::UnknownLabel(label))?;
            encoded[[row, col]] = 1;
        }
        Ok(encoded)
    }

    /// Fit on `labels` and encode them in one step.
    ///
    /// Rows stay one-hot even with a single class, which gives one column of 1s.
    #[must_use]
    pub fn fit_transform(labels: &[i64]) -> (Self, Array2<i64>) {
        let binarizer = Self::fit(labels);
        let mut encoded = Array2::zeros((labels.len(), binarizer.num_classes()));
        for (row, &label) in labels.iter().enumerate() {
            if let Some(col) = binarizer.position(label) {
                encoded[[row, col]] = 1;
            }
        }
        (binarizer, encoded)
    }

    /// Recover the class value of each row via argmax.
    ///
    /// Rows of all zeros (or a matrix with no columns) yield `None`.
    #[must_use]
    pub fn inverse_transform(&self, encoded: ArrayView2<'_, i64>) -> Vec<Option<i64>> {
        encoded
            .rows()
            .into_iter()
            .map(|row| {
                argmax(row)
                    .filter(|&col| row[col] > 0)
                    .and_then(|col| self.classes.get(col).copied())
            })
            .collect()
    }
}

/// Position of the largest value in a row; the first one wins on ties.
#[must_use]
pub fn argmax(row: ArrayView1<'_, i64>) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (i, &v) in row.iter().enumerate() {
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Argmax of every row of a one-hot matrix. Empty rows map to 0.
#[must_use]
pub fn argmax_rows(encoded: ArrayView2<'_, i64>) -> Vec<usize> {
    encoded
        .rows()
        .into_iter()
        .map(|row| argmax(row).unwrap_or(0))
        .collect()
}
