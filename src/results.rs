//! Pairing test-set truth with model predictions for reporting.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::labels::argmax_rows;
use crate::error::{DataError, DataResult};

/// One test record: true class position and the model's prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "real_values")]
    pub real_value: usize,
    #[serde(rename = "predicted_values")]
    pub predicted_value: f32,
}

/// Zip the argmax of each test label row with `predicted`.
///
/// `predicted` is read flat, in row order. The output stops at whichever
/// side runs out first.
#[must_use]
pub fn collect_results(test_y: ArrayView2<'_, i64>, predicted: &[f32]) -> Vec<ResultRow> {
    argmax_rows(test_y)
        .into_iter()
        .zip(predicted.iter().copied())
        .map(|(real_value, predicted_value)| ResultRow {
            real_value,
            predicted_value,
        })
        .collect()
}

/// Write result rows as a tab-separated table with a header.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_results(path: &Path, rows: &[ResultRow]) -> DataResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|e| DataError::io(path, e))
}

/// Read predictions, one number per line. Blank lines are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is not a number.
pub fn read_predictions(path: &Path) -> DataResult<Vec<f32>> {
    let raw = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    raw.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| {
            line.parse::<f32>().map_err(|_| DataError::InvalidPrediction {
                line: line_no,
                value: line.to_string(),
            })
        })
        .collect()
}
