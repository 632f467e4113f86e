//! On-disk cache for encoded datasets.
//!
//! Three JSON files in a cache directory hold the feature matrix, the label
//! matrix (with its class order) and the character embedding. The cache is
//! trusted if all three files exist; their contents are not checked against
//! the current `truncated_length` or input file.

use log::debug;
use ndarray::Array2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DataError, DataResult};
use crate::EncodedDataset;

pub const FEATURES_FILE: &str = "dataset_x.json";
pub const LABELS_FILE: &str = "dataset_y.json";
pub const EMBEDDING_FILE: &str = "vocab.json";

/// Serializable 2-D array. The shape is kept explicitly so empty matrices
/// keep their column count.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredMatrix<T> {
    pub rows: usize,
    pub cols: usize,
    /// Row-major values, one nested Vec per row.
    pub values: Vec<Vec<T>>,
}

impl<T: Clone> StoredMatrix<T> {
    fn from_array(arr: &Array2<T>) -> Self {
        Self {
            rows: arr.nrows(),
            cols: arr.ncols(),
            values: arr.rows().into_iter().map(|row| row.to_vec()).collect(),
        }
    }

    fn into_array(self) -> DataResult<Array2<T>> {
        if self.values.len() != self.rows || self.values.iter().any(|r| r.len() != self.cols) {
            return Err(DataError::ShapeMismatch(format!(
                "stored matrix does not match its declared shape ({}, {})",
                self.rows, self.cols
            )));
        }
        let flat: Vec<T> = self.values.into_iter().flatten().collect();
        Array2::from_shape_vec((self.rows, self.cols), flat)
            .map_err(|e| DataError::ShapeMismatch(e.to_string()))
    }
}

/// Label matrix together with the class each column stands for.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredLabels {
    pub classes: Vec<i64>,
    pub matrix: StoredMatrix<i64>,
}

/// Cache directory holding the three dataset files.
#[derive(Debug, Clone)]
pub struct DatasetCache {
    dir: PathBuf,
}

impl DatasetCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn features_path(&self) -> PathBuf {
        self.dir.join(FEATURES_FILE)
    }

    #[must_use]
    pub fn labels_path(&self) -> PathBuf {
        self.dir.join(LABELS_FILE)
    }

    #[must_use]
    pub fn embedding_path(&self) -> PathBuf {
        self.dir.join(EMBEDDING_FILE)
    }

    /// True when all three cache files exist.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [self.features_path(), self.labels_path(), self.embedding_path()]
            .iter()
            .all(|p| p.is_file())
    }

    /// Write the dataset to the cache directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or any file cannot be written.
    pub fn save(&self, dataset: &EncodedDataset) -> DataResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| DataError::io(&self.dir, e))?;

        write_json(&self.features_path(), &StoredMatrix::from_array(&dataset.features))?;
        write_json(
            &self.labels_path(),
            &StoredLabels {
                classes: dataset.classes.clone(),
                matrix: StoredMatrix::from_array(&dataset.labels),
            },
        )?;
        write_json(&self.embedding_path(), &StoredMatrix::from_array(&dataset.embedding))?;

        debug!("Saved encoded dataset to {}", self.dir.display());
        Ok(())
    }

    /// Read a previously saved dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing, unreadable, or malformed.
    pub fn load(&self) -> DataResult<EncodedDataset> {
        let features: StoredMatrix<i64> = read_json(&self.features_path())?;
        let labels: StoredLabels = read_json(&self.labels_path())?;
        let embedding: StoredMatrix<f32> = read_json(&self.embedding_path())?;

        let dataset = EncodedDataset {
            features: features.into_array()?,
            labels: labels.matrix.into_array()?,
            classes: labels.classes,
            embedding: embedding.into_array()?,
        };
        if dataset.features.nrows() != dataset.labels.nrows() {
            return Err(DataError::ShapeMismatch(format!(
                "cached features have {} rows but labels have {}",
                dataset.features.nrows(),
                dataset.labels.nrows()
            )));
        }
        debug!("Loaded encoded dataset from {}", self.dir.display());
        Ok(dataset)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> DataResult<()> {
    let json = serde_json::to_string(value)?;
    std::fs::write(path, json).map_err(|e| DataError::io(path, e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> DataResult<T> {
    let json = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
    Ok(serde_json::from_str(&json)?)
}
