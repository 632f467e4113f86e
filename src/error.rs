//! Error type shared by the loader, encoders, splitter and cache.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing a dataset.
#[derive(Error, Debug)]
pub enum DataError {
    /// A file could not be opened, read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input header lacks a required column.
    #[error("missing column `{0}` in input header")]
    MissingColumn(&'static str),

    /// A `stars` value could not be coerced to an integer.
    #[error("row {row}: cannot convert stars value {value:?} to an integer")]
    InvalidStars { row: usize, value: String },

    /// A data row has more fields than the header.
    #[error("row {row}: expected at most {expected} fields, found {found}")]
    TooManyFields {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A prediction line is not a number.
    #[error("line {line}: cannot parse prediction {value:?}")]
    InvalidPrediction { line: usize, value: String },

    /// A label was not seen when the binarizer was fit.
    #[error("label {0} is not one of the fitted classes")]
    UnknownLabel(i64),

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type DataResult<T> = Result<T, DataError>;
