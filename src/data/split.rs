//! Deterministic train/dev/test partitioning.

use ndarray::{s, Array2, ArrayView2};

use crate::error::{DataError, DataResult};

/// One partition of the encoded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub x: Array2<i64>,
    pub y: Array2<i64>,
}

impl Split {
    /// Number of records in this partition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(x: &ArrayView2<'_, i64>, y: &ArrayView2<'_, i64>, start: usize, end: usize) -> Self {
        Self {
            x: x.slice(s![start..end, ..]).to_owned(),
            y: y.slice(s![start..end, ..]).to_owned(),
        }
    }
}

/// Train, dev and test partitions, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplits {
    pub train: Split,
    pub dev: Split,
    pub test: Split,
}

/// Row index where the training partition ends: `floor(n * train_set_ratio)`.
#[must_use]
pub fn train_split_point(n: usize, train_set_ratio: f64) -> usize {
    ((n as f64) * train_set_ratio).floor() as usize
}

/// Split `x`/`y` into train, dev and test without shuffling.
///
/// Train takes the first `floor(n * train_set_ratio)` rows, dev the next
/// `dev_set_size` rows and test whatever is left. A dev size larger than the
/// remainder leaves test empty.
///
/// # Errors
///
/// Returns [`DataError::ShapeMismatch`] if `x` and `y` have different row
/// counts, or [`DataError::InvalidConfig`] if `train_set_ratio` is not in `(0, 1)`.
pub fn split_dataset(
    x: ArrayView2<'_, i64>,
    y: ArrayView2<'_, i64>,
    train_set_ratio: f64,
    dev_set_size: usize,
) -> DataResult<DatasetSplits> {
    if x.nrows() != y.nrows() {
        return Err(DataError::ShapeMismatch(format!(
            "features have {} rows but labels have {}",
            x.nrows(),
            y.nrows()
        )));
    }
    if !(train_set_ratio > 0.0 && train_set_ratio < 1.0) {
        return Err(DataError::InvalidConfig(format!(
            "train_set_ratio must be in (0, 1), got {train_set_ratio}"
        )));
    }

    let n = x.nrows();
    let train_end = train_split_point(n, train_set_ratio);
    let dev_end = train_end + dev_set_size.min(n - train_end);

    Ok(DatasetSplits {
        train: Split::rows(&x, &y, 0, train_end),
        dev: Split::rows(&x, &y, train_end, dev_end),
        test: Split::rows(&x, &y, dev_end, n),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{concatenate, Axis};

    fn numbered(n: usize) -> (Array2<i64>, Array2<i64>) {
        let x = Array2::from_shape_fn((n, 3), |(r, c)| (r * 10 + c) as i64);
        let y = Array2::from_shape_fn((n, 2), |(r, c)| ((r + c) % 2) as i64);
        (x, y)
    }

    #[test]
    fn test_split_sizes() {
        let (x, y) = numbered(1000);
        let splits = split_dataset(x.view(), y.view(), 0.8, 60).expect("split");
        assert_eq!(splits.train.len(), 800);
        assert_eq!(splits.dev.len(), 60);
        assert_eq!(splits.test.len(), 140);
    }

    #[test]
    fn test_split_floors_train_size() {
        let (x, y) = numbered(7);
        let splits = split_dataset(x.view(), y.view(), 0.5, 1).expect("split");
        assert_eq!(splits.train.len(), 3);
        assert_eq!(splits.dev.len(), 1);
        assert_eq!(splits.test.len(), 3);
    }

    #[test]
    fn test_split_preserves_order() {
        for n in [0, 1, 2, 5, 17, 100] {
            for ratio in [0.1, 0.5, 0.8, 0.99] {
                for dev in [0, 1, 3, 600] {
                    let (x, y) = numbered(n);
                    let splits = split_dataset(x.view(), y.view(), ratio, dev).expect("split");
                    assert_eq!(
                        splits.train.len() + splits.dev.len() + splits.test.len(),
                        n
                    );
                    let joined_x = concatenate(
                        Axis(0),
                        &[splits.train.x.view(), splits.dev.x.view(), splits.test.x.view()],
                    )
                    .expect("same width");
                    let joined_y = concatenate(
                        Axis(0),
                        &[splits.train.y.view(), splits.dev.y.view(), splits.test.y.view()],
                    )
                    .expect("same width");
                    assert_eq!(joined_x, x);
                    assert_eq!(joined_y, y);
                }
            }
        }
    }

    #[test]
    fn test_dev_larger_than_remainder() {
        let (x, y) = numbered(10);
        let splits = split_dataset(x.view(), y.view(), 0.8, 600).expect("split");
        assert_eq!(splits.train.len(), 8);
        assert_eq!(splits.dev.len(), 2);
        assert!(splits.test.is_empty());
        assert_eq!(splits.test.x.ncols(), 3);
    }

    #[test]
    fn test_empty_dataset() {
        let (x, y) = numbered(0);
        let splits = split_dataset(x.view(), y.view(), 0.8, 600).expect("split");
        assert!(splits.train.is_empty());
        assert!(splits.dev.is_empty());
        assert!(splits.test.is_empty());
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let (x, y) = numbered(4);
        for ratio in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let result = split_dataset(x.view(), y.view(), ratio, 0);
            assert!(matches!(result, Err(DataError::InvalidConfig(_))), "{ratio}");
        }
    }

    #[test]
    fn test_rejects_row_mismatch() {
        let (x, _) = numbered(4);
        let (_, y) = numbered(3);
        let result = split_dataset(x.view(), y.view(), 0.5, 0);
        assert!(matches!(result, Err(DataError::ShapeMismatch(_))));
    }
}
