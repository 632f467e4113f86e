//! Review loading from tab-separated files.

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use std::io::Read;
use std::path::Path;

use crate::error::{DataError, DataResult};

/// One labeled review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub text: String,
    pub stars: i64,
}

impl Review {
    pub fn new(text: impl Into<String>, stars: i64) -> Self {
        Self {
            text: text.into(),
            stars,
        }
    }
}

/// Coerce a `stars` cell to an integer.
///
/// Accepts plain integers and finite decimals (`"4.0"` becomes 4, fractions
/// are truncated toward zero).
fn parse_stars(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
}

/// Cell values read as missing, in addition to the empty string.
const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NA_VALUES.contains(&cell)
}

fn column(headers: &StringRecord, name: &'static str) -> DataResult<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(DataError::MissingColumn(name))
}

/// Read reviews from any TSV source with a header row.
///
/// Only the `text` and `stars` columns are used. Rows where either cell is
/// empty, absent, or one of the usual NA markers (`NA`, `nan`, `null`, ...)
/// are dropped.
///
/// # Errors
///
/// Fails on malformed TSV, a missing column, a row with more fields than the
/// header, or a `stars` value that is not numeric.
pub fn read_reviews<R: Read>(source: R) -> DataResult<Vec<Review>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let text_col = column(&headers, "text")?;
    let stars_col = column(&headers, "stars")?;

    let mut reviews = Vec::new();
    let mut dropped = 0usize;
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(DataError::TooManyFields {
                row: row + 1,
                found: record.len(),
                expected: headers.len(),
            });
        }
        let text = record.get(text_col).filter(|t| !is_missing(t));
        let stars = record
            .get(stars_col)
            .map(str::trim)
            .filter(|s| !is_missing(s));

        let (Some(text), Some(stars)) = (text, stars) else {
            dropped += 1;
            continue;
        };
        let stars = parse_stars(stars).ok_or_else(|| DataError::InvalidStars {
            row: row + 1,
            value: stars.to_string(),
        })?;
        reviews.push(Review::new(text, stars));
    }

    if dropped > 0 {
        debug!("Dropped {dropped} rows with missing text or stars");
    }
    Ok(reviews)
}

/// Load reviews from a TSV file.
///
/// # Errors
///
/// Returns [`DataError::Io`] if the file cannot be opened, plus any error
/// from [`read_reviews`].
pub fn load_reviews(path: &Path) -> DataResult<Vec<Review>> {
    info!("Load dataset from {}", path.display());
    let file = std::fs::File::open(path).map_err(|e| DataError::io(path, e))?;
    let reviews = read_reviews(file)?;
    info!("Loaded {} reviews", reviews.len());
    Ok(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_basic() {
        let tsv = "text\tstars\ngreat food\t5\nbad service\t1\n";
        let reviews = read_reviews(tsv.as_bytes()).expect("read");
        assert_eq!(
            reviews,
            vec![Review::new("great food", 5), Review::new("bad service", 1)]
        );
    }

    #[test]
    fn test_extra_columns_and_order() {
        let tsv = "review_id\tstars\tuseful\ttext\nr1\t4\t0\tnice\n";
        let reviews = read_reviews(tsv.as_bytes()).expect("read");
        assert_eq!(reviews, vec![Review::new("nice", 4)]);
    }

    #[test]
    fn test_drops_missing_values() {
        let tsv = "text\tstars\n\t5\nno stars\t\nshort row\nkept\t3\n";
        let reviews = read_reviews(tsv.as_bytes()).expect("read");
        assert_eq!(reviews, vec![Review::new("kept", 3)]);
    }

    #[test]
    fn test_na_stars_are_dropped() {
        let tsv = "text\tstars\nkept\t4\nmissing rating\tNA\nalso missing\tnan\nnull rating\tnull\n";
        let reviews = read_reviews(tsv.as_bytes()).expect("read");
        assert_eq!(reviews, vec![Review::new("kept", 4)]);
    }

    #[test]
    fn test_na_text_is_dropped() {
        let tsv = "text\tstars\nNA\t4\nnull\t2\n<NA>\t1\nN/A\t5\nkept\t3\n";
        let reviews = read_reviews(tsv.as_bytes()).expect("read");
        assert_eq!(reviews, vec![Review::new("kept", 3)]);
    }

    #[test]
    fn test_na_markers_inside_text_are_kept() {
        let tsv = "text\tstars\nNA is fine\t4\nnone\t2\n";
        let reviews = read_reviews(tsv.as_bytes()).expect("read");
        assert_eq!(reviews.len(), 2);
    }

    #[test]
    fn test_too_many_fields_is_error() {
        let tsv = "text\tstars\nfine\t5\nextra\t4\tsurprise\n";
        let err = read_reviews(tsv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataError::TooManyFields {
                row: 2,
                found: 3,
                expected: 2
            }
        ));
    }

    #[test]
    fn test_decimal_stars() {
        let tsv = "text\tstars\nok\t4.0\nmeh\t2.7\n";
        let reviews = read_reviews(tsv.as_bytes()).expect("read");
        assert_eq!(reviews[0].stars, 4);
        assert_eq!(reviews[1].stars, 2);
    }

    #[test]
    fn test_invalid_stars_is_error() {
        let tsv = "text\tstars\nfine\t5\nbroken\tfive\n";
        let err = read_reviews(tsv.as_bytes()).unwrap_err();
        match err {
            DataError::InvalidStars { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "five");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_column() {
        let tsv = "body\tstars\nhello\t5\n";
        let err = read_reviews(tsv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn("text")));
    }

    #[test]
    fn test_quoted_text_keeps_tabs_and_newlines() {
        let tsv = "text\tstars\n\"line one\nline\ttwo\"\t5\n";
        let reviews = read_reviews(tsv.as_bytes()).expect("read");
        assert_eq!(reviews[0].text, "line one\nline\ttwo");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_reviews(Path::new("/nonexistent/reviews.tsv"));
        assert!(matches!(result, Err(DataError::Io { .. })));
    }
}
