//! Text-to-index conversion for the character classifier.
//!
//! Each review becomes a fixed-length row of vocabulary indices, read from the
//! end of the text backwards so the most recent characters come first.

use ndarray::{Array1, Array2};

use super::vocab::{Vocabulary, UNKNOWN_INDEX};

/// Replace every `<letter>+<letter>` sequence with a newline.
///
/// Matches are taken left to right without overlap, so `"a+b+c"` becomes
/// `"\n+c"`. Only ASCII letters count.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());

    let mut pos = 0;
    while pos < chars.len() {
        let is_match = pos + 2 < chars.len()
            && chars[pos].is_ascii_alphabetic()
            && chars[pos + 1] == '+'
            && chars[pos + 2].is_ascii_alphabetic();

        if is_match {
            result.push('\n');
            pos += 3;
        } else {
            result.push(chars[pos]);
            pos += 1;
        }
    }
    result
}

/// First `max_chars` characters of `text` (not bytes).
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_pos, _)) => &text[..byte_pos],
        None => text,
    }
}

/// Lowercase a character, keeping it only if it lowercases to a single char.
fn lower_single(c: char) -> Option<char> {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => Some(l),
        _ => None,
    }
}

/// Clean `text` and map it to a reversed, zero-padded index row of length
/// `truncated_length`.
///
/// The caller is expected to have cut the raw text to `truncated_length`
/// characters already (see [`encode_text`]); anything beyond that is ignored.
#[must_use]
pub fn text_to_indices(text: &str, vocab: &Vocabulary, truncated_length: usize) -> Array1<i64> {
    let cleaned = clean_text(text);
    let mut row = Array1::from_elem(truncated_length, UNKNOWN_INDEX as i64);

    for (slot, c) in row.iter_mut().zip(cleaned.chars().rev()) {
        *slot = lower_single(c).map_or(UNKNOWN_INDEX, |l| vocab.index_or_unknown(l)) as i64;
    }
    row
}

/// Truncate raw text to `truncated_length` characters, then encode it.
#[must_use]
pub fn encode_text(raw: &str, vocab: &Vocabulary, truncated_length: usize) -> Array1<i64> {
    text_to_indices(truncate_chars(raw, truncated_length), vocab, truncated_length)
}

/// Encode a column of texts into a `(n_texts, truncated_length)` matrix.
#[must_use]
pub fn encode_texts<'a, I>(texts: I, vocab: &Vocabulary, truncated_length: usize) -> Array2<i64>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: ExactSizeIterator,
{
    let texts = texts.into_iter();
    let mut features = Array2::zeros((texts.len(), truncated_length));
    for (mut row, text) in features.rows_mut().into_iter().zip(texts) {
        row.assign(&encode_text(text, vocab, truncated_length));
    }
    features
}
