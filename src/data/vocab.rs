//! Character vocabulary for index encoding.
//!
//! Maps between characters and indices, and builds the one-hot embedding
//! matrix handed to the classifier's input layer.
//! Alphabet: 69 characters (a-z, 0-9, punctuation, newline).

use ndarray::Array2;
use std::collections::HashMap;

/// Alphabet in canonical order. A character's index is its position here.
pub const ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyz0123456789,;.!?:'\"/\\|_@#$%^&*~`+-=<>()[]{}\n";

/// Index written for characters outside the alphabet and for padding.
///
/// This is also the index of `'a'`, so the two cannot be told apart once
/// encoded.
pub const UNKNOWN_INDEX: usize = 0;

/// Character-to-index vocabulary.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Ordered list of characters in the vocabulary.
    pub chars: Vec<char>,
    /// Reverse mapping from character to index.
    pub char_to_idx: HashMap<char, usize>,
}

impl Vocabulary {
    /// Build the fixed review-text vocabulary.
    #[must_use]
    pub fn build() -> Self {
        let chars: Vec<char> = ALPHABET.chars().collect();
        let char_to_idx: HashMap<char, usize> =
            chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { chars, char_to_idx }
    }

    /// Number of characters in the vocabulary.
    #[must_use]
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    /// Get the index for a character, or `None` if not in vocabulary.
    ///
    /// Lookup is exact; callers lowercase first.
    #[must_use]
    pub fn char_to_index(&self, c: char) -> Option<usize> {
        self.char_to_idx.get(&c).copied()
    }

    /// Index for a character, falling back to [`UNKNOWN_INDEX`].
    #[must_use]
    pub fn index_or_unknown(&self, c: char) -> usize {
        self.char_to_index(c).unwrap_or(UNKNOWN_INDEX)
    }

    /// Get the character for an index, or `None` if out of bounds.
    #[must_use]
    pub fn index_to_char(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    /// One-hot embedding matrix of shape `(truncated_length, size() + 1)`.
    ///
    /// Row `i` has a single 1.0 in column `i` for every vocabulary index
    /// `1 <= i < min(truncated_length, size())`. Row 0 (unknown/padding)
    /// stays all-zero, as do rows past the end of the vocabulary.
    #[must_use]
    pub fn embedding(&self, truncated_length: usize) -> Array2<f32> {
        let width = self.size() + 1;
        let mut table = Array2::zeros((truncated_length, width));
        for idx in 1..self.size().min(truncated_length) {
            table[[idx, idx]] = 1.0;
        }
        table
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::build()
    }
}
