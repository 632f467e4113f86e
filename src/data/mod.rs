//! Review loading, character encoding, label encoding, splitting and batching.
//!
//! ## Submodules
//!
//! - [`vocab`] — Fixed character vocabulary and one-hot embedding table
//! - [`encode`] — Text cleaning and reversed index encoding
//! - [`labels`] — One-hot label binarizer
//! - [`split`] — Order-preserving train/dev/test split
//! - [`batches`] — Epoch-based mini-batch generator
//! - [`reviews`] — TSV review loader

pub mod batches;
pub mod encode;
pub mod labels;
pub mod reviews;
pub mod split;
pub mod vocab;

pub use batches::{BatchConfig, BatchGenerator, Batches};
pub use encode::{clean_text, encode_text, encode_texts, text_to_indices};
pub use labels::LabelBinarizer;
pub use reviews::{load_reviews, read_reviews, Review};
pub use split::{split_dataset, DatasetSplits, Split};
pub use vocab::Vocabulary;
