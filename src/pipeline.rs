//! End-to-end preparation: load, encode (or reuse the cache), split.

use log::info;

use crate::cache::DatasetCache;
use crate::data::encode::encode_texts;
use crate::data::labels::LabelBinarizer;
use crate::data::reviews::{load_reviews, Review};
use crate::data::split::{split_dataset, DatasetSplits};
use crate::data::vocab::Vocabulary;
use crate::error::DataResult;
use crate::{EncodedDataset, PrepareConfig};

/// Encoded dataset plus its train/dev/test partitions.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub dataset: EncodedDataset,
    pub splits: DatasetSplits,
    /// True when the encoded matrices came from the cache.
    pub from_cache: bool,
}

/// Encode in-memory reviews into features, labels and the embedding table.
#[must_use]
pub fn encode_reviews(
    reviews: &[Review],
    vocab: &Vocabulary,
    truncated_length: usize,
) -> EncodedDataset {
    let features = encode_texts(
        reviews.iter().map(|r| r.text.as_str()),
        vocab,
        truncated_length,
    );

    let stars: Vec<i64> = reviews.iter().map(|r| r.stars).collect();
    let (binarizer, labels) = LabelBinarizer::fit_transform(&stars);

    EncodedDataset {
        features,
        labels,
        classes: binarizer.classes().to_vec(),
        embedding: vocab.embedding(truncated_length),
    }
}

/// Load the encoded dataset from `cache` if it is complete, otherwise read
/// the input file, encode it and write the cache.
///
/// Returns the dataset and whether it came from the cache.
///
/// # Errors
///
/// Propagates loader, encoder and cache I/O failures.
pub fn load_or_encode(
    config: &PrepareConfig,
    cache: Option<&DatasetCache>,
) -> DataResult<(EncodedDataset, bool)> {
    if let Some(cache) = cache.filter(|c| c.is_complete()) {
        info!("Load existing index set from {}", cache.dir().display());
        return Ok((cache.load()?, true));
    }

    let reviews = load_reviews(&config.data_path)?;
    info!("Converting text to index");
    let vocab = Vocabulary::build();
    let dataset = encode_reviews(&reviews, &vocab, config.truncated_length);

    if let Some(cache) = cache {
        info!("Save index set to {}", cache.dir().display());
        cache.save(&dataset)?;
    }
    Ok((dataset, false))
}

/// Split an encoded dataset according to `config`.
///
/// # Errors
///
/// Returns an error if the ratio is invalid or the matrices disagree in rows.
pub fn split(dataset: &EncodedDataset, config: &PrepareConfig) -> DataResult<DatasetSplits> {
    info!("Splitting data set into train/dev/test");
    let splits = split_dataset(
        dataset.features.view(),
        dataset.labels.view(),
        config.train_set_ratio,
        config.dev_set_size,
    )?;
    info!(
        "train: {:?}, dev: {:?}, test: {:?}",
        splits.train.x.dim(),
        splits.dev.x.dim(),
        splits.test.x.dim()
    );
    Ok(splits)
}

/// Run the whole preparation with the cache directory from `config`.
///
/// # Errors
///
/// Fails on an invalid config or any load, encode, cache or split error.
pub fn prepare(config: &PrepareConfig) -> DataResult<PreparedData> {
    config.validate()?;
    let cache = DatasetCache::new(&config.cache_dir);
    let (dataset, from_cache) = load_or_encode(config, Some(&cache))?;
    let splits = split(&dataset, config)?;
    Ok(PreparedData {
        dataset,
        splits,
        from_cache,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_encode_reviews_scenario() {
        let vocab = Vocabulary::build();
        let reviews = vec![Review::new("great food", 5), Review::new("bad service", 1)];
        let dataset = encode_reviews(&reviews, &vocab, 5);

        assert_eq!(dataset.features.dim(), (2, 5));
        assert_eq!(dataset.features.row(0).to_vec(), vec![19, 0, 4, 17, 6]);
        assert_eq!(dataset.classes, vec![1, 5]);
        assert_eq!(dataset.labels, arr2(&[[0, 1], [1, 0]]));
        assert_eq!(dataset.embedding.dim(), (5, 70));
    }

    #[test]
    fn test_encode_no_reviews() {
        let vocab = Vocabulary::build();
        let dataset = encode_reviews(&[], &vocab, 8);
        assert_eq!(dataset.features.dim(), (0, 8));
        assert_eq!(dataset.labels.nrows(), 0);
        assert!(dataset.classes.is_empty());
    }

    #[test]
    fn test_split_uses_config() {
        let vocab = Vocabulary::build();
        let reviews: Vec<Review> = (0..20)
            .map(|i| Review::new(format!("review {i}"), (i % 5) + 1))
            .collect();
        let dataset = encode_reviews(&reviews, &vocab, 10);
        let config = PrepareConfig {
            train_set_ratio: 0.5,
            dev_set_size: 4,
            ..PrepareConfig::default()
        };
        let splits = split(&dataset, &config).expect("split");
        assert_eq!(splits.train.len(), 10);
        assert_eq!(splits.dev.len(), 4);
        assert_eq!(splits.test.len(), 6);
        assert_eq!(splits.test.y.ncols(), 5);
    }
}
