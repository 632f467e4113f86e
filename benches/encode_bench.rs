//! Criterion benchmarks for text encoding and batch generation.
//!
//! Run with: `cargo bench --bench encode_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use charcnn::data::encode::{encode_text, encode_texts};
use charcnn::{BatchConfig, BatchGenerator, LabelBinarizer, Vocabulary};
use ndarray::Array2;

/// Synthetic reviews of roughly `len` characters each.
fn synthetic_reviews(count: usize, len: usize) -> Vec<String> {
    let base = "The food was GREAT+tasty, service slow; would return? 5/5 :) ";
    (0..count)
        .map(|i| base.chars().cycle().skip(i % base.len()).take(len).collect())
        .collect()
}

fn bench_encode_text(c: &mut Criterion) {
    let vocab = Vocabulary::build();
    let text = synthetic_reviews(1, 2000).remove(0);

    let mut group = c.benchmark_group("encode_text");
    for &length in &[128usize, 1014] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &l| {
            b.iter(|| encode_text(black_box(&text), &vocab, l));
        });
    }
    group.finish();
}

fn bench_encode_texts(c: &mut Criterion) {
    let vocab = Vocabulary::build();
    let reviews = synthetic_reviews(1000, 1200);

    c.bench_function("encode_texts_1000x1014", |b| {
        b.iter(|| encode_texts(reviews.iter().map(String::as_str), &vocab, black_box(1014)));
    });
}

fn bench_labels(c: &mut Criterion) {
    let stars: Vec<i64> = (0..10_000).map(|i| i % 5 + 1).collect();
    c.bench_function("label_fit_transform_10k", |b| {
        b.iter(|| LabelBinarizer::fit_transform(black_box(&stars)));
    });
}

fn bench_batches(c: &mut Criterion) {
    let x = Array2::<i64>::zeros((5000, 1014));
    let y = Array2::<i64>::zeros((5000, 5));

    let mut group = c.benchmark_group("batch_epoch");
    for &shuffle in &[false, true] {
        let gen = BatchGenerator::new(
            x.view(),
            y.view(),
            BatchConfig {
                epoch_size: 1,
                batch_size: 128,
                shuffle,
            },
        )
        .expect("valid batch config");
        group.bench_with_input(BenchmarkId::new("shuffle", shuffle), &gen, |b, gen| {
            b.iter(|| gen.iter().map(|(bx, _)| bx.nrows()).sum::<usize>());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_encode_text,
    bench_encode_texts,
    bench_labels,
    bench_batches
);
criterion_main!(benches);
