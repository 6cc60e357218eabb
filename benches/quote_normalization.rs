//! Benchmarks for quote normalization and ranking.

#![allow(missing_docs, clippy::unwrap_used)]

use criterion::{Criterion, criterion_group, criterion_main};
use fx_quotes::application::services::{BestRateStrategy, QuoteNormalizer, RankingStrategy};
use fx_quotes::domain::value_objects::{ProviderId, RawQuote, Timestamp};
use serde_json::json;
use std::hint::black_box;

fn payloads() -> Vec<RawQuote> {
    (0..32)
        .map(|i| {
            let mid = 1.08 + f64::from(i) * 0.0001;
            let value = if i % 2 == 0 {
                json!({"base": "eur", "quote": "usd", "rate": mid, "bid": mid - 0.0002, "ask": mid + 0.0002, "ttl_seconds": 30})
            } else {
                json!({"base_currency": "EUR", "quote_currency": "USD", "mid_rate": mid.to_string(), "expires_at": "2030-01-01T00:00:00Z"})
            };
            RawQuote::from_value(value).unwrap()
        })
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = QuoteNormalizer::default();
    let payloads = payloads();
    let now = Timestamp::now();

    c.bench_function("normalize_32_payloads", |b| {
        b.iter(|| {
            for (i, raw) in payloads.iter().enumerate() {
                black_box(normalizer.normalize_at(raw, ProviderId::new(i as u64), now));
            }
        });
    });
}

fn bench_rank(c: &mut Criterion) {
    let normalizer = QuoteNormalizer::default();
    let now = Timestamp::now();
    let quotes: Vec<_> = payloads()
        .iter()
        .enumerate()
        .map(|(i, raw)| normalizer.normalize_at(raw, ProviderId::new(i as u64), now))
        .collect();
    let strategy = BestRateStrategy::new();

    c.bench_function("rank_32_quotes", |b| {
        b.iter(|| black_box(strategy.rank(black_box(&quotes))));
    });
}

criterion_group!(benches, bench_normalize, bench_rank);
criterion_main!(benches);
