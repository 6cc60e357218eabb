//! End-to-end tests: provider payloads through normalization and ranking.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use fx_quotes::application::services::{
    BestRateStrategy, NormalizerConfig, QuoteNormalizer, QuoteRanker, RankingStrategy,
};
use fx_quotes::domain::value_objects::{ProviderId, RawQuote, Timestamp};
use fx_quotes::infrastructure::settings::Settings;
use serde_json::json;

fn raw(value: serde_json::Value) -> RawQuote {
    RawQuote::from_value(value).unwrap()
}

#[test]
fn documented_example_normalizes_as_traced() {
    let payload = raw(json!({
        "base": "usd",
        "quote": "eur",
        "bid": 0.90,
        "ask": 0.92,
        "ttl_seconds": 60,
    }));

    let before = Timestamp::now();
    let quote = QuoteNormalizer::default().normalize(&payload, ProviderId::new(7));
    let after = Timestamp::now();

    assert_eq!(quote.provider_id(), ProviderId::new(7));
    assert_eq!(quote.base_currency().as_str(), "USD");
    assert_eq!(quote.quote_currency().as_str(), "EUR");
    assert_eq!(quote.rate(), 1.0);
    assert_eq!(quote.bid_rate(), Some(0.90));
    assert_eq!(quote.ask_rate(), Some(0.92));
    // No mid key: the default 1.0 mid passes the positivity guard.
    assert_eq!(quote.spread_percentage(), 2.0);
    assert!(!quote.expires_at().is_before(&before.add_secs(60)));
    assert!(!quote.expires_at().is_after(&after.add_secs(60)));
}

#[test]
fn empty_payload_expires_in_five_minutes() {
    let before = Timestamp::now();
    let quote = QuoteNormalizer::default().normalize(&RawQuote::new(), ProviderId::new(1));
    let after = Timestamp::now();

    assert!(!quote.expires_at().is_before(&before.add_secs(300)));
    assert!(!quote.expires_at().is_after(&after.add_secs(300)));
}

#[test]
fn heterogeneous_providers_rank_together() {
    let now = Timestamp::from_secs(1_704_067_200).unwrap();
    let normalizer = QuoteNormalizer::default();

    let payloads = [
        (1, json!({"base": "eur", "quote": "usd", "rate": 1.0950, "bid": 1.0940, "ask": 1.0960})),
        (2, json!({"base_currency": "EUR", "quote_currency": "USD", "mid_rate": "1.0952", "bid_rate": "1.0948", "ask_rate": "1.0956"})),
        (3, json!({"base": "eurx", "quote": "usd", "exchange_rate": 1.0952, "spread": 0.02})),
        (4, json!({"base": "eur", "quote": "usd", "mid": 1.0990, "expires_at": "2023-12-31T23:59:00Z"})),
    ];

    let quotes: Vec<_> = payloads
        .into_iter()
        .map(|(id, value)| normalizer.normalize_at(&raw(value), ProviderId::new(id), now))
        .collect();

    assert!(quotes.iter().all(|q| q.pair() == "EUR/USD"));

    // Provider 3 ties provider 2 on rate but reports a tighter spread.
    let ranked = BestRateStrategy::new().rank(&quotes);
    let order: Vec<u64> = ranked.iter().map(|r| r.quote.provider_id().get()).collect();
    assert_eq!(order, vec![4, 3, 2, 1]);

    // Provider 4 is already stale.
    let best = QuoteRanker::best_live(&quotes, &now).unwrap();
    assert_eq!(best.provider_id(), ProviderId::new(3));
    // Provider 3 sent no ask, so the ask side fell back to 1.0.
    assert_eq!(QuoteRanker::converted_amount(best, 1_000.0), 1_000.0);
    assert_eq!(QuoteRanker::converted_amount(&quotes[1], 1_000.0), 1_095.6);
}

#[test]
fn settings_drive_the_normalizer() {
    let settings = Settings::from_toml(
        "[normalizer]\ndefault_ttl_secs = 15\nunknown_spread_percentage = 1.0",
    )
    .unwrap();
    let now = Timestamp::from_secs(1_000).unwrap();

    let quote = QuoteNormalizer::new(settings.normalizer).normalize_at(
        &raw(json!({"rate": 0})),
        ProviderId::new(1),
        now,
    );

    assert_eq!(quote.expires_at(), now.add_secs(15));
    assert_eq!(quote.spread_percentage(), 1.0);
}

#[test]
fn canonical_quote_serializes_for_persistence() {
    let now = Timestamp::from_secs(1_704_067_200).unwrap();
    let quote = QuoteNormalizer::new(NormalizerConfig::default()).normalize_at(
        &raw(json!({"base": "gbp", "quote": "jpy", "rate": 188.5})),
        ProviderId::new(11),
        now,
    );

    let json = serde_json::to_value(&quote).unwrap();
    assert_eq!(json["provider_id"], 11);
    assert_eq!(json["base_currency"], "GBP");
    assert_eq!(json["quote_currency"], "JPY");
    assert_eq!(json["rate"], 188.5);
    assert_eq!(json["expires_at"], now.add_secs(300).to_iso8601());
}
