//! # Application Services
//!
//! - [`QuoteNormalizer`]: provider payload to canonical quote
//! - [`QuoteRanker`] and [`RankingStrategy`]: quote comparison and ranking

pub mod quote_normalizer;
pub mod ranking_strategy;

pub use quote_normalizer::{
    DEFAULT_TTL_SECS, ExpiryPolicy, NormalizerConfig, QuoteNormalizer, RateKind,
};
pub use ranking_strategy::{BestRateStrategy, QuoteRanker, RankedQuote, RankingStrategy};
