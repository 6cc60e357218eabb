//! # fx-quotes
//!
//! Normalization and ranking of foreign-exchange quotes.
//!
//! FX providers deliver quotes with inconsistent key names and value types.
//! This crate resolves such payloads into a fixed-schema
//! [`CanonicalQuote`](domain::entities::CanonicalQuote) and compares quotes
//! to pick the best one.
//!
//! ## Layers
//!
//! - [`domain`]: value objects, the canonical quote entity, domain errors
//! - [`application`]: the normalizer and ranking services
//! - [`infrastructure`]: layered settings
//!
//! ## Quick Start
//!
//! ```
//! use fx_quotes::application::services::{QuoteNormalizer, QuoteRanker};
//! use fx_quotes::domain::value_objects::{ProviderId, RawQuote};
//! use serde_json::json;
//!
//! let normalizer = QuoteNormalizer::default();
//!
//! let a = normalizer.normalize(
//!     &RawQuote::from_value(json!({"base": "usd", "quote": "eur", "rate": 0.92})).unwrap(),
//!     ProviderId::new(1),
//! );
//! let b = normalizer.normalize(
//!     &RawQuote::from_value(json!({"base_currency": "USD", "quote_currency": "EUR", "mid": "0.93"})).unwrap(),
//!     ProviderId::new(2),
//! );
//!
//! assert_eq!(QuoteRanker::better(&a, &b).provider_id(), ProviderId::new(2));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::error::{ApplicationError, ApplicationResult};
pub use application::services::{
    BestRateStrategy, QuoteNormalizer, QuoteRanker, RankedQuote, RankingStrategy,
};
pub use domain::entities::CanonicalQuote;
pub use domain::errors::{DomainError, DomainResult};
pub use domain::value_objects::{CurrencyCode, ProviderId, RawQuote, Timestamp};
