//! # Quote Normalizer
//!
//! Turns provider payloads into [`CanonicalQuote`]s.
//!
//! Every logical field is resolved by probing an ordered list of candidate
//! keys; the first present key wins and a documented default applies when
//! none is present.
//!
//! # Fallback Chains
//!
//! ```text
//! base     : base → base_currency → "USD"
//! quote    : quote → quote_currency → "USD"
//! mid      : rate → mid → mid_rate → exchange_rate → rate → 1.0
//! bid      : bid → bid_rate → buy_rate → rate → 1.0
//! ask      : ask → ask_rate → sell_rate → rate → 1.0
//! spread   : spread → round((ask - bid) / mid * 100, 4) → 0.5
//! expiry   : expires_at → now + ttl_seconds → now + 300s
//! ```
//!
//! # Examples
//!
//! ```
//! use fx_quotes::application::services::quote_normalizer::QuoteNormalizer;
//! use fx_quotes::domain::value_objects::{ProviderId, RawQuote};
//! use serde_json::json;
//!
//! let raw = RawQuote::from_value(json!({
//!     "base_currency": "gbp",
//!     "quote_currency": "usd",
//!     "mid_rate": "1.2700",
//!     "bid": 1.2690,
//!     "ask": 1.2710,
//! })).unwrap();
//!
//! let quote = QuoteNormalizer::default().normalize(&raw, ProviderId::new(2));
//!
//! assert_eq!(quote.pair(), "GBP/USD");
//! assert_eq!(quote.rate(), 1.27);
//! assert_eq!(quote.spread_percentage(), 0.1575);
//! ```

use crate::domain::entities::quote::{CanonicalQuote, UNKNOWN_SPREAD_PERCENTAGE};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{
    CurrencyCode, DEFAULT_CURRENCY, ProviderId, RawQuote, SPREAD_DECIMALS, Timestamp, round_dp,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Default quote lifetime in seconds.
pub const DEFAULT_TTL_SECS: i64 = 300;

/// Mid rate used when a payload carries no usable rate key.
const DEFAULT_MID_RATE: f64 = 1.0;

const BASE_KEYS: [&str; 2] = ["base", "base_currency"];
const QUOTE_KEYS: [&str; 2] = ["quote", "quote_currency"];
const SPREAD_KEY: &str = "spread";
const EXPIRES_AT_KEY: &str = "expires_at";
const TTL_KEY: &str = "ttl_seconds";
const RATE_KEY: &str = "rate";

/// Which rate of a quote is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateKind {
    /// Mid/reference rate.
    Mid,
    /// Bid side.
    Bid,
    /// Ask side.
    Ask,
}

impl RateKind {
    /// Candidate payload keys, highest priority first.
    #[must_use]
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Self::Mid => &["rate", "mid", "mid_rate", "exchange_rate"],
            Self::Bid => &["bid", "bid_rate", "buy_rate"],
            Self::Ask => &["ask", "ask_rate", "sell_rate"],
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mid => write!(f, "mid"),
            Self::Bid => write!(f, "bid"),
            Self::Ask => write!(f, "ask"),
        }
    }
}

/// What to do with an `expires_at` value that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryPolicy {
    /// Log a warning and use the default TTL.
    #[default]
    Lenient,
    /// Fail the normalization.
    Strict,
}

/// Configuration for [`QuoteNormalizer`].
///
/// The defaults reproduce the documented normalization constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Lifetime applied when the payload carries no expiry information.
    pub default_ttl_secs: i64,
    /// Spread reported when it cannot be computed.
    pub unknown_spread_percentage: f64,
    /// Policy used by [`QuoteNormalizer::normalize_with_policy`].
    pub expiry_policy: ExpiryPolicy,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: DEFAULT_TTL_SECS,
            unknown_spread_percentage: UNKNOWN_SPREAD_PERCENTAGE,
            expiry_policy: ExpiryPolicy::default(),
        }
    }
}

impl NormalizerConfig {
    /// Sets the default TTL.
    #[must_use]
    pub fn with_default_ttl_secs(mut self, secs: i64) -> Self {
        self.default_ttl_secs = secs;
        self
    }

    /// Sets the spread used when it cannot be computed.
    #[must_use]
    pub fn with_unknown_spread_percentage(mut self, spread: f64) -> Self {
        self.unknown_spread_percentage = spread;
        self
    }

    /// Sets the expiry policy.
    #[must_use]
    pub fn with_expiry_policy(mut self, policy: ExpiryPolicy) -> Self {
        self.expiry_policy = policy;
        self
    }
}

/// Normalizes raw provider quotes.
///
/// Stateless apart from its configuration; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct QuoteNormalizer {
    config: NormalizerConfig,
}

impl QuoteNormalizer {
    /// Creates a normalizer with the given configuration.
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalizes a payload. Never fails.
    ///
    /// An unparsable `expires_at` is logged and replaced by the default TTL.
    #[must_use]
    pub fn normalize(&self, raw: &RawQuote, provider_id: ProviderId) -> CanonicalQuote {
        self.normalize_at(raw, provider_id, Timestamp::now())
    }

    /// Normalizes a payload against an explicit clock reading.
    #[must_use]
    pub fn normalize_at(
        &self,
        raw: &RawQuote,
        provider_id: ProviderId,
        now: Timestamp,
    ) -> CanonicalQuote {
        let expires_at = self.resolve_expiry(raw, now).unwrap_or_else(|err| {
            warn!(
                provider_id = %provider_id,
                error = %err,
                "unparsable expiry, using default ttl"
            );
            self.default_expiry(now)
        });
        self.assemble(raw, provider_id, expires_at)
    }

    /// Normalizes a payload, rejecting an unparsable `expires_at`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if `expires_at` is present
    /// but cannot be parsed.
    pub fn try_normalize(
        &self,
        raw: &RawQuote,
        provider_id: ProviderId,
    ) -> DomainResult<CanonicalQuote> {
        self.try_normalize_at(raw, provider_id, Timestamp::now())
    }

    /// Strict normalization against an explicit clock reading.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if `expires_at` is present
    /// but cannot be parsed.
    pub fn try_normalize_at(
        &self,
        raw: &RawQuote,
        provider_id: ProviderId,
        now: Timestamp,
    ) -> DomainResult<CanonicalQuote> {
        let expires_at = self.resolve_expiry(raw, now)?;
        Ok(self.assemble(raw, provider_id, expires_at))
    }

    /// Normalizes using the configured [`ExpiryPolicy`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` under [`ExpiryPolicy::Strict`]
    /// when `expires_at` cannot be parsed.
    pub fn normalize_with_policy(
        &self,
        raw: &RawQuote,
        provider_id: ProviderId,
    ) -> DomainResult<CanonicalQuote> {
        match self.config.expiry_policy {
            ExpiryPolicy::Lenient => Ok(self.normalize(raw, provider_id)),
            ExpiryPolicy::Strict => self.try_normalize(raw, provider_id),
        }
    }

    fn assemble(
        &self,
        raw: &RawQuote,
        provider_id: ProviderId,
        expires_at: Timestamp,
    ) -> CanonicalQuote {
        let base = resolve_currency(raw, &BASE_KEYS);
        let quote = resolve_currency(raw, &QUOTE_KEYS);

        let mid = resolve_rate(raw, RateKind::Mid);
        let bid = resolve_rate(raw, RateKind::Bid);
        let ask = resolve_rate(raw, RateKind::Ask);
        let spread = self.resolve_spread(raw, mid, bid, ask);

        let canonical = CanonicalQuote::builder(provider_id, base, quote, mid, expires_at)
            .bid_rate(bid)
            .ask_rate(ask)
            .spread_percentage(spread)
            .build();

        debug!(
            provider_id = %provider_id,
            pair = %canonical.pair(),
            rate = mid,
            bid,
            ask,
            spread,
            expires_at = %expires_at,
            "normalized quote"
        );

        canonical
    }

    fn resolve_spread(&self, raw: &RawQuote, mid: f64, bid: f64, ask: f64) -> f64 {
        if let Some(explicit) = raw.number_of(&[SPREAD_KEY]) {
            return explicit;
        }
        if mid > 0.0 && bid > 0.0 && ask > 0.0 {
            let spread = ((ask - bid) / mid) * 100.0;
            if spread.is_finite() {
                return round_dp(spread, SPREAD_DECIMALS);
            }
        }
        self.config.unknown_spread_percentage
    }

    fn resolve_expiry(&self, raw: &RawQuote, now: Timestamp) -> DomainResult<Timestamp> {
        if let Some(text) = raw.text_of(&[EXPIRES_AT_KEY]) {
            return Timestamp::parse(&text);
        }
        if let Some(ttl) = raw.number_of(&[TTL_KEY]) {
            // `as` saturates and maps NaN to zero.
            return Ok(now.add_secs(ttl.trunc() as i64));
        }
        Ok(self.default_expiry(now))
    }

    fn default_expiry(&self, now: Timestamp) -> Timestamp {
        now.add_secs(self.config.default_ttl_secs)
    }
}

/// Resolves a currency code from the first present key, else `"USD"`.
fn resolve_currency(raw: &RawQuote, keys: &[&str]) -> CurrencyCode {
    let source = raw
        .text_of(keys)
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    CurrencyCode::normalize(&source)
}

/// Resolves one rate. Sides with no key of their own fall back to the
/// mid fallback (`rate`, else 1.0), never to zero.
fn resolve_rate(raw: &RawQuote, kind: RateKind) -> f64 {
    raw.number_of(kind.keys())
        .unwrap_or_else(|| mid_fallback(raw))
}

fn mid_fallback(raw: &RawQuote) -> f64 {
    raw.number_of(&[RATE_KEY]).unwrap_or(DEFAULT_MID_RATE)
}
