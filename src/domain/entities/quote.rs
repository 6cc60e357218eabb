//! # Canonical Quote Entity
//!
//! Fixed-schema FX quote produced by normalization.
//!
//! This module provides the [`CanonicalQuote`] entity, the provider-neutral
//! representation handed to ranking and to the caller's persistence layer.
//!
//! # Examples
//!
//! ```
//! use fx_quotes::domain::entities::quote::CanonicalQuoteBuilder;
//! use fx_quotes::domain::value_objects::{CurrencyCode, ProviderId, Timestamp};
//!
//! let quote = CanonicalQuoteBuilder::new(
//!     ProviderId::new(1),
//!     CurrencyCode::normalize("usd"),
//!     CurrencyCode::normalize("eur"),
//!     0.91,
//!     Timestamp::now().add_secs(300),
//! )
//! .ask_rate(0.92)
//! .build();
//!
//! assert_eq!(quote.pair(), "USD/EUR");
//! assert!(!quote.is_expired());
//! ```

use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{CurrencyCode, ProviderId};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spread reported when it cannot be derived from the quote.
pub const UNKNOWN_SPREAD_PERCENTAGE: f64 = 0.5;

/// A normalized FX quote.
///
/// Immutable once built. Two quotes built from the same values compare
/// equal; there is no identity beyond the values carried.
///
/// `bid_rate` and `ask_rate` are always set by the normalizer. They are
/// optional so quotes assembled elsewhere can omit a side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanonicalQuote {
    /// Provider the quote came from.
    provider_id: ProviderId,
    /// Currency being priced.
    base_currency: CurrencyCode,
    /// Currency the price is expressed in.
    quote_currency: CurrencyCode,
    /// Mid/reference rate.
    rate: f64,
    /// Bid side rate.
    bid_rate: Option<f64>,
    /// Ask side rate.
    ask_rate: Option<f64>,
    /// Spread as a percentage of the mid rate.
    spread_percentage: f64,
    /// When the quote goes stale.
    expires_at: Timestamp,
}

impl CanonicalQuote {
    /// Returns a builder for constructing a quote.
    #[must_use]
    pub fn builder(
        provider_id: ProviderId,
        base_currency: CurrencyCode,
        quote_currency: CurrencyCode,
        rate: f64,
        expires_at: Timestamp,
    ) -> CanonicalQuoteBuilder {
        CanonicalQuoteBuilder::new(provider_id, base_currency, quote_currency, rate, expires_at)
    }

    /// Returns the provider ID.
    #[inline]
    #[must_use]
    pub fn provider_id(&self) -> ProviderId {
        self.provider_id
    }

    /// Returns the base currency.
    #[inline]
    #[must_use]
    pub fn base_currency(&self) -> &CurrencyCode {
        &self.base_currency
    }

    /// Returns the quote currency.
    #[inline]
    #[must_use]
    pub fn quote_currency(&self) -> &CurrencyCode {
        &self.quote_currency
    }

    /// Returns the mid rate.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the bid rate, if any.
    #[inline]
    #[must_use]
    pub fn bid_rate(&self) -> Option<f64> {
        self.bid_rate
    }

    /// Returns the ask rate, if any.
    #[inline]
    #[must_use]
    pub fn ask_rate(&self) -> Option<f64> {
        self.ask_rate
    }

    /// Returns the spread percentage.
    #[inline]
    #[must_use]
    pub fn spread_percentage(&self) -> f64 {
        self.spread_percentage
    }

    /// Returns when this quote expires.
    #[inline]
    #[must_use]
    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Returns the pair as `BASE/QUOTE`.
    #[must_use]
    pub fn pair(&self) -> String {
        format!("{}/{}", self.base_currency, self.quote_currency)
    }

    /// Returns true if this quote has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_expired()
    }

    /// Returns true if this quote is expired as of `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        self.expires_at.is_expired_at(now)
    }

    /// Returns the time remaining until expiry, or zero if already expired.
    #[must_use]
    pub fn time_to_expiry(&self) -> std::time::Duration {
        Timestamp::now().duration_until(&self.expires_at)
    }
}

impl fmt::Display for CanonicalQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote({} @ {} spread={}% from provider {})",
            self.pair(),
            self.rate,
            self.spread_percentage,
            self.provider_id
        )
    }
}

/// Builder for constructing [`CanonicalQuote`] instances.
///
/// The spread defaults to [`UNKNOWN_SPREAD_PERCENTAGE`] and both sides to
/// `None`.
#[derive(Debug, Clone)]
pub struct CanonicalQuoteBuilder {
    provider_id: ProviderId,
    base_currency: CurrencyCode,
    quote_currency: CurrencyCode,
    rate: f64,
    bid_rate: Option<f64>,
    ask_rate: Option<f64>,
    spread_percentage: f64,
    expires_at: Timestamp,
}

impl CanonicalQuoteBuilder {
    /// Creates a new builder with required fields.
    #[must_use]
    pub fn new(
        provider_id: ProviderId,
        base_currency: CurrencyCode,
        quote_currency: CurrencyCode,
        rate: f64,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            provider_id,
            base_currency,
            quote_currency,
            rate,
            bid_rate: None,
            ask_rate: None,
            spread_percentage: UNKNOWN_SPREAD_PERCENTAGE,
            expires_at,
        }
    }

    /// Sets the bid rate.
    #[must_use]
    pub fn bid_rate(mut self, bid_rate: f64) -> Self {
        self.bid_rate = Some(bid_rate);
        self
    }

    /// Sets the ask rate.
    #[must_use]
    pub fn ask_rate(mut self, ask_rate: f64) -> Self {
        self.ask_rate = Some(ask_rate);
        self
    }

    /// Sets the spread percentage.
    #[must_use]
    pub fn spread_percentage(mut self, spread_percentage: f64) -> Self {
        self.spread_percentage = spread_percentage;
        self
    }

    /// Builds the quote.
    #[must_use]
    pub fn build(self) -> CanonicalQuote {
        CanonicalQuote {
            provider_id: self.provider_id,
            base_currency: self.base_currency,
            quote_currency: self.quote_currency,
            rate: self.rate,
            bid_rate: self.bid_rate,
            ask_rate: self.ask_rate,
            spread_percentage: self.spread_percentage,
            expires_at: self.expires_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn usd() -> CurrencyCode {
        CurrencyCode::normalize("USD")
    }

    fn eur() -> CurrencyCode {
        CurrencyCode::normalize("EUR")
    }

    fn future_timestamp() -> Timestamp {
        Timestamp::now().add_secs(300)
    }

    mod construction {
        use super::*;

        #[test]
        fn builder_defaults() {
            let quote = CanonicalQuote::builder(
                ProviderId::new(3),
                usd(),
                eur(),
                0.91,
                future_timestamp(),
            )
            .build();

            assert_eq!(quote.provider_id(), ProviderId::new(3));
            assert_eq!(quote.base_currency(), &usd());
            assert_eq!(quote.quote_currency(), &eur());
            assert_eq!(quote.rate(), 0.91);
            assert!(quote.bid_rate().is_none());
            assert!(quote.ask_rate().is_none());
            assert_eq!(quote.spread_percentage(), UNKNOWN_SPREAD_PERCENTAGE);
        }

        #[test]
        fn builder_sets_optional_fields() {
            let quote = CanonicalQuoteBuilder::new(
                ProviderId::new(3),
                usd(),
                eur(),
                0.91,
                future_timestamp(),
            )
            .bid_rate(0.90)
            .ask_rate(0.92)
            .spread_percentage(2.1978)
            .build();

            assert_eq!(quote.bid_rate(), Some(0.90));
            assert_eq!(quote.ask_rate(), Some(0.92));
            assert_eq!(quote.spread_percentage(), 2.1978);
        }

        #[test]
        fn equal_inputs_give_equal_quotes() {
            let expires = future_timestamp();
            let a = CanonicalQuoteBuilder::new(ProviderId::new(1), usd(), eur(), 1.0, expires)
                .build();
            let b = CanonicalQuoteBuilder::new(ProviderId::new(1), usd(), eur(), 1.0, expires)
                .build();
            assert_eq!(a, b);
        }
    }

    mod expiry {
        use super::*;

        #[test]
        fn future_quote_is_live() {
            let quote =
                CanonicalQuoteBuilder::new(ProviderId::new(1), usd(), eur(), 1.0, future_timestamp())
                    .build();
            assert!(!quote.is_expired());
            assert!(quote.time_to_expiry().as_secs() > 0);
        }

        #[test]
        fn is_expired_at_uses_given_clock() {
            let expires = Timestamp::from_secs(1_000).unwrap();
            let quote =
                CanonicalQuoteBuilder::new(ProviderId::new(1), usd(), eur(), 1.0, expires).build();
            assert!(!quote.is_expired_at(&Timestamp::from_secs(999).unwrap()));
            assert!(quote.is_expired_at(&Timestamp::from_secs(1_001).unwrap()));
            assert_eq!(quote.time_to_expiry(), std::time::Duration::ZERO);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn display_format() {
            let quote =
                CanonicalQuoteBuilder::new(ProviderId::new(9), usd(), eur(), 0.91, future_timestamp())
                    .build();

            let display = quote.to_string();
            assert!(display.contains("USD/EUR"));
            assert!(display.contains("0.91"));
            assert!(display.contains("provider 9"));
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn serializes_snake_case_fields() {
            let quote = CanonicalQuoteBuilder::new(
                ProviderId::new(7),
                usd(),
                eur(),
                1.0,
                Timestamp::from_secs(1_704_067_200).unwrap(),
            )
            .ask_rate(0.92)
            .build();

            let json = serde_json::to_value(&quote).unwrap();
            assert_eq!(json["provider_id"], 7);
            assert_eq!(json["base_currency"], "USD");
            assert_eq!(json["ask_rate"], 0.92);
            assert!(json["bid_rate"].is_null());

            let back: CanonicalQuote = serde_json::from_value(json).unwrap();
            assert_eq!(back, quote);
        }
    }
}
