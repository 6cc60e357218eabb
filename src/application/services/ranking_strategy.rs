//! # Ranking Strategy
//!
//! Comparison and ranking of canonical quotes.
//!
//! This module provides [`QuoteRanker`] with the pairwise comparison and
//! conversion helpers, and the [`RankingStrategy`] trait for ordering whole
//! quote sets.
//!
//! # Examples
//!
//! ```
//! use fx_quotes::application::services::ranking_strategy::QuoteRanker;
//! use fx_quotes::domain::entities::CanonicalQuoteBuilder;
//! use fx_quotes::domain::value_objects::{CurrencyCode, ProviderId, Timestamp};
//!
//! let quote = CanonicalQuoteBuilder::new(
//!     ProviderId::new(1),
//!     CurrencyCode::normalize("usd"),
//!     CurrencyCode::normalize("eur"),
//!     1.10,
//!     Timestamp::now().add_secs(60),
//! )
//! .ask_rate(1.12)
//! .build();
//!
//! assert_eq!(QuoteRanker::effective_rate(&quote), 1.12);
//! assert_eq!(QuoteRanker::converted_amount(&quote, 100.00), 112.00);
//! ```

use crate::domain::entities::quote::CanonicalQuote;
use crate::domain::value_objects::{AMOUNT_DECIMALS, Timestamp, round_dp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Maps `-0.0` to `0.0`; other values pass through.
fn unsigned_zero(value: f64) -> f64 {
    value + 0.0
}

/// Pairwise quote comparison and conversion helpers.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteRanker;

impl QuoteRanker {
    /// Orders two quotes, better first.
    ///
    /// Higher `rate` wins; on an exactly equal rate the lower
    /// `spread_percentage` wins. Floats are compared with
    /// [`f64::total_cmp`] after folding `-0.0` into `0.0`, so there is no
    /// tolerance, signed zeros tie and the result is a total order even
    /// with NaN.
    ///
    /// `Ordering::Less` means `a` is the better quote, so sorting a slice
    /// with this comparator puts the best quote first.
    #[must_use]
    pub fn compare(a: &CanonicalQuote, b: &CanonicalQuote) -> Ordering {
        let rate = |q: &CanonicalQuote| unsigned_zero(q.rate());
        let spread = |q: &CanonicalQuote| unsigned_zero(q.spread_percentage());
        rate(b)
            .total_cmp(&rate(a))
            .then_with(|| spread(a).total_cmp(&spread(b)))
    }

    /// Returns the better of two quotes, `a` on a tie.
    #[must_use]
    pub fn better<'a>(a: &'a CanonicalQuote, b: &'a CanonicalQuote) -> &'a CanonicalQuote {
        match Self::compare(a, b) {
            Ordering::Greater => b,
            Ordering::Less | Ordering::Equal => a,
        }
    }

    /// Rate paid when executing against the ask side: `ask_rate`, else `rate`.
    #[must_use]
    pub fn effective_rate(quote: &CanonicalQuote) -> f64 {
        quote.ask_rate().unwrap_or(quote.rate())
    }

    /// Converts `amount` at the effective rate, rounded to two decimals.
    #[must_use]
    pub fn converted_amount(quote: &CanonicalQuote, amount: f64) -> f64 {
        round_dp(amount * Self::effective_rate(quote), AMOUNT_DECIMALS)
    }

    /// Returns the best quote not yet expired at `now`.
    #[must_use]
    pub fn best_live<'a>(quotes: &'a [CanonicalQuote], now: &Timestamp) -> Option<&'a CanonicalQuote> {
        quotes
            .iter()
            .filter(|q| !q.is_expired_at(now))
            .reduce(|best, q| Self::better(best, q))
    }
}

/// A quote with its ranking information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedQuote {
    /// The quote being ranked.
    pub quote: CanonicalQuote,
    /// The rank (1 = best).
    pub rank: usize,
    /// The score the strategy ranked on.
    pub score: f64,
}

impl RankedQuote {
    /// Creates a new ranked quote.
    #[must_use]
    pub fn new(quote: CanonicalQuote, rank: usize, score: f64) -> Self {
        Self { quote, rank, score }
    }

    /// Returns true if this quote is the best (rank 1).
    #[must_use]
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }
}

impl fmt::Display for RankedQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RankedQuote(#{} score={:.4} quote={})",
            self.rank, self.score, self.quote
        )
    }
}

/// Trait for ranking strategies.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Ranks the given quotes, best first.
    fn rank(&self, quotes: &[CanonicalQuote]) -> Vec<RankedQuote>;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

/// Ranks by [`QuoteRanker::compare`]: rate descending, then spread ascending.
///
/// The sort is stable, so equal quotes keep their input order. The score is
/// the mid rate.
#[derive(Debug, Clone, Default)]
pub struct BestRateStrategy;

impl BestRateStrategy {
    /// Creates a new best rate strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RankingStrategy for BestRateStrategy {
    fn rank(&self, quotes: &[CanonicalQuote]) -> Vec<RankedQuote> {
        let mut ordered: Vec<&CanonicalQuote> = quotes.iter().collect();
        ordered.sort_by(|a, b| QuoteRanker::compare(a, b));

        ordered
            .into_iter()
            .enumerate()
            .map(|(idx, q)| RankedQuote::new(q.clone(), idx + 1, q.rate()))
            .collect()
    }

    fn name(&self) -> &'static str {
        "BestRate"
    }
}
