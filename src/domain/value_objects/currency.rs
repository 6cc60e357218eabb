//! # Currency Code
//!
//! Three-letter currency codes as they come out of normalization.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency used when a payload names none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Maximum number of characters kept from a provider value.
const CODE_LEN: usize = 3;

/// A normalized currency code.
///
/// Normalization takes the first three characters of the provider value,
/// trims surrounding whitespace and upper-cases the result. Shorter values
/// are kept as they are and never padded, so `"eu"` normalizes to `"EU"`.
///
/// # Examples
///
/// ```
/// use fx_quotes::domain::value_objects::CurrencyCode;
///
/// assert_eq!(CurrencyCode::normalize("usdt").as_str(), "USD");
/// assert_eq!(CurrencyCode::normalize("eur").as_str(), "EUR");
/// assert_eq!(CurrencyCode::normalize(" gbp").as_str(), "GB");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Normalizes a raw provider value into a currency code.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let head: String = raw.chars().take(CODE_LEN).collect();
        Self(head.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for a full three-letter uppercase ASCII code.
    #[must_use]
    pub fn is_iso_shaped(&self) -> bool {
        self.0.len() == CODE_LEN && self.0.bytes().all(|b| b.is_ascii_uppercase())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::normalize(DEFAULT_CURRENCY)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_then_uppercases() {
        assert_eq!(CurrencyCode::normalize("usdc").as_str(), "USD");
        assert_eq!(CurrencyCode::normalize("jpy").as_str(), "JPY");
    }

    #[test]
    fn trims_after_truncation() {
        assert_eq!(CurrencyCode::normalize("eur ").as_str(), "EUR");
        assert_eq!(CurrencyCode::normalize(" ch f").as_str(), "CH");
    }

    #[test]
    fn short_values_are_not_padded() {
        let code = CurrencyCode::normalize("x");
        assert_eq!(code.as_str(), "X");
        assert!(!code.is_iso_shaped());
        assert_eq!(CurrencyCode::normalize("").as_str(), "");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(CurrencyCode::normalize("€ur").as_str(), "€UR");
    }

    #[test]
    fn non_ascii_letters_keep_their_length() {
        let code = CurrencyCode::normalize("ßßß");
        assert_eq!(code.as_str(), "ßßß");
        assert_eq!(code.as_str().chars().count(), 3);
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["USD", "eur", "  x", "gbpx", "€ur", "ßßß", "ǆab"] {
            let once = CurrencyCode::normalize(raw);
            let twice = CurrencyCode::normalize(once.as_str());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn default_is_usd() {
        let code = CurrencyCode::default();
        assert_eq!(code.as_str(), DEFAULT_CURRENCY);
        assert!(code.is_iso_shaped());
    }
}
