//! # Rounding
//!
//! Decimal-place rounding for floating point rates and amounts.
//!
//! Rates travel as `f64`. Values are routed through [`Decimal`] so rounding
//! strips float noise such as `112.00000000000001` instead of carrying it.
//!
//! # Examples
//!
//! ```
//! use fx_quotes::domain::value_objects::arithmetic::round_dp;
//!
//! assert_eq!(round_dp(1.234_56, 4), 1.2346);
//! assert_eq!(round_dp(2.000_000_000_000_001_8, 4), 2.0);
//! ```

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for spread percentages.
pub const SPREAD_DECIMALS: u32 = 4;

/// Number of decimal places kept for converted amounts.
pub const AMOUNT_DECIMALS: u32 = 2;

/// Rounds `value` to `dp` decimal places, halves away from zero.
///
/// Non-finite values and values outside the range of [`Decimal`] are
/// returned unchanged.
#[must_use]
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
