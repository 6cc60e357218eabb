//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`CurrencyCode`]: normalized three-letter currency code
//! - [`ProviderId`]: identifier of the quoting provider
//! - [`RawQuote`]: untyped provider payload with key probing
//! - [`Timestamp`]: UTC point in time
//! - [`round_dp`]: decimal-place rounding for rates and amounts

pub mod arithmetic;
pub mod currency;
pub mod ids;
pub mod raw_quote;
pub mod timestamp;

pub use arithmetic::{AMOUNT_DECIMALS, SPREAD_DECIMALS, round_dp};
pub use currency::{CurrencyCode, DEFAULT_CURRENCY};
pub use ids::ProviderId;
pub use raw_quote::{RawQuote, parse_or_zero};
pub use timestamp::Timestamp;
