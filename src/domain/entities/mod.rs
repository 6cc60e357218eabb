//! # Domain Entities
//!
//! - [`CanonicalQuote`]: normalized FX quote

pub mod quote;

pub use quote::{CanonicalQuote, CanonicalQuoteBuilder, UNKNOWN_SPREAD_PERCENTAGE};
