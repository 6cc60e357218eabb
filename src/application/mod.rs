//! # Application Layer
//!
//! Services that turn provider payloads into ranked canonical quotes.

pub mod error;
pub mod services;
