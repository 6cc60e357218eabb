//! # Domain Errors
//!
//! Error types raised by domain logic.
//!
//! Normalization is tolerant of dirty provider data, so the domain only
//! fails on inputs it cannot interpret at all.
//!
//! # Examples
//!
//! ```
//! use fx_quotes::domain::errors::DomainError;
//!
//! let err = DomainError::invalid_timestamp("not-a-date");
//! assert!(err.to_string().contains("not-a-date"));
//! ```

use thiserror::Error;

/// Error type for domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An explicit timestamp could not be parsed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The raw payload was not a key-value mapping.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl DomainError {
    /// Creates an invalid timestamp error.
    #[must_use]
    pub fn invalid_timestamp(value: impl Into<String>) -> Self {
        Self::InvalidTimestamp(value.into())
    }

    /// Creates an invalid payload error.
    #[must_use]
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
