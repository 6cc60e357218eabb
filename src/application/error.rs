//! # Application Errors
//!
//! Error types for the application layer.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)           - Payload or timestamp rejected
//! ├── Configuration(ConfigError)    - Settings could not be loaded
//! ├── InvalidConfiguration(String)  - Settings loaded but out of range
//! └── Serialization(serde_json)     - Canonical quote encoding failed
//! ```
//!
//! # Examples
//!
//! ```
//! use fx_quotes::application::error::ApplicationError;
//! use fx_quotes::domain::errors::DomainError;
//!
//! let err: ApplicationError = DomainError::invalid_timestamp("soon").into();
//! assert!(err.is_domain());
//! ```

use crate::domain::errors::DomainError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from normalization.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Configuration sources could not be read or deserialized.
    #[error("configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    /// Configuration values failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApplicationError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// Returns true if this error came from the domain layer.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Returns true if this error is about configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InvalidConfiguration(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
