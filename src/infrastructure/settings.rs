//! # Settings
//!
//! Layered configuration for the normalizer.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. `{config_dir}/default.{toml,yaml,json}` (optional)
//! 2. `{config_dir}/local.{toml,yaml,json}` (optional)
//! 3. environment variables such as `FX_QUOTES__NORMALIZER__DEFAULT_TTL_SECS`
//!
//! # Examples
//!
//! ```
//! use fx_quotes::infrastructure::settings::Settings;
//!
//! let settings = Settings::from_toml("[normalizer]\ndefault_ttl_secs = 60").unwrap();
//! assert_eq!(settings.normalizer.default_ttl_secs, 60);
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::quote_normalizer::NormalizerConfig;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "FX_QUOTES";

/// Default configuration directory.
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable overriding the configuration directory.
const CONFIG_DIR_VAR: &str = "FX_QUOTES_CONFIG_DIR";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Normalizer configuration.
    pub normalizer: NormalizerConfig,
}

impl Settings {
    /// Loads settings from the default directory and `FX_QUOTES__*` variables.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if a source cannot be read
    /// or deserialized, and `ApplicationError::InvalidConfiguration` if the
    /// values fail validation.
    pub fn load() -> ApplicationResult<Self> {
        Self::load_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Loads settings using a custom environment variable prefix.
    ///
    /// # Errors
    ///
    /// See [`Settings::load`].
    pub fn load_with_prefix(env_prefix: &str) -> ApplicationResult<Self> {
        let config_dir =
            std::env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
        Self::load_from(&config_dir, env_prefix)
    }

    /// Loads settings from an explicit directory and prefix.
    ///
    /// # Errors
    ///
    /// See [`Settings::load`].
    pub fn load_from(config_dir: &str, env_prefix: &str) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(File::with_name(&format!("{config_dir}/default")).required(false))
            .add_source(File::with_name(&format!("{config_dir}/local")).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        debug!(config_dir, env_prefix, ?settings, "loaded settings");
        Ok(settings)
    }

    /// Parses settings from a TOML document.
    ///
    /// # Errors
    ///
    /// See [`Settings::load`].
    pub fn from_toml(toml: &str) -> ApplicationResult<Self> {
        let settings: Self = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidConfiguration` for a non-positive
    /// default TTL or a negative or non-finite unknown spread.
    pub fn validate(&self) -> ApplicationResult<()> {
        let normalizer = &self.normalizer;
        if normalizer.default_ttl_secs <= 0 {
            return Err(ApplicationError::invalid_configuration(format!(
                "normalizer.default_ttl_secs must be positive, got {}",
                normalizer.default_ttl_secs
            )));
        }
        if !normalizer.unknown_spread_percentage.is_finite()
            || normalizer.unknown_spread_percentage < 0.0
        {
            return Err(ApplicationError::invalid_configuration(format!(
                "normalizer.unknown_spread_percentage must be a non-negative number, got {}",
                normalizer.unknown_spread_percentage
            )));
        }
        Ok(())
    }
}
