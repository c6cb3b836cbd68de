//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HABIT_TRACKER` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a usable config.
//!
//! # Example
//!
//! ```no_run
//! use habit_tracker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let days = config.day_boundary().expect("Invalid UTC offset");
//! ```

mod auth;
mod error;
mod logging;
mod store;
mod tracking;

pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use store::StoreConfig;
pub use tracking::TrackingConfig;

use serde::Deserialize;
use std::path::Path;

use crate::domain::foundation::DayBoundary;

const ENV_PREFIX: &str = "HABIT_TRACKER";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Document store ids (database, collections)
    #[serde(default)]
    pub store: StoreConfig,

    /// Credential rules
    #[serde(default)]
    pub auth: AuthConfig,

    /// Local day boundary
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HABIT_TRACKER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HABIT_TRACKER__STORE__DATABASE_ID=main` -> `store.database_id = "main"`
    /// - `HABIT_TRACKER__TRACKING__UTC_OFFSET_MINUTES=-300` -> `tracking.utc_offset_minutes = -300`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, with environment variables taking
    /// precedence. The format is taken from the file extension.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.store.validate()?;
        self.auth.validate()?;
        self.tracking.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// The configured local day boundary.
    pub fn day_boundary(&self) -> Result<DayBoundary, ValidationError> {
        self.tracking.day_boundary()
    }
}

fn environment() -> config::Environment {
    config::Environment::default()
        .prefix(ENV_PREFIX)
        .separator("__")
}
