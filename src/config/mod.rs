//! # Configuration Management
//!
//! Runtime configuration for the controller binary, read from
//! `PARAMSECRET_*` environment variables and checked with `validator`.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{Error, Result};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingConfig,

    /// Local parameter store configuration
    #[validate(nested)]
    pub store: StoreConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    #[validate(custom(function = "validate_log_level"))]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

/// Local parameter store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreConfig {
    /// Path of the JSON parameter file
    #[validate(length(min = 1, message = "Store path cannot be empty"))]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: "paramsecret-store.json".to_string() }
    }
}

fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        return Err(ValidationError::new("invalid_log_level"));
    }
    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::config(format!("Invalid boolean for {}: {}", name, other))),
    }
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let level =
            std::env::var("PARAMSECRET_LOG_LEVEL").unwrap_or(defaults.logging.level);
        let json = match std::env::var("PARAMSECRET_LOG_JSON") {
            Ok(value) => parse_bool("PARAMSECRET_LOG_JSON", &value)?,
            Err(_) => defaults.logging.json,
        };
        let path = std::env::var("PARAMSECRET_STORE_PATH").unwrap_or(defaults.store.path);

        let config = Self { logging: LoggingConfig { level, json }, store: StoreConfig { path } };
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)
    }
}
