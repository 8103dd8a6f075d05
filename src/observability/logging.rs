//! # Structured Logging
//!
//! Subscriber setup and span helpers built on the tracing ecosystem.
//!
//! Logs go to stderr so stdout stays free for the JSON progress event the
//! binary prints. Secret values are never recorded as fields; models and
//! store values are wrapped in `SecretString`, which renders as
//! `[REDACTED]`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LoggingConfig};
use crate::errors::{Error, Result};

/// Create a tracing span for one lifecycle operation.
///
/// ```rust,ignore
/// let span = operation_span!("UPDATE", "/app/db-password");
/// let span = operation_span!("CREATE", name, phase = "put");
/// ```
#[macro_export]
macro_rules! operation_span {
    ($action:expr, $name:expr) => {
        tracing::info_span!(
            "lifecycle_operation",
            action = %$action,
            resource_name = %$name,
            operation_id = %uuid::Uuid::new_v4()
        )
    };
    ($action:expr, $name:expr, $($field:tt)*) => {
        tracing::info_span!(
            "lifecycle_operation",
            action = %$action,
            resource_name = %$name,
            operation_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. A subscriber that
/// is already installed (integration tests) is left in place.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| Error::config(format!("Invalid log level '{}': {}", config.level, e)))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    // Ignore the error if a subscriber is already set
    let _ = if config.json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).try_init()
    };
    Ok(())
}

/// Log configuration at startup
pub fn log_config_info(config: &Config) {
    tracing::info!(
        log_level = %config.logging.level,
        log_json = config.logging.json,
        store_path = %config.store.path,
        "paramsecret configuration"
    );
}
