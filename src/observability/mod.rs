//! # Observability
//!
//! Structured logging for lifecycle operations.

pub mod logging;

pub use logging::{init_logging, log_config_info};
