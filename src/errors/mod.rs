//! # Error Handling
//!
//! Crate-level error type plus the classified [`HandlerError`] that lifecycle
//! operations report to the invoking orchestrator.

pub mod handler;

pub use handler::{HandlerError, HandlerErrorCode, Phase};

/// Custom result type for paramsecret operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for everything outside a single lifecycle operation
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors with context
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },

    /// A lifecycle operation failed
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a serialization error with context
    pub fn serialization<C: Into<String>>(source: serde_json::Error, context: C) -> Self {
        Self::Serialization { source, context: context.into() }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Config(errors.to_string())
    }
}
