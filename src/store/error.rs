//! Error types for parameter store operations.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that a [`ParameterStore`](super::ParameterStore) can report.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Parameter not found in the store.
    #[error("Parameter not found: {name}")]
    NotFound { name: String },

    /// A non-overwriting put hit an existing parameter.
    #[error("Parameter already exists: {name}")]
    AlreadyExists { name: String },

    /// The store rejected the call because of rate limiting.
    #[error("Request throttled: {message}")]
    Throttled { message: String },

    /// The caller lacks permission for the operation.
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    /// Failed to reach the store.
    #[error("Store connection failed: {message}")]
    ConnectionFailed { message: String },

    /// The store rejected the request contents.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Backend-specific error.
    #[error("Backend error: {message}")]
    BackendError { message: String },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StoreError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn already_exists(name: impl Into<String>) -> Self {
        Self::AlreadyExists { name: name.into() }
    }

    pub fn throttled(message: impl Into<String>) -> Self {
        Self::Throttled { message: message.into() }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied { message: message.into() }
    }

    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed { message: message.into() }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest { message: message.into() }
    }

    pub fn backend_error(message: impl Into<String>) -> Self {
        Self::BackendError { message: message.into() }
    }
}
