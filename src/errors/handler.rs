//! # Handler Errors
//!
//! Classified failures of a lifecycle operation and their mapping onto the
//! host's error codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::password::PolicyError;
use crate::store::StoreError;

/// Error codes understood by the invoking orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerErrorCode {
    InvalidRequest,
    NotFound,
    AlreadyExists,
    Throttling,
    AccessDenied,
    NetworkFailure,
    ServiceInternalError,
    InternalFailure,
}

impl fmt::Display for HandlerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            HandlerErrorCode::InvalidRequest => "InvalidRequest",
            HandlerErrorCode::NotFound => "NotFound",
            HandlerErrorCode::AlreadyExists => "AlreadyExists",
            HandlerErrorCode::Throttling => "Throttling",
            HandlerErrorCode::AccessDenied => "AccessDenied",
            HandlerErrorCode::NetworkFailure => "NetworkFailure",
            HandlerErrorCode::ServiceInternalError => "ServiceInternalError",
            HandlerErrorCode::InternalFailure => "InternalFailure",
        };
        f.write_str(code)
    }
}

/// The store call an upstream failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fetch,
    Put,
    RemoveTags,
    AddTags,
    Delete,
    List,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Phase::Fetch => "fetch",
            Phase::Put => "put",
            Phase::RemoveTags => "remove-tags",
            Phase::AddTags => "add-tags",
            Phase::Delete => "delete",
            Phase::List => "list",
        };
        f.write_str(phase)
    }
}

/// Failure of a single lifecycle operation.
#[derive(thiserror::Error, Debug)]
pub enum HandlerError {
    /// The request violates a resource invariant. Never retried.
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// The target parameter does not exist.
    #[error("Resource not found: {resource_type} with name '{name}'")]
    NotFound { resource_type: String, name: String },

    /// Create targeted a name that already exists.
    #[error("Resource conflict: {resource_type} with name '{name}' already exists")]
    Conflict { resource_type: String, name: String },

    /// Any other store failure, tagged with the phase it happened in.
    #[error("Upstream failure during {phase}: {source}")]
    Upstream {
        phase: Phase,
        #[source]
        source: StoreError,
    },
}

impl HandlerError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    pub fn not_found<R: Into<String>, N: Into<String>>(resource_type: R, name: N) -> Self {
        Self::NotFound { resource_type: resource_type.into(), name: name.into() }
    }

    pub fn conflict<R: Into<String>, N: Into<String>>(resource_type: R, name: N) -> Self {
        Self::Conflict { resource_type: resource_type.into(), name: name.into() }
    }

    pub fn upstream(phase: Phase, source: StoreError) -> Self {
        Self::Upstream { phase, source }
    }

    /// Classifies a store error raised while operating on `name`.
    ///
    /// `NotFound` and `AlreadyExists` become first-class handler errors;
    /// everything else is an upstream failure of `phase`.
    pub fn from_store(phase: Phase, name: &str, source: StoreError) -> Self {
        match source {
            StoreError::NotFound { .. } => Self::not_found(crate::model::TYPE_NAME, name),
            StoreError::AlreadyExists { .. } => Self::conflict(crate::model::TYPE_NAME, name),
            other => Self::upstream(phase, other),
        }
    }

    /// The host error code for this failure.
    pub fn code(&self) -> HandlerErrorCode {
        match self {
            HandlerError::Validation { .. } => HandlerErrorCode::InvalidRequest,
            HandlerError::NotFound { .. } => HandlerErrorCode::NotFound,
            HandlerError::Conflict { .. } => HandlerErrorCode::AlreadyExists,
            HandlerError::Upstream { source, .. } => match source {
                StoreError::Throttled { .. } => HandlerErrorCode::Throttling,
                StoreError::AccessDenied { .. } => HandlerErrorCode::AccessDenied,
                StoreError::ConnectionFailed { .. } => HandlerErrorCode::NetworkFailure,
                StoreError::InvalidRequest { .. } => HandlerErrorCode::InvalidRequest,
                StoreError::BackendError { .. } => HandlerErrorCode::ServiceInternalError,
                _ => HandlerErrorCode::InternalFailure,
            },
        }
    }

    /// The phase of an upstream failure.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            HandlerError::Upstream { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

impl From<PolicyError> for HandlerError {
    fn from(error: PolicyError) -> Self {
        Self::validation_field(error.to_string(), "PasswordOptions")
    }
}
