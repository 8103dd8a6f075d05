//! Host response payload.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, HandlerError, HandlerErrorCode, Result};
use crate::model::ResourceModel;

/// Outcome status of an invocation.
///
/// Every operation finishes within one invocation, so handlers never report
/// `InProgress`; the variant exists for the host protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Success,
    Failed,
    InProgress,
}

/// Result of one lifecycle invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub status: OperationStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<ResourceModel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_models: Option<Vec<ResourceModel>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<HandlerErrorCode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ProgressEvent {
    fn with_status(status: OperationStatus) -> Self {
        Self {
            status,
            resource_model: None,
            resource_models: None,
            error_code: None,
            message: None,
            next_token: None,
        }
    }

    pub fn success(model: ResourceModel) -> Self {
        Self { resource_model: Some(model), ..Self::with_status(OperationStatus::Success) }
    }

    /// Success without a model, as returned by Delete.
    pub fn success_empty() -> Self {
        Self::with_status(OperationStatus::Success)
    }

    pub fn list(models: Vec<ResourceModel>, next_token: Option<String>) -> Self {
        Self {
            resource_models: Some(models),
            next_token,
            ..Self::with_status(OperationStatus::Success)
        }
    }

    pub fn failed(error: &HandlerError) -> Self {
        Self {
            error_code: Some(error.code()),
            message: Some(error.to_string()),
            ..Self::with_status(OperationStatus::Failed)
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| Error::serialization(e, "progress event"))
    }
}
