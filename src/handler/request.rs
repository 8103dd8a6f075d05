//! Host invocation payload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::{Error, HandlerError, Result};
use crate::model::{ResourceModel, TypeConfiguration};

/// Lifecycle operation requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Action::Create => "CREATE",
            Action::Read => "READ",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
            Action::List => "LIST",
        };
        f.write_str(action)
    }
}

/// One lifecycle invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerRequest {
    pub action: Action,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_resource_state: Option<ResourceModel>,

    /// Only supplied on Update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_resource_state: Option<ResourceModel>,

    /// Tags the host attaches to everything it provisions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub system_tags: BTreeMap<String, String>,

    #[serde(default)]
    pub type_configuration: TypeConfiguration,

    /// Continuation token for List.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_resource_identifier: Option<String>,
}

impl HandlerRequest {
    fn new(action: Action) -> Self {
        Self {
            action,
            desired_resource_state: None,
            previous_resource_state: None,
            system_tags: BTreeMap::new(),
            type_configuration: TypeConfiguration::default(),
            next_token: None,
            logical_resource_identifier: None,
        }
    }

    pub fn create(desired: ResourceModel) -> Self {
        Self { desired_resource_state: Some(desired), ..Self::new(Action::Create) }
    }

    pub fn read(desired: ResourceModel) -> Self {
        Self { desired_resource_state: Some(desired), ..Self::new(Action::Read) }
    }

    pub fn update(desired: ResourceModel, previous: ResourceModel) -> Self {
        Self {
            desired_resource_state: Some(desired),
            previous_resource_state: Some(previous),
            ..Self::new(Action::Update)
        }
    }

    pub fn delete(desired: ResourceModel) -> Self {
        Self { desired_resource_state: Some(desired), ..Self::new(Action::Delete) }
    }

    pub fn list(next_token: Option<String>) -> Self {
        Self { next_token, ..Self::new(Action::List) }
    }

    pub fn with_system_tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.system_tags = tags.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::serialization(e, "handler request"))
    }

    /// The desired state, which every action but List requires.
    pub fn desired(&self) -> std::result::Result<&ResourceModel, HandlerError> {
        self.desired_resource_state
            .as_ref()
            .ok_or_else(|| HandlerError::validation("desiredResourceState is required"))
    }

    /// The previous state, which Update requires.
    pub fn previous(&self) -> std::result::Result<&ResourceModel, HandlerError> {
        self.previous_resource_state
            .as_ref()
            .ok_or_else(|| HandlerError::validation("previousResourceState is required for update"))
    }

    /// Name of the target resource, when the desired state carries one.
    pub fn resource_name(&self) -> Option<&str> {
        self.desired_resource_state.as_ref().and_then(|m| m.name.as_deref())
    }
}
