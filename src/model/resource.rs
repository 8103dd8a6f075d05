//! The `Surnet::ParameterStore::Secret` resource model.

use serde::{Deserialize, Serialize};

use super::options::PasswordOptions;
use super::secret::{self, SecretString};
use super::tag::{duplicate_key, TagSet};
use crate::errors::{Error, HandlerError, Result};

/// Registered type name of the resource.
pub const TYPE_NAME: &str = "Surnet::ParameterStore::Secret";

/// JSON pointer of the primary identifier property.
pub const PRIMARY_IDENTIFIER: &str = "/properties/Name";

/// Desired or recorded state of one secret parameter.
///
/// Field names follow the host schema (`Name`, `PasswordOptions`,
/// `GeneratedValue`, ...). `password_input` and `generated_value` carry the
/// real value on the wire and are redacted everywhere else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_options: Option<PasswordOptions>,

    #[serde(default, with = "secret::exposed", skip_serializing_if = "Option::is_none")]
    pub password_input: Option<SecretString>,

    #[serde(default, with = "secret::exposed", skip_serializing_if = "Option::is_none")]
    pub generated_value: Option<SecretString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagSet>,
}

/// Where the password of a resource comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PasswordSource {
    Options(PasswordOptions),
    Input(SecretString),
}

impl ResourceModel {
    /// A name-only model, as returned by List.
    pub fn stub(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Default::default() }
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::serialization(e, "resource model"))
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| Error::serialization(e, "resource model"))
    }

    /// The primary identifier map, or `None` while `Name` is unset.
    pub fn primary_identifier(&self) -> Option<serde_json::Value> {
        self.name.as_ref().map(|name| {
            let mut identifier = serde_json::Map::new();
            identifier.insert(PRIMARY_IDENTIFIER.to_string(), name.clone().into());
            serde_json::Value::Object(identifier)
        })
    }

    /// The non-empty name, or a validation error.
    pub fn require_name(&self) -> std::result::Result<&str, HandlerError> {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(HandlerError::validation_field("Name is required", "Name")),
        }
    }

    /// Resolves the single password source.
    ///
    /// Both or neither of `PasswordOptions` and `PasswordInput` is a
    /// validation error.
    pub fn password_source(&self) -> std::result::Result<PasswordSource, HandlerError> {
        match (&self.password_options, &self.password_input) {
            (Some(_), Some(_)) => Err(HandlerError::validation(
                "Cannot specify both PasswordOptions and PasswordInput",
            )),
            (Some(options), None) => Ok(PasswordSource::Options(options.clone())),
            (None, Some(input)) => Ok(PasswordSource::Input(input.clone())),
            (None, None) => Err(HandlerError::validation(
                "Must specify either PasswordOptions or PasswordInput",
            )),
        }
    }

    /// The password options recorded on a previous state, if it used options.
    pub fn previous_options(&self) -> Option<&PasswordOptions> {
        match (&self.password_options, &self.password_input) {
            (Some(options), None) => Some(options),
            _ => None,
        }
    }

    pub fn tag_set(&self) -> TagSet {
        self.tags.clone().unwrap_or_default()
    }

    /// Rejects tag sets that repeat a key.
    pub fn validate_tags(&self) -> std::result::Result<(), HandlerError> {
        match self.tags.as_ref().and_then(duplicate_key) {
            Some(key) => Err(HandlerError::validation_field(
                format!("Tag key '{}' is specified more than once", key),
                "Tags",
            )),
            None => Ok(()),
        }
    }

    /// True when description, key id and tier match `other`.
    pub fn same_metadata(&self, other: &ResourceModel) -> bool {
        self.description == other.description
            && self.key_id == other.key_id
            && self.tier == other.tier
    }
}
