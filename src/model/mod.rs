//! # Resource Model
//!
//! Statically defined types for the secret parameter resource and explicit
//! JSON marshalling to and from the host schema.

pub mod options;
pub mod resource;
pub mod secret;
pub mod tag;

pub use options::{PasswordOptions, DEFAULT_PASSWORD_LENGTH};
pub use resource::{PasswordSource, ResourceModel, PRIMARY_IDENTIFIER, TYPE_NAME};
pub use secret::SecretString;
pub use tag::{merge_system_tags, tag_set, Tag, TagSet};

/// Type-level configuration supplied by the host.
///
/// The resource type declares no configuration properties; any payload is
/// kept verbatim and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TypeConfiguration(pub serde_json::Map<String, serde_json::Value>);
