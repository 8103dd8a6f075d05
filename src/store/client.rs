//! Core parameter store trait and request/response types.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::error::Result;
use crate::model::{SecretString, TagSet};

/// Parameter type every secret is written as.
pub const SECURE_STRING: &str = "SecureString";

/// A parameter as returned by a decrypted read.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: SecretString,
    pub arn: String,
    pub description: Option<String>,
    pub tier: Option<String>,
    pub version: u64,
}

/// A write of a parameter value and its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PutParameter {
    pub name: String,
    pub value: SecretString,
    pub description: Option<String>,
    pub key_id: Option<String>,
    pub tier: Option<String>,
    /// Initial tags. Only valid when `overwrite` is false.
    pub tags: TagSet,
    /// Replace an existing parameter instead of failing with `AlreadyExists`.
    pub overwrite: bool,
}

impl PutParameter {
    pub fn new(name: impl Into<String>, value: SecretString) -> Self {
        Self {
            name: name.into(),
            value,
            description: None,
            key_id: None,
            tier: None,
            tags: TagSet::new(),
            overwrite: false,
        }
    }
}

/// Metadata of a parameter, without its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSummary {
    pub name: String,
    pub description: Option<String>,
    pub tier: Option<String>,
}

/// One page of a parameter listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPage {
    pub parameters: Vec<ParameterSummary>,
    pub next_token: Option<String>,
}

/// Remote secure key-value parameter store.
///
/// Implementations MUST NOT log parameter values. Every method is a single
/// remote call; retries belong to the transport, not to callers of this trait.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Reads a parameter with its decrypted value.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`](super::StoreError::NotFound) if the name is absent
    async fn get_parameter(&self, name: &str) -> Result<Parameter>;

    /// Writes a parameter value and metadata.
    ///
    /// # Errors
    ///
    /// - [`StoreError::AlreadyExists`](super::StoreError::AlreadyExists) when
    ///   `overwrite` is false and the name exists
    async fn put_parameter(&self, request: PutParameter) -> Result<()>;

    /// Deletes a parameter and its tags.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`](super::StoreError::NotFound) if the name is absent
    async fn delete_parameter(&self, name: &str) -> Result<()>;

    /// Lists one page of parameters, starting after `next_token`.
    async fn describe_parameters(&self, next_token: Option<&str>) -> Result<ParameterPage>;

    /// Adds tags, replacing the value of keys that already exist.
    async fn add_tags(&self, name: &str, tags: &TagSet) -> Result<()>;

    /// Removes tags by key. Unknown keys are ignored.
    async fn remove_tags(&self, name: &str, keys: &BTreeSet<String>) -> Result<()>;

    /// Walks every page of [`describe_parameters`](Self::describe_parameters).
    async fn list_all(&self) -> Result<Vec<ParameterSummary>> {
        let mut parameters = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let page = self.describe_parameters(next_token.as_deref()).await?;
            parameters.extend(page.parameters);
            match page.next_token {
                Some(token) => next_token = Some(token),
                None => return Ok(parameters),
            }
        }
    }
}

#[async_trait]
impl<T: ParameterStore + ?Sized> ParameterStore for Arc<T> {
    async fn get_parameter(&self, name: &str) -> Result<Parameter> {
        (**self).get_parameter(name).await
    }

    async fn put_parameter(&self, request: PutParameter) -> Result<()> {
        (**self).put_parameter(request).await
    }

    async fn delete_parameter(&self, name: &str) -> Result<()> {
        (**self).delete_parameter(name).await
    }

    async fn describe_parameters(&self, next_token: Option<&str>) -> Result<ParameterPage> {
        (**self).describe_parameters(next_token).await
    }

    async fn add_tags(&self, name: &str, tags: &TagSet) -> Result<()> {
        (**self).add_tags(name, tags).await
    }

    async fn remove_tags(&self, name: &str, keys: &BTreeSet<String>) -> Result<()> {
        (**self).remove_tags(name, keys).await
    }

    async fn list_all(&self) -> Result<Vec<ParameterSummary>> {
        (**self).list_all().await
    }
}
