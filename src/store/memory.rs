//! In-process parameter store.
//!
//! Keeps parameters in a `BTreeMap` behind a `tokio::sync::RwLock`. Used for
//! local runs and tests, and as the record format of
//! [`JsonFileParameterStore`](super::JsonFileParameterStore).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;
use tokio::sync::RwLock;
use tracing::debug;

use super::client::{
    Parameter, ParameterPage, ParameterStore, ParameterSummary, PutParameter, SECURE_STRING,
};
use super::error::{Result, StoreError};
use crate::model::{secret, SecretString, TagSet};

/// Default listing page size, matching the remote service's maximum.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Tiers the store accepts.
pub const TIERS: [&str; 3] = ["Standard", "Advanced", "Intelligent-Tiering"];

/// One stored parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredParameter {
    #[serde(serialize_with = "secret::exposed::serialize_required")]
    pub value: SecretString,
    #[serde(rename = "type")]
    pub parameter_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    pub version: u64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub last_modified: DateTime<Utc>,
}

/// Parameter records plus the logic every local backend shares.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterTable {
    #[serde(default)]
    pub parameters: BTreeMap<String, StoredParameter>,
}

impl ParameterTable {
    pub(crate) fn get(&self, name: &str, arn_prefix: &str) -> Result<Parameter> {
        let stored = self.parameters.get(name).ok_or_else(|| StoreError::not_found(name))?;
        Ok(Parameter {
            name: name.to_string(),
            value: stored.value.clone(),
            arn: arn_for(arn_prefix, name),
            description: stored.description.clone(),
            tier: stored.tier.clone(),
            version: stored.version,
        })
    }

    pub(crate) fn put(&mut self, request: PutParameter) -> Result<()> {
        if request.name.trim().is_empty() {
            return Err(StoreError::invalid_request("parameter name cannot be empty"));
        }
        if let Some(tier) = request.tier.as_deref() {
            if !TIERS.contains(&tier) {
                return Err(StoreError::invalid_request(format!("unknown tier '{}'", tier)));
            }
        }

        let existing = self.parameters.get(&request.name);
        if existing.is_some() && !request.overwrite {
            return Err(StoreError::already_exists(&request.name));
        }
        if request.overwrite && !request.tags.is_empty() {
            return Err(StoreError::invalid_request(
                "tags cannot be supplied on an overwriting put",
            ));
        }

        let (version, tags) = match existing {
            Some(previous) => (previous.version + 1, previous.tags.clone()),
            None => (1, request.tags.iter().map(|t| (t.key.clone(), t.value.clone())).collect()),
        };

        self.parameters.insert(
            request.name,
            StoredParameter {
                value: request.value,
                parameter_type: SECURE_STRING.to_string(),
                description: request.description,
                key_id: request.key_id,
                tier: request.tier,
                version,
                tags,
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }

    pub(crate) fn delete(&mut self, name: &str) -> Result<()> {
        self.parameters.remove(name).map(|_| ()).ok_or_else(|| StoreError::not_found(name))
    }

    pub(crate) fn page(&self, next_token: Option<&str>, page_size: usize) -> ParameterPage {
        let lower = match next_token {
            Some(token) => Bound::Excluded(token.to_string()),
            None => Bound::Unbounded,
        };
        let mut entries = self.parameters.range((lower, Bound::Unbounded));

        let parameters: Vec<ParameterSummary> = entries
            .by_ref()
            .take(page_size.max(1))
            .map(|(name, stored)| ParameterSummary {
                name: name.clone(),
                description: stored.description.clone(),
                tier: stored.tier.clone(),
            })
            .collect();

        let next_token = match (entries.next(), parameters.last()) {
            (Some(_), Some(last)) => Some(last.name.clone()),
            _ => None,
        };
        ParameterPage { parameters, next_token }
    }

    pub(crate) fn add_tags(&mut self, name: &str, tags: &TagSet) -> Result<()> {
        let stored = self.parameters.get_mut(name).ok_or_else(|| StoreError::not_found(name))?;
        for tag in tags {
            stored.tags.insert(tag.key.clone(), tag.value.clone());
        }
        Ok(())
    }

    pub(crate) fn remove_tags(&mut self, name: &str, keys: &BTreeSet<String>) -> Result<()> {
        let stored = self.parameters.get_mut(name).ok_or_else(|| StoreError::not_found(name))?;
        stored.tags.retain(|key, _| !keys.contains(key));
        Ok(())
    }

    pub(crate) fn tags(&self, name: &str) -> Option<TagSet> {
        self.parameters
            .get(name)
            .map(|stored| stored.tags.iter().map(|(k, v)| crate::model::Tag::new(k, v)).collect())
    }
}

pub(crate) fn arn_for(prefix: &str, name: &str) -> String {
    format!("{}parameter/{}", prefix, name.trim_start_matches('/'))
}

/// In-memory [`ParameterStore`].
#[derive(Debug)]
pub struct InMemoryParameterStore {
    table: RwLock<ParameterTable>,
    arn_prefix: String,
    page_size: usize,
}

impl Default for InMemoryParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryParameterStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(ParameterTable::default()),
            arn_prefix: "arn:aws:ssm:us-east-1:000000000000:".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Uses `region` and `account_id` when building ARNs.
    pub fn with_account(mut self, region: &str, account_id: &str) -> Self {
        self.arn_prefix = format!("arn:aws:ssm:{}:{}:", region, account_id);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Current tags of a parameter, for inspection.
    pub async fn tags(&self, name: &str) -> Option<TagSet> {
        self.table.read().await.tags(name)
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.parameters.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ParameterStore for InMemoryParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<Parameter> {
        debug!(name = %name, "Reading parameter from memory");
        self.table.read().await.get(name, &self.arn_prefix)
    }

    async fn put_parameter(&self, request: PutParameter) -> Result<()> {
        debug!(name = %request.name, overwrite = request.overwrite, "Writing parameter to memory");
        self.table.write().await.put(request)
    }

    async fn delete_parameter(&self, name: &str) -> Result<()> {
        debug!(name = %name, "Deleting parameter from memory");
        self.table.write().await.delete(name)
    }

    async fn describe_parameters(&self, next_token: Option<&str>) -> Result<ParameterPage> {
        Ok(self.table.read().await.page(next_token, self.page_size))
    }

    async fn add_tags(&self, name: &str, tags: &TagSet) -> Result<()> {
        self.table.write().await.add_tags(name, tags)
    }

    async fn remove_tags(&self, name: &str, keys: &BTreeSet<String>) -> Result<()> {
        self.table.write().await.remove_tags(name, keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tag_set;

    fn put(name: &str, value: &str) -> PutParameter {
        PutParameter::new(name, SecretString::new(value))
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryParameterStore::new().with_account("eu-west-1", "123456789012");
        store
            .put_parameter(PutParameter { description: Some("db".into()), ..put("/app/db", "pw") })
            .await
            .unwrap();

        let parameter = store.get_parameter("/app/db").await.unwrap();
        assert_eq!(parameter.value.expose_secret(), "pw");
        assert_eq!(parameter.arn, "arn:aws:ssm:eu-west-1:123456789012:parameter/app/db");
        assert_eq!(parameter.description.as_deref(), Some("db"));
        assert_eq!(parameter.version, 1);
    }

    #[tokio::test]
    async fn test_put_without_overwrite_conflicts() {
        let store = InMemoryParameterStore::new();
        store.put_parameter(put("p1", "a")).await.unwrap();

        let err = store.put_parameter(put("p1", "b")).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
        assert_eq!(store.get_parameter("p1").await.unwrap().value.expose_secret(), "a");
    }

    #[tokio::test]
    async fn test_overwrite_bumps_version_and_keeps_tags() {
        let store = InMemoryParameterStore::new();
        store
            .put_parameter(PutParameter { tags: tag_set([("env", "dev")]), ..put("p1", "a") })
            .await
            .unwrap();
        store.put_parameter(PutParameter { overwrite: true, ..put("p1", "b") }).await.unwrap();

        let parameter = store.get_parameter("p1").await.unwrap();
        assert_eq!(parameter.version, 2);
        assert_eq!(store.tags("p1").await, Some(tag_set([("env", "dev")])));
    }

    #[tokio::test]
    async fn test_overwrite_with_tags_rejected() {
        let store = InMemoryParameterStore::new();
        store.put_parameter(put("p1", "a")).await.unwrap();
        let request =
            PutParameter { overwrite: true, tags: tag_set([("k", "v")]), ..put("p1", "b") };

        let err = store.put_parameter(request).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidRequest { .. }));
    }

    #[tokio::test]
    async fn test_unknown_tier_rejected() {
        let store = InMemoryParameterStore::new();
        let request = PutParameter { tier: Some("Premium".into()), ..put("p1", "a") };
        assert!(matches!(
            store.put_parameter(request).await,
            Err(StoreError::InvalidRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = InMemoryParameterStore::new();
        assert!(matches!(store.delete_parameter("nope").await, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_tag_mutations() {
        let store = InMemoryParameterStore::new();
        store
            .put_parameter(PutParameter { tags: tag_set([("a", "1"), ("b", "2")]), ..put("p", "x") })
            .await
            .unwrap();

        store.add_tags("p", &tag_set([("a", "9"), ("c", "3")])).await.unwrap();
        store.remove_tags("p", &["b".to_string()].into_iter().collect()).await.unwrap();

        assert_eq!(store.tags("p").await, Some(tag_set([("a", "9"), ("c", "3")])));
    }

    #[tokio::test]
    async fn test_pagination_walks_every_entry() {
        let store = InMemoryParameterStore::new().with_page_size(2);
        for name in ["p1", "p2", "p3", "p4", "p5"] {
            store.put_parameter(put(name, "v")).await.unwrap();
        }

        let first = store.describe_parameters(None).await.unwrap();
        assert_eq!(first.parameters.len(), 2);
        assert_eq!(first.next_token.as_deref(), Some("p2"));

        let names: Vec<String> =
            store.list_all().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["p1", "p2", "p3", "p4", "p5"]);
    }

    #[tokio::test]
    async fn test_exact_page_has_no_token() {
        let store = InMemoryParameterStore::new().with_page_size(2);
        store.put_parameter(put("p1", "v")).await.unwrap();
        store.put_parameter(put("p2", "v")).await.unwrap();

        let page = store.describe_parameters(None).await.unwrap();
        assert_eq!(page.parameters.len(), 2);
        assert_eq!(page.next_token, None);
    }
}
