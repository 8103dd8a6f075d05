//! Shared helpers for lifecycle integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use paramsecret::model::{PasswordOptions, ResourceModel, SecretString, TagSet};
use paramsecret::store::{
    InMemoryParameterStore, Parameter, ParameterPage, ParameterStore, PutParameter, StoreError,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

/// Which store method a call went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Get,
    Put,
    Delete,
    Describe,
    AddTags,
    RemoveTags,
}

/// A recorded store call.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Get(String),
    Put { name: String, overwrite: bool },
    Delete(String),
    Describe(Option<String>),
    AddTags(String, TagSet),
    RemoveTags(String, BTreeSet<String>),
}

impl StoreCall {
    pub fn kind(&self) -> CallKind {
        match self {
            StoreCall::Get(_) => CallKind::Get,
            StoreCall::Put { .. } => CallKind::Put,
            StoreCall::Delete(_) => CallKind::Delete,
            StoreCall::Describe(_) => CallKind::Describe,
            StoreCall::AddTags(..) => CallKind::AddTags,
            StoreCall::RemoveTags(..) => CallKind::RemoveTags,
        }
    }
}

/// In-memory store that records every call and can fail on demand.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryParameterStore,
    calls: Mutex<Vec<StoreCall>>,
    failures: Mutex<HashMap<CallKind, StoreError>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self { inner: InMemoryParameterStore::new().with_page_size(page_size), ..Self::default() }
    }

    /// Seeds a parameter without recording the call.
    pub async fn seed(&self, name: &str, value: &str, tags: TagSet) {
        let request = PutParameter { tags, ..PutParameter::new(name, SecretString::new(value)) };
        self.inner.put_parameter(request).await.expect("seed parameter");
    }

    /// Makes the next call of `kind` fail with `error`.
    pub fn fail_next(&self, kind: CallKind, error: StoreError) {
        self.failures.lock().unwrap().insert(kind, error);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_kinds(&self) -> Vec<CallKind> {
        self.calls().iter().map(StoreCall::kind).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub async fn value(&self, name: &str) -> Option<String> {
        self.inner.get_parameter(name).await.ok().map(|p| p.value.expose_secret().to_string())
    }

    pub async fn tags(&self, name: &str) -> Option<TagSet> {
        self.inner.tags(name).await
    }

    fn record(&self, call: StoreCall) -> Result<(), StoreError> {
        let kind = call.kind();
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().remove(&kind) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ParameterStore for RecordingStore {
    async fn get_parameter(&self, name: &str) -> Result<Parameter, StoreError> {
        self.record(StoreCall::Get(name.to_string()))?;
        self.inner.get_parameter(name).await
    }

    async fn put_parameter(&self, request: PutParameter) -> Result<(), StoreError> {
        self.record(StoreCall::Put { name: request.name.clone(), overwrite: request.overwrite })?;
        self.inner.put_parameter(request).await
    }

    async fn delete_parameter(&self, name: &str) -> Result<(), StoreError> {
        self.record(StoreCall::Delete(name.to_string()))?;
        self.inner.delete_parameter(name).await
    }

    async fn describe_parameters(&self, next_token: Option<&str>) -> Result<ParameterPage, StoreError> {
        self.record(StoreCall::Describe(next_token.map(str::to_string)))?;
        self.inner.describe_parameters(next_token).await
    }

    async fn add_tags(&self, name: &str, tags: &TagSet) -> Result<(), StoreError> {
        self.record(StoreCall::AddTags(name.to_string(), tags.clone()))?;
        self.inner.add_tags(name, tags).await
    }

    async fn remove_tags(&self, name: &str, keys: &BTreeSet<String>) -> Result<(), StoreError> {
        self.record(StoreCall::RemoveTags(name.to_string(), keys.clone()))?;
        self.inner.remove_tags(name, keys).await
    }
}

pub fn with_options(name: &str, options: PasswordOptions) -> ResourceModel {
    ResourceModel { password_options: Some(options), ..ResourceModel::stub(name) }
}

pub fn with_input(name: &str, input: &str) -> ResourceModel {
    ResourceModel { password_input: Some(input.into()), ..ResourceModel::stub(name) }
}

pub fn with_tags(model: ResourceModel, tags: TagSet) -> ResourceModel {
    ResourceModel { tags: Some(tags), ..model }
}
