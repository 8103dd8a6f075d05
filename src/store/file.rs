//! JSON-file parameter store for local runs.
//!
//! Every call loads the file, applies one operation and writes the result
//! back through a temporary file and rename. The file holds decrypted values
//! and is meant for development only.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use super::client::{Parameter, ParameterPage, ParameterStore, PutParameter};
use super::error::Result;
use super::memory::{ParameterTable, DEFAULT_PAGE_SIZE};
use crate::model::TagSet;

const LOCAL_ARN_PREFIX: &str = "arn:aws:ssm:local:000000000000:";

/// [`ParameterStore`] persisted to a single JSON document.
#[derive(Debug)]
pub struct JsonFileParameterStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileParameterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<ParameterTable> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(ParameterTable::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ParameterTable::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, table: &ParameterTable) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(table)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), parameters = table.parameters.len(), "Saved parameter file");
        Ok(())
    }

    async fn mutate<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut ParameterTable) -> Result<()> + Send,
    {
        let _guard = self.lock.lock().await;
        let mut table = self.load().await?;
        apply(&mut table)?;
        self.save(&table).await
    }
}

#[async_trait]
impl ParameterStore for JsonFileParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<Parameter> {
        let _guard = self.lock.lock().await;
        self.load().await?.get(name, LOCAL_ARN_PREFIX)
    }

    async fn put_parameter(&self, request: PutParameter) -> Result<()> {
        self.mutate(move |table| table.put(request)).await
    }

    async fn delete_parameter(&self, name: &str) -> Result<()> {
        self.mutate(|table| table.delete(name)).await
    }

    async fn describe_parameters(&self, next_token: Option<&str>) -> Result<ParameterPage> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.page(next_token, DEFAULT_PAGE_SIZE))
    }

    async fn add_tags(&self, name: &str, tags: &TagSet) -> Result<()> {
        self.mutate(|table| table.add_tags(name, tags)).await
    }

    async fn remove_tags(&self, name: &str, keys: &BTreeSet<String>) -> Result<()> {
        self.mutate(|table| table.remove_tags(name, keys)).await
    }
}
