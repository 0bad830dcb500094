//! Whole-file JSON store: a single object keyed by hostname, re-read and
//! rewritten in full on every mutation. No incremental diffing; cross-process
//! writers race last-write-wins.

use super::{Store, StoreError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.arpa/store.json`, falling back to the working directory when no
    /// home directory is available.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".arpa")
            .join("store.json")
    }

    async fn load(&self) -> Result<Map<String, Value>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(map)?).await?;
        debug!(path = %self.path.display(), entries = map.len(), "store written");
        Ok(())
    }
}

#[async_trait]
impl Store for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let mut map = self.load().await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut map = self.load().await?;
        map.insert(key.to_string(), value);
        self.save(&map).await
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.load().await?.keys().cloned().collect())
    }
}
