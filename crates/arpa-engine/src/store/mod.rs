//! Key/value persistence over JSON blobs, the only seam the engine writes
//! through. Each logical operation issues exactly one `get` and, on
//! mutation, one `set`.

pub mod file;

pub use file::FileStore;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// The blob stored under `key`, `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the blob stored under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Every key currently present. Used by tooling; hosts backed by stores
    /// without enumeration may leave the default empty answer.
    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(Vec::new())
    }
}

/// In-memory store for tests and embedded hosts.
#[derive(Clone, Default)]
pub struct MemoryStore {
    blobs: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.blobs.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.blobs.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.blobs.lock().unwrap().keys().cloned().collect())
    }
}
