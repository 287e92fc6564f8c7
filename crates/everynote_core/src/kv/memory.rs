//! In-memory key-value store.
//!
//! # Responsibility
//! - Provide a fast adapter for tests and ephemeral sessions.
//!
//! # Invariants
//! - Not durable: contents vanish on drop, so this backend never stands in
//!   for the file-backed store where restart survival matters.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{KeyValueStore, KvResult};

/// Hash-map adapter with the same contract as the durable store.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
