//! Key-value store boundary.
//!
//! A single flat keyspace holds both result entries (fingerprint → payload)
//! and tag mappings (tag → fingerprint). No TTL, no transactions; per-key
//! operations are atomic as far as the backing store guarantees.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::error::StoreError;

/// Generic get/put/forget over string keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError>;
    async fn forget(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store backed by a concurrent map.
///
/// This is the deployment default; the trait exists so an external store can
/// be swapped in at the composition root without touching cache logic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries, counting both results and tag mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn forget(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
