//! In-Memory Storage Adapter
//!
//! Process-local document store used by the server binary and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheEntry, Field, PartialEntry};
use crate::storage::{Storage, StorageResult};

// == Memory Store ==
/// HashMap-backed adapter satisfying the [`Storage`] contract.
///
/// Per-entry operations are atomic under the lock; nothing beyond that is
/// guaranteed, mirroring the per-document atomicity of a document database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStore {
    async fn find_one(&self, key: &str) -> StorageResult<Option<CacheEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn find(&self, fields: &[Field]) -> StorageResult<Vec<PartialEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.values().map(|entry| entry.project(fields)).collect())
    }

    async fn upsert(&self, entry: CacheEntry) -> StorageResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(entry.key.clone(), entry);
        Ok(())
    }

    async fn update_expiry(&self, key: &str, expiry: i64) -> StorageResult<()> {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(key) {
            entry.expiry = expiry;
        }
        Ok(())
    }

    async fn delete_one(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn delete_keys(&self, keys: &[String]) -> StorageResult<u64> {
        let mut entries = self.entries.write().await;
        let mut removed = 0;
        for key in keys {
            if entries.remove(key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn delete_expired(&self, cutoff: i64) -> StorageResult<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expiry >= cutoff);
        Ok((before - entries.len()) as u64)
    }

    async fn delete_all(&self) -> StorageResult<u64> {
        let mut entries = self.entries.write().await;
        let removed = entries.len() as u64;
        entries.clear();
        Ok(removed)
    }

    async fn count(&self) -> StorageResult<u64> {
        let entries = self.entries.read().await;
        Ok(entries.len() as u64)
    }

    async fn keys_by_expiry_asc(&self, limit: usize) -> StorageResult<Vec<String>> {
        let entries = self.entries.read().await;
        let mut ordered: Vec<(i64, &String)> = entries
            .values()
            .map(|entry| (entry.expiry, &entry.key))
            .collect();
        // Ties broken by key so eviction order stays deterministic
        ordered.sort();
        Ok(ordered
            .into_iter()
            .take(limit)
            .map(|(_, key)| key.clone())
            .collect())
    }
}
