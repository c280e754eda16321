//! Storage Module
//!
//! The engine persists entries exclusively through the [`Storage`] trait.
//! Any document database, relational table, or embedded key-value store with
//! an index on `expiry` can sit behind it; the engine never issues queries
//! beyond this vocabulary.

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::{CacheEntry, Field, PartialEntry};

mod memory;

pub use memory::MemoryStore;

// == Storage Error ==
/// Failure reported by a storage adapter.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The store could not be reached or refused the operation
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Convenience Result type for adapter operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

// == Storage Trait ==
/// Narrow persistence interface between the cache engine and its store.
///
/// Deletions are idempotent: removing an absent key is a no-op, which is
/// what lets concurrent vacuum passes run without mutual exclusion.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Looks up the entry stored under `key`.
    async fn find_one(&self, key: &str) -> StorageResult<Option<CacheEntry>>;

    /// Returns every entry projected to `fields`, in adapter iteration order.
    async fn find(&self, fields: &[Field]) -> StorageResult<Vec<PartialEntry>>;

    /// Inserts the entry, replacing any previous entry with the same key.
    async fn upsert(&self, entry: CacheEntry) -> StorageResult<()>;

    /// Rewrites only the expiry of the entry under `key`.
    ///
    /// A no-op when the key is absent; the entry may have been deleted by a
    /// concurrent vacuum between the caller's read and this write.
    async fn update_expiry(&self, key: &str, expiry: i64) -> StorageResult<()>;

    /// Deletes the entry under `key`, if any.
    async fn delete_one(&self, key: &str) -> StorageResult<()>;

    /// Deletes all entries whose key is in `keys`, returning the number removed.
    async fn delete_keys(&self, keys: &[String]) -> StorageResult<u64>;

    /// Deletes all entries with `expiry` strictly below `cutoff`, returning
    /// the number removed.
    async fn delete_expired(&self, cutoff: i64) -> StorageResult<u64>;

    /// Deletes every entry, returning the number removed.
    async fn delete_all(&self) -> StorageResult<u64>;

    /// Returns the number of stored entries.
    async fn count(&self) -> StorageResult<u64>;

    /// Returns the keys of the `limit` entries with the smallest expiry,
    /// ascending.
    async fn keys_by_expiry_asc(&self, limit: usize) -> StorageResult<Vec<String>>;
}
