//! Cache Engine Module
//!
//! Implements the get/set/remove/vacuum semantics over an abstract storage
//! adapter. The engine owns no storage itself and knows nothing about HTTP
//! or process lifecycle.
//!
//! Eviction combines a hard TTL with an LRU ordering realized through expiry
//! refresh: every hit pushes an entry's expiry forward, so the entry with the
//! smallest expiry is the one read least recently. Both concerns are enforced
//! by a two-phase vacuum detached after every non-override write: expired
//! entries are swept first, then the oldest-by-expiry entries beyond the
//! configured limit. Running the TTL sweep first means the size sweep never
//! spends deletions on rows the TTL already claimed.
//!
//! The store may transiently exceed the limit between a write and the
//! completion of the vacuum it triggered.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheEntry, Clock, Field, PartialEntry, ValueGenerator};
use crate::error::{CacheError, Result};
use crate::storage::Storage;
use crate::tasks::spawn_vacuum;

// == Vacuum Report ==
/// Counts of entries removed by each vacuum phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VacuumReport {
    /// Entries removed by the TTL sweep
    pub expired: u64,
    /// Entries removed by the size sweep
    pub evicted: u64,
}

// == Cache Engine ==
/// Core cache logic over injected storage, clock, and value-generation
/// capabilities.
///
/// Cloning is cheap (shared state sits behind `Arc`), which is how the
/// vacuum pass gets detached onto its own task.
#[derive(Clone)]
pub struct CacheEngine {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    values: Arc<dyn ValueGenerator>,
    /// Maximum number of entries before the size sweep kicks in
    limit: u64,
    /// Entry lifetime in milliseconds
    ttl_ms: i64,
}

impl CacheEngine {
    // == Constructor ==
    /// Creates an engine over the given capabilities.
    ///
    /// # Arguments
    /// * `storage` - Persistence adapter all entries live in
    /// * `clock` - Time source for expiry computation
    /// * `values` - Generator for miss-created payloads
    /// * `limit` - Maximum entry count before size-based eviction
    /// * `ttl_ms` - Entry lifetime in milliseconds
    pub fn new(
        storage: Arc<dyn Storage>,
        clock: Arc<dyn Clock>,
        values: Arc<dyn ValueGenerator>,
        limit: u64,
        ttl_ms: i64,
    ) -> Self {
        Self {
            storage,
            clock,
            values,
            limit,
            ttl_ms,
        }
    }

    // == Get ==
    /// Returns the cached value for `key`, creating or regenerating the
    /// entry as needed.
    ///
    /// A miss generates a fresh value and writes it through [`set`]. A stale
    /// entry is overridden the same way, except the write skips the vacuum
    /// since the key is known to exist already. A fresh hit refreshes the
    /// entry's expiry without touching its value.
    ///
    /// The existence check and the subsequent write are not atomic; two
    /// concurrent misses on the same key both write, last writer wins.
    ///
    /// [`set`]: CacheEngine::set
    pub async fn get(&self, key: &str) -> Result<String> {
        let entry = match self.storage.find_one(key).await? {
            None => {
                debug!(key, "cache miss");
                self.set(key, self.values.generate(), false).await?
            }
            Some(entry) => {
                debug!(key, "cache hit");
                let now = self.clock.now_ms();
                if entry.is_stale(now) {
                    self.set(key, self.values.generate(), true).await?
                } else {
                    self.storage.update_expiry(key, now + self.ttl_ms).await?;
                    entry
                }
            }
        };
        Ok(entry.value)
    }

    // == Set ==
    /// Upserts `{key, value}` with an expiry of now + TTL.
    ///
    /// Unless `is_override` signals that the caller already knows the key
    /// exists, a vacuum is detached before returning; its outcome is not
    /// observable from here. The returned entry is the one just computed,
    /// not re-read from storage.
    pub async fn set(&self, key: &str, value: String, is_override: bool) -> Result<CacheEntry> {
        let expiry = self.clock.now_ms() + self.ttl_ms;
        let entry = CacheEntry::new(key, value, expiry);
        self.storage.upsert(entry.clone()).await?;
        if !is_override {
            spawn_vacuum(self.clone());
        }
        Ok(entry)
    }

    // == Remove ==
    /// Deletes the entry for `key`. Removing an absent key succeeds.
    pub async fn remove(&self, key: &str) -> Result<()> {
        self.storage.delete_one(key).await?;
        Ok(())
    }

    // == Remove All ==
    /// Deletes every entry. A no-op on an empty store.
    pub async fn remove_all(&self) -> Result<()> {
        let removed = self.storage.delete_all().await?;
        debug!(removed, "cleared all entries");
        Ok(())
    }

    // == Find All ==
    /// Returns all entries projected to the requested fields, in the
    /// adapter's iteration order. At least one field is required.
    pub async fn find_all(&self, fields: &[Field]) -> Result<Vec<PartialEntry>> {
        if fields.is_empty() {
            return Err(CacheError::InvalidArgument(
                "at least one property is required".to_string(),
            ));
        }
        Ok(self.storage.find(fields).await?)
    }

    // == Vacuum ==
    /// Runs the two-phase cleanup pass.
    ///
    /// Phase 1 deletes every entry whose expiry has passed. Phase 2 counts
    /// the remainder and, when the count still exceeds the limit, deletes
    /// the exceeding number of entries with the smallest expiry in a single
    /// batch.
    ///
    /// Safe to run concurrently with itself: both phases are idempotent
    /// deletions.
    pub async fn vacuum(&self) -> Result<VacuumReport> {
        let now = self.clock.now_ms();
        let expired = self.storage.delete_expired(now).await?;

        let count = self.storage.count().await?;
        if count <= self.limit {
            return Ok(VacuumReport { expired, evicted: 0 });
        }

        let exceeding = count - self.limit;
        let keys = self.storage.keys_by_expiry_asc(exceeding as usize).await?;
        let evicted = self.storage.delete_keys(&keys).await?;
        Ok(VacuumReport { expired, evicted })
    }
}
