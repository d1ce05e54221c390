//! In-memory test backend
//!
//! Implements the backend contract over a `BTreeMap` guarded by one async
//! mutex. A transaction owns the mutex for its whole lifetime, so writers
//! are fully serialized; pending writes are buffered and applied at
//! commit, making rollback a no-op drop.
//!
//! This is coarser than the relational backend (a writer also excludes
//! readers while its transaction is open), but it preserves the observable
//! semantics the engine relies on: exclusive read-before-write, bounded
//! lock waits, and all-or-nothing application.

use crate::{BackendTransaction, StorageBackend};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use std::time::Duration;
use tessera_core::{Error, Item, KeyVersion, Partition, Result, Version};
use tokio::sync::{Mutex, OwnedMutexGuard};

const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct StoredRow {
    value: Option<Vec<u8>>,
    version: Version,
    created_at: DateTime<Utc>,
    last_updated_at: DateTime<Utc>,
}

/// Identity tuple; `BTreeMap` ordering over it is byte-wise per component,
/// which matches the listing order the contract requires.
type RowKey = (String, String, String);
type RowMap = BTreeMap<RowKey, StoredRow>;

fn row_key(partition: &Partition, key: &str) -> RowKey {
    (
        partition.tenant_id.clone(),
        partition.store_id.clone(),
        key.to_string(),
    )
}

/// In-memory [`StorageBackend`] for tests.
#[derive(Clone)]
pub struct MemoryBackend {
    rows: Arc<Mutex<RowMap>>,
    lock_timeout: Duration,
}

impl MemoryBackend {
    /// Create an empty backend with a 5s lock timeout.
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    /// Create an empty backend with an explicit lock timeout, for
    /// exercising contention behavior in tests.
    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        MemoryBackend {
            rows: Arc::new(Mutex::new(BTreeMap::new())),
            lock_timeout,
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, partition: &Partition, key: &str) -> Result<Option<Item>> {
        let rows = self.rows.lock().await;
        Ok(rows.get(&row_key(partition, key)).map(|row| Item {
            key: key.to_string(),
            value: row.value.clone(),
            version: row.version,
            created_at: row.created_at,
            last_updated_at: row.last_updated_at,
        }))
    }

    async fn list_keys(
        &self,
        partition: &Partition,
        prefix: Option<&str>,
        after_key: Option<&str>,
        limit: u32,
    ) -> Result<Vec<KeyVersion>> {
        let rows = self.rows.lock().await;
        let lower = match after_key {
            Some(after) => Bound::Excluded(row_key(partition, after)),
            None => Bound::Included(row_key(partition, "")),
        };
        let listed = rows
            .range((lower, Bound::Unbounded))
            .take_while(|((tenant, store, _), _)| {
                *tenant == partition.tenant_id && *store == partition.store_id
            })
            .filter(|((_, _, key), row)| {
                row.value.is_some() && prefix.map_or(true, |p| key.starts_with(p))
            })
            .take(limit as usize)
            .map(|((_, _, key), row)| KeyVersion {
                key: key.clone(),
                version: row.version,
            })
            .collect();
        Ok(listed)
    }

    async fn begin(&self) -> Result<Box<dyn BackendTransaction>> {
        let guard = tokio::time::timeout(self.lock_timeout, Arc::clone(&self.rows).lock_owned())
            .await
            .map_err(|_| {
                Error::LockTimeout(format!(
                    "in-memory store lock not acquired within {:?}",
                    self.lock_timeout
                ))
            })?;
        Ok(Box::new(MemoryTransaction {
            guard,
            pending: Vec::new(),
        }))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

struct PendingWrite {
    row: RowKey,
    value: Option<Vec<u8>>,
    version: Version,
}

/// Open transaction holding the store mutex; dropping it without commit
/// discards all pending writes.
struct MemoryTransaction {
    guard: OwnedMutexGuard<RowMap>,
    pending: Vec<PendingWrite>,
}

#[async_trait]
impl BackendTransaction for MemoryTransaction {
    async fn get_for_update(
        &mut self,
        partition: &Partition,
        key: &str,
    ) -> Result<Option<Version>> {
        Ok(self.guard.get(&row_key(partition, key)).map(|r| r.version))
    }

    async fn upsert(
        &mut self,
        partition: &Partition,
        key: &str,
        value: Option<&[u8]>,
        _expected: Version,
        new_version: Version,
    ) -> Result<()> {
        // The owned mutex already excludes every other writer, so the
        // expected-version re-check the relational backend needs is moot.
        self.pending.push(PendingWrite {
            row: row_key(partition, key),
            value: value.map(|v| v.to_vec()),
            version: new_version,
        });
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<()> {
        let now = Utc::now();
        for write in self.pending.drain(..) {
            match self.guard.get_mut(&write.row) {
                Some(row) => {
                    row.value = write.value;
                    row.version = write.version;
                    row.last_updated_at = now;
                }
                None => {
                    self.guard.insert(
                        write.row,
                        StoredRow {
                            value: write.value,
                            version: write.version,
                            created_at: now,
                            last_updated_at: now,
                        },
                    );
                }
            }
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
