//! Transactional write coordinator
//!
//! Applies a write request atomically: every key passes its version check
//! and is written, or nothing is written and every failing key is
//! reported with its actual stored version.
//!
//! ## Algorithm
//!
//! 1. Plan: validate, inject the sequence constraint, sort by the
//!    deterministic key order (see `plan`). The fixed global order is
//!    what keeps concurrent overlapping requests deadlock-free.
//! 2. Open a backend transaction.
//! 3. For each key in order, read the stored version under an exclusive
//!    row lock. This is the only intended blocking point in the core,
//!    and the backend bounds it with its lock timeout.
//! 4. Run conflict resolution on every (stored, expected) pair. Any
//!    conflict aborts the transaction and reports the full conflicting
//!    set.
//! 5. Otherwise write all values/tombstones at their incremented
//!    versions and commit. Commit failure is surfaced as a retryable
//!    error, never retried internally.
//!
//! Cancellation: dropping the future between begin and commit drops the
//! backend transaction, which rolls back. No partial effect survives.

use crate::listing;
use crate::plan::{self, PlannedWrite};
use std::sync::Arc;
use tessera_backend::{BackendTransaction, StorageBackend};
use tessera_core::{
    resolve, Error, Item, KeyConflict, KeyVersionPage, Limits, ListRequest, Partition, Result,
    Version, WriteOutcome, WriteRequest, STORE_SEQUENCE_KEY,
};
use tracing::{debug, warn};

/// The inbound-operation surface: get, put, delete, list, health.
///
/// Holds the backend handle and the validation limits. Cheap to clone;
/// share one per process or one per worker, both are fine.
#[derive(Clone)]
pub struct StoreEngine {
    backend: Arc<dyn StorageBackend>,
    limits: Limits,
}

impl StoreEngine {
    /// Create an engine over `backend` with default limits.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_limits(backend, Limits::default())
    }

    /// Create an engine with explicit limits.
    pub fn with_limits(backend: Arc<dyn StorageBackend>, limits: Limits) -> Self {
        StoreEngine { backend, limits }
    }

    /// Fetch a single item.
    ///
    /// Tombstoned keys return [`Error::NotFound`], indistinguishable from
    /// never-written keys; their version slot is still enforced on writes.
    /// Reading the store sequence key while it is absent yields a
    /// synthetic empty item at version 0, so callers can bootstrap the
    /// sequence without a special case.
    pub async fn get_object(&self, partition: &Partition, key: &str) -> Result<Item> {
        self.limits.validate_partition(partition)?;
        self.limits.validate_key(key)?;
        match self.backend.get(partition, key).await? {
            Some(item) if item.is_tombstone() => {
                Err(Error::NotFound(format!("key {:?} not found", key)))
            }
            Some(item) => Ok(item),
            None if key == STORE_SEQUENCE_KEY => {
                let now = chrono::Utc::now();
                Ok(Item {
                    key: STORE_SEQUENCE_KEY.to_string(),
                    value: Some(Vec::new()),
                    version: Version::ABSENT,
                    created_at: now,
                    last_updated_at: now,
                })
            }
            None => Err(Error::NotFound(format!("key {:?} not found", key))),
        }
    }

    /// Apply a write request atomically.
    ///
    /// On [`Error::VersionConflict`] no key was mutated and the report
    /// names every failing key with its actual stored version.
    pub async fn put_objects(&self, partition: &Partition, request: WriteRequest) -> Result<()> {
        self.limits.validate_partition(partition)?;
        let writes = plan::plan_writes(&self.limits, request)?;
        if writes.is_empty() {
            debug!(%partition, "empty write request; nothing to do");
            return Ok(());
        }
        self.apply_writes(partition, writes).await
    }

    /// Tombstone a single key at `expected_version`.
    ///
    /// Same conflict semantics as [`put_objects`]; the key's row is
    /// retained, and recreating it requires the tombstone's version.
    ///
    /// [`put_objects`]: StoreEngine::put_objects
    pub async fn delete_object(
        &self,
        partition: &Partition,
        key: &str,
        expected_version: Version,
    ) -> Result<()> {
        self.put_objects(partition, WriteRequest::delete(key, expected_version))
            .await
    }

    /// Enumerate live keys and versions, paginated. See the listing
    /// module for the page/cursor semantics.
    pub async fn list_key_versions(
        &self,
        partition: &Partition,
        request: ListRequest,
    ) -> Result<KeyVersionPage> {
        listing::list_key_versions(self.backend.as_ref(), &self.limits, partition, request).await
    }

    /// Round-trip to the backend, for an external health endpoint.
    pub async fn health_check(&self) -> Result<()> {
        self.backend.health_check().await
    }

    async fn apply_writes(&self, partition: &Partition, writes: Vec<PlannedWrite>) -> Result<()> {
        let mut txn = self.backend.begin().await?;

        // Lock-read every key in plan order, collecting all conflicts
        // rather than stopping at the first so the caller can reconcile
        // its whole batch in one retry.
        let mut next_versions = Vec::with_capacity(writes.len());
        let mut conflicts = Vec::new();
        for write in &writes {
            let stored = match txn.get_for_update(partition, &write.key).await {
                Ok(stored) => stored,
                Err(e) => return abort(txn, e).await,
            };
            match resolve(stored, write.expected) {
                WriteOutcome::Proceed { next } => next_versions.push(next),
                WriteOutcome::Conflict { actual } => conflicts.push(KeyConflict {
                    key: write.key.clone(),
                    actual,
                }),
            }
        }

        if !conflicts.is_empty() {
            warn!(
                %partition,
                conflicting = conflicts.len(),
                total = writes.len(),
                "write request conflicted; rolling back"
            );
            return abort(txn, Error::VersionConflict { conflicts }).await;
        }

        // All checks passed; next_versions is index-aligned with writes.
        for (write, next) in writes.iter().zip(next_versions) {
            if let Err(e) = txn
                .upsert(partition, &write.key, write.value.as_deref(), write.expected, next)
                .await
            {
                return abort(txn, e).await;
            }
        }

        txn.commit().await?;
        debug!(%partition, items = writes.len(), "write request committed");
        Ok(())
    }
}

/// Roll back and surface `err`. A rollback failure is logged, not
/// propagated; the original error is what the caller must see.
async fn abort<T>(txn: Box<dyn BackendTransaction>, err: Error) -> Result<T> {
    if let Err(rollback_err) = txn.rollback().await {
        warn!(error = %rollback_err, "rollback failed while aborting write");
    }
    Err(err)
}
