//! Storage backend contract and implementations
//!
//! This crate defines the interface a durable store must satisfy
//! ([`StorageBackend`] / [`BackendTransaction`]) and provides two
//! implementations:
//!
//! - [`PostgresBackend`]: the relational reference implementation, using
//!   row-level locking (`SELECT ... FOR UPDATE`) inside read-committed
//!   transactions.
//! - [`MemoryBackend`]: an in-process backend for tests, serializing
//!   writers behind one async mutex.
//!
//! The engine depends only on the traits; backend choice is dynamic
//! dispatch at construction time.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod memory;
pub mod postgres;

pub use config::PostgresConfig;
pub use memory::MemoryBackend;
pub use postgres::PostgresBackend;

use async_trait::async_trait;
use tessera_core::{Item, KeyVersion, Partition, Result, Version};

/// A durable store the engine can run against.
///
/// Every method is scoped by a [`Partition`]; there is no way to address
/// an item without supplying one.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Fetch a single item, tombstones included. `None` if no row exists.
    ///
    /// Never blocked by concurrent writers holding row locks.
    async fn get(&self, partition: &Partition, key: &str) -> Result<Option<Item>>;

    /// List live (non-tombstoned) keys and their versions in byte-wise
    /// key order, starting strictly after `after_key`, optionally
    /// restricted to `prefix`, at most `limit` entries.
    ///
    /// Each call is a single point-in-time read; successive calls may
    /// observe different states.
    async fn list_keys(
        &self,
        partition: &Partition,
        prefix: Option<&str>,
        after_key: Option<&str>,
        limit: u32,
    ) -> Result<Vec<KeyVersion>>;

    /// Open a transaction scope.
    ///
    /// The returned transaction rolls back if dropped without an explicit
    /// [`BackendTransaction::commit`], so no exit path can leak a held lock.
    async fn begin(&self) -> Result<Box<dyn BackendTransaction>>;

    /// Lightweight round-trip confirming the backend is reachable.
    async fn health_check(&self) -> Result<()>;
}

/// An open transaction against a [`StorageBackend`].
#[async_trait]
pub trait BackendTransaction: Send {
    /// Read the current version of a key under an exclusive row lock.
    ///
    /// Blocks concurrent writers to the same row until this transaction
    /// ends; waits are bounded by the backend's configured lock timeout,
    /// after which [`Error::LockTimeout`] is returned. Tombstoned rows
    /// report their version like any other row.
    ///
    /// [`Error::LockTimeout`]: tessera_core::Error::LockTimeout
    async fn get_for_update(&mut self, partition: &Partition, key: &str)
        -> Result<Option<Version>>;

    /// Write a value (`Some`) or tombstone (`None`) at `new_version`,
    /// refreshing `last_updated_at` (and setting `created_at` on first
    /// write). `expected` is the version the coordinator observed via
    /// [`get_for_update`]; backends may re-check it to defend against
    /// writes racing a creation that no row lock could cover.
    ///
    /// [`get_for_update`]: BackendTransaction::get_for_update
    async fn upsert(
        &mut self,
        partition: &Partition,
        key: &str,
        value: Option<&[u8]>,
        expected: Version,
        new_version: Version,
    ) -> Result<()>;

    /// Commit. A backend-detected serialization failure surfaces as a
    /// retryable error, never as a version conflict.
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Abort, releasing all locks with no effect applied.
    async fn rollback(self: Box<Self>) -> Result<()>;
}

impl std::fmt::Debug for dyn BackendTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BackendTransaction")
    }
}
