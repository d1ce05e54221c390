//! Tessera - multi-tenant versioned key-value storage core
//!
//! Clients store, fetch, and delete opaque byte values under string keys,
//! scoped by a `(tenant_id, store_id)` partition, with optimistic-
//! concurrency version tags preventing lost updates. Multi-key writes are
//! atomic: every key passes its version check or nothing is applied and
//! every failing key is reported.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tessera::{MemoryBackend, Partition, StoreEngine, Version, WriteRequest};
//!
//! let engine = StoreEngine::new(Arc::new(MemoryBackend::new()));
//! let partition = Partition::new("tenant-a", "store-1");
//!
//! // Create a key (expected version 0 = "does not exist yet").
//! engine
//!     .put_objects(&partition, WriteRequest::put("k", b"v".to_vec(), Version::ABSENT))
//!     .await?;
//!
//! let item = engine.get_object(&partition, "k").await?;
//! assert_eq!(item.version, Version::FIRST);
//! ```
//!
//! For durable storage, construct a [`PostgresBackend`] from a
//! [`PostgresConfig`] instead of the in-memory backend; the engine only
//! sees the [`StorageBackend`] contract.

pub use tessera_backend::{
    BackendTransaction, MemoryBackend, PostgresBackend, PostgresConfig, StorageBackend,
};
pub use tessera_core::{
    key_order, resolve, DeleteItem, Error, Item, KeyConflict, KeyVersion, KeyVersionPage, Limits,
    ListCursor, ListRequest, Partition, Result, Version, WriteItem, WriteOutcome, WriteRequest,
    STORE_SEQUENCE_KEY,
};
pub use tessera_engine::StoreEngine;
