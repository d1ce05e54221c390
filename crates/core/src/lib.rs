//! Core types for Tessera
//!
//! This crate defines the foundational types used throughout the system:
//! - Partition: the `(tenant_id, store_id)` namespace boundary
//! - Item: a versioned key/value record (tombstones included)
//! - Version: monotonically increasing per-key version counter
//! - Conflict resolution: the pure proceed/conflict decision
//! - Error: the error taxonomy shared by engine and backends
//! - Limits: request validation bounds
//! - Request/response types and the opaque listing cursor
//!
//! Everything here is pure data and pure logic. Backend access lives in
//! `tessera-backend`, orchestration in `tessera-engine`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod conflict;
pub mod cursor;
pub mod error;
pub mod item;
pub mod limits;
pub mod request;
pub mod types;
pub mod version;

pub use conflict::{resolve, WriteOutcome};
pub use cursor::ListCursor;
pub use error::{Error, KeyConflict, Result};
pub use item::{key_order, Item, KeyVersion, STORE_SEQUENCE_KEY};
pub use limits::Limits;
pub use request::{DeleteItem, KeyVersionPage, ListRequest, WriteItem, WriteRequest};
pub use types::Partition;
pub use version::Version;
