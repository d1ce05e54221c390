//! Tessera engine: write coordination and key listing
//!
//! The engine owns the two orchestration paths over a storage backend:
//!
//! - the transactional write coordinator ([`StoreEngine::put_objects`],
//!   [`StoreEngine::delete_object`]): atomic multi-key writes with
//!   optimistic-concurrency checks, locks acquired in deterministic key
//!   order;
//! - the query/listing engine ([`StoreEngine::get_object`],
//!   [`StoreEngine::list_key_versions`]): reads and cursor-paginated
//!   key enumeration.
//!
//! The engine depends only on the backend traits; concurrency correctness
//! comes from backend transactions and row locks, not from in-process
//! exclusion. The backend handle is constructed at startup and passed in,
//! never reached through ambient state.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod coordinator;
mod listing;
mod plan;

pub use coordinator::StoreEngine;
