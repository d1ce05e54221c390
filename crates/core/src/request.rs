//! Request and response types for the inbound operations
//!
//! A [`WriteRequest`] bundles puts, deletes, and an optional store
//! sequence constraint into one atomic unit. It is constructed by the
//! caller and consumed exactly once by the write coordinator.

use crate::cursor::ListCursor;
use crate::item::KeyVersion;
use crate::version::Version;
use serde::{Deserialize, Serialize};

/// A single value write within a [`WriteRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteItem {
    /// Key to write.
    pub key: String,
    /// Bytes to store. May be empty; emptiness is not deletion.
    pub value: Vec<u8>,
    /// Version the caller believes is stored (`Version::ABSENT` to create).
    pub expected_version: Version,
}

/// A single tombstone write within a [`WriteRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItem {
    /// Key to delete.
    pub key: String,
    /// Version the caller believes is stored.
    pub expected_version: Version,
}

/// An atomic multi-key write: either every item passes its version check
/// and is applied, or nothing is and every failing key is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    /// Values to write.
    pub puts: Vec<WriteItem>,
    /// Keys to tombstone.
    pub deletes: Vec<DeleteItem>,
    /// Expected version of the store sequence key. When set, the
    /// coordinator injects [`STORE_SEQUENCE_KEY`] as one more member of
    /// the write set, giving the batch a store-wide total order.
    ///
    /// [`STORE_SEQUENCE_KEY`]: crate::STORE_SEQUENCE_KEY
    pub sequence: Option<Version>,
}

impl WriteRequest {
    /// A request writing a single value.
    pub fn put(key: impl Into<String>, value: Vec<u8>, expected_version: Version) -> Self {
        WriteRequest {
            puts: vec![WriteItem {
                key: key.into(),
                value,
                expected_version,
            }],
            ..Default::default()
        }
    }

    /// A request tombstoning a single key.
    pub fn delete(key: impl Into<String>, expected_version: Version) -> Self {
        WriteRequest {
            deletes: vec![DeleteItem {
                key: key.into(),
                expected_version,
            }],
            ..Default::default()
        }
    }

    /// Total number of items, including an injected sequence write.
    pub fn item_count(&self) -> usize {
        self.puts.len() + self.deletes.len() + usize::from(self.sequence.is_some())
    }
}

/// Parameters for `list_key_versions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    /// Only return keys with this prefix.
    pub prefix: Option<String>,
    /// Resume after the key a prior page ended at.
    pub cursor: Option<ListCursor>,
    /// Page size; clamped to the configured maximum.
    pub page_size: Option<u32>,
}

/// One page of a key listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyVersionPage {
    /// Keys and their current versions, in lexicographic key order.
    pub key_versions: Vec<KeyVersion>,
    /// Cursor for the next page; `None` when enumeration is complete.
    pub next_cursor: Option<ListCursor>,
    /// Version of the store sequence key, reported on the first page only
    /// and fetched before the page so every listed key is at least as
    /// fresh as it. `Version::ABSENT` if the store has no sequence key.
    pub store_sequence: Option<Version>,
}
