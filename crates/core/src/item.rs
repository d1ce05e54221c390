//! The versioned record abstraction
//!
//! An [`Item`] is the atomic unit of storage: a key, an optional value
//! (absent = tombstone), a version, and backend-assigned timestamps.
//! Identity is `(tenant_id, store_id, key)`; the partition half of the
//! identity travels separately as [`Partition`](crate::Partition).
//!
//! This module also defines the deterministic key ordering used by the
//! write coordinator for lock acquisition, and the reserved store
//! sequence key.

use crate::version::Version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Reserved key conventionally holding a store-wide revision counter.
///
/// A write request may carry a `sequence` constraint; the coordinator
/// injects this key as one more member of the write set, so bumping it is
/// locked and conflict-checked like any other key. Listings never return
/// it, and reading it while absent yields a synthetic version-0 item.
pub const STORE_SEQUENCE_KEY: &str = "__store_sequence";

/// A versioned key/value record.
///
/// `value` is `None` for a tombstone: the key was deleted but its row is
/// retained so recreation still requires the tombstone's version. A present
/// zero-length value is distinct from a tombstone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Key, unique within its partition.
    pub key: String,
    /// Stored bytes; `None` marks a tombstone.
    pub value: Option<Vec<u8>>,
    /// Current version of the key.
    pub version: Version,
    /// Set by the backend when the key was first written.
    pub created_at: DateTime<Utc>,
    /// Refreshed by the backend on every successful write.
    pub last_updated_at: DateTime<Utc>,
}

impl Item {
    /// Whether this record is a tombstoned (deleted) key.
    #[inline]
    pub fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }
}

/// A key together with its current version, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyVersion {
    /// The key.
    pub key: String,
    /// Its current version.
    pub version: Version,
}

/// Deterministic key ordering for lock acquisition and listings.
///
/// Plain byte-wise comparison. Concurrent write requests with overlapping
/// key sets must acquire row locks in this order, otherwise two requests
/// can deadlock by locking the overlap in opposite orders.
#[inline]
pub fn key_order(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(value: Option<Vec<u8>>) -> Item {
        let now = Utc::now();
        Item {
            key: "k".to_string(),
            value,
            version: Version::FIRST,
            created_at: now,
            last_updated_at: now,
        }
    }

    #[test]
    fn test_tombstone_detection() {
        assert!(item(None).is_tombstone());
        assert!(!item(Some(vec![1, 2, 3])).is_tombstone());
    }

    #[test]
    fn test_empty_value_is_not_a_tombstone() {
        assert!(!item(Some(Vec::new())).is_tombstone());
    }

    #[test]
    fn test_key_order_is_bytewise() {
        assert_eq!(key_order("a", "b"), Ordering::Less);
        assert_eq!(key_order("a", "a"), Ordering::Equal);
        assert_eq!(key_order("b", "a"), Ordering::Greater);
        // Shorter key sorts before its extensions.
        assert_eq!(key_order("ab", "abc"), Ordering::Less);
        // Byte-wise, not locale-aware: uppercase before lowercase.
        assert_eq!(key_order("Z", "a"), Ordering::Less);
    }

    #[test]
    fn test_key_order_sorts_deterministically() {
        let mut keys = vec!["kv2", "kv10", "KV1", "kv1"];
        keys.sort_by(|a, b| key_order(a, b));
        assert_eq!(keys, vec!["KV1", "kv1", "kv10", "kv2"]);
    }
}
