//! Error taxonomy for Tessera
//!
//! One enum shared by the engine and every backend. We use `thiserror`
//! for `Display`/`Error` implementations.
//!
//! The taxonomy deliberately separates "your expectation was stale"
//! ([`Error::VersionConflict`]) from "nothing was wrong with your data,
//! try again" ([`Error::BackendUnavailable`], [`Error::LockTimeout`]).
//! Backends translate transient faults (pool exhaustion, serialization
//! failures, deadlock victims) into the latter two; they never surface
//! them as logical conflicts.

use crate::version::Version;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Tessera operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A key that failed its version check, with the version actually stored.
///
/// `actual` is `Version::ABSENT` when the key does not exist. Conflict
/// reports carry enough detail for a caller to reconcile and retry without
/// re-fetching every key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConflict {
    /// The offending key.
    pub key: String,
    /// The version currently stored for it.
    pub actual: Version,
}

/// Errors surfaced by the engine and backends.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// One or more keys in a write request failed their version check.
    /// No key in the request was mutated.
    #[error("version conflict on {} key(s)", conflicts.len())]
    VersionConflict {
        /// Every key that failed, with its actual stored version.
        conflicts: Vec<KeyConflict>,
    },

    /// Requested key (or store) has no live item.
    #[error("not found: {0}")]
    NotFound(String),

    /// Pool exhaustion, unreachable backend, or a backend-detected
    /// transient failure. Retryable with backoff.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A row lock could not be acquired within the configured bound.
    /// Retryable.
    #[error("lock timeout: {0}")]
    LockTimeout(String),

    /// Malformed request (empty tenant/store, oversized key, ...).
    /// Fails fast; never reaches the backend.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether the caller may retry the same request unchanged.
    ///
    /// `VersionConflict` is NOT retryable as-is: the caller must first
    /// re-read and correct its expected versions.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::BackendUnavailable(_) | Error::LockTimeout(_))
    }

    /// The conflicting keys, if this is a version conflict.
    pub fn conflicts(&self) -> Option<&[KeyConflict]> {
        match self {
            Error::VersionConflict { conflicts } => Some(conflicts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_display_counts_keys() {
        let err = Error::VersionConflict {
            conflicts: vec![
                KeyConflict {
                    key: "a".to_string(),
                    actual: Version::new(3),
                },
                KeyConflict {
                    key: "b".to_string(),
                    actual: Version::ABSENT,
                },
            ],
        };
        assert!(err.to_string().contains("2 key(s)"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(Error::BackendUnavailable("pool exhausted".into()).is_retryable());
        assert!(Error::LockTimeout("row lock".into()).is_retryable());
        assert!(!Error::VersionConflict { conflicts: vec![] }.is_retryable());
        assert!(!Error::NotFound("k".into()).is_retryable());
        assert!(!Error::InvalidInput("empty tenant".into()).is_retryable());
    }

    #[test]
    fn test_conflicts_accessor() {
        let err = Error::VersionConflict {
            conflicts: vec![KeyConflict {
                key: "k".to_string(),
                actual: Version::new(7),
            }],
        };
        let conflicts = err.conflicts().unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].actual, Version::new(7));
        assert!(Error::NotFound("k".into()).conflicts().is_none());
    }

    #[test]
    fn test_key_conflict_serializes() {
        let kc = KeyConflict {
            key: "k".to_string(),
            actual: Version::new(2),
        };
        let json = serde_json::to_string(&kc).unwrap();
        assert!(json.contains("\"actual\":2"));
    }
}
