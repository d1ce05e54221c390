//! Per-key version counter
//!
//! Every item carries a version that increases by exactly 1 on each
//! successful write. Version 0 is the "key does not exist" sentinel:
//! a caller proposing `Version::ABSENT` as the expected version asserts
//! the key has never been written.
//!
//! ## Invariants
//!
//! - Stored versions start at `Version::FIRST` (1) and are strictly
//!   increasing per `(tenant_id, store_id, key)`.
//! - `Version::ABSENT` (0) is never stored; it only appears as an
//!   expectation or in conflict reports for missing keys.

use serde::{Deserialize, Serialize};

/// Version of an item, used for optimistic concurrency control.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Sentinel meaning "key does not yet exist".
    pub const ABSENT: Version = Version(0);

    /// The version assigned to the first successful write of a key.
    pub const FIRST: Version = Version(1);

    /// Create a version from a raw counter value.
    pub const fn new(v: u64) -> Self {
        Version(v)
    }

    /// The raw counter value.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// The version a successful write against this version produces.
    #[inline]
    pub const fn next(&self) -> Self {
        Version(self.0 + 1)
    }

    /// Whether this is the "does not exist" sentinel.
    #[inline]
    pub const fn is_absent(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Version {
    fn from(v: u64) -> Self {
        Version(v)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert_eq!(Version::ABSENT.as_u64(), 0);
        assert_eq!(Version::FIRST.as_u64(), 1);
        assert!(Version::ABSENT.is_absent());
        assert!(!Version::FIRST.is_absent());
    }

    #[test]
    fn test_next_increments_by_one() {
        assert_eq!(Version::ABSENT.next(), Version::FIRST);
        assert_eq!(Version::new(41).next(), Version::new(42));
    }

    #[test]
    fn test_ordering() {
        assert!(Version::new(1) < Version::new(2));
        assert_eq!(Version::new(7), Version::new(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::new(42).to_string(), "42");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Version::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: Version = serde_json::from_str("5").unwrap();
        assert_eq!(back, Version::new(5));
    }
}
