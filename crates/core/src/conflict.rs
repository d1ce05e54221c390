//! Conflict resolution for optimistic-concurrency writes
//!
//! The single decision at the heart of the system: given the version the
//! backend currently stores for a key (or absence) and the version the
//! caller expected, may the write proceed, and at which new version?
//!
//! The function is pure and total so it can be tested exhaustively without
//! a backend. Deletes go through the same decision; they just write a
//! tombstone instead of a value.

use crate::version::Version;

/// Decision for a single proposed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The expectation matched; the write may be applied at `next`.
    Proceed {
        /// Version the write will be stored under (`expected + 1`).
        next: Version,
    },
    /// The expectation did not match the stored state.
    Conflict {
        /// The version actually stored; `Version::ABSENT` if the key
        /// does not exist.
        actual: Version,
    },
}

/// Decide whether a write with `expected` may proceed against a key whose
/// stored version is `stored` (`None` = key absent).
///
/// - absent key + expected `ABSENT` (0): proceed, new version 1
/// - stored version `v` + expected `v`: proceed, new version `v + 1`
/// - anything else: conflict, reporting the actual stored version
pub fn resolve(stored: Option<Version>, expected: Version) -> WriteOutcome {
    match stored {
        None if expected.is_absent() => WriteOutcome::Proceed {
            next: Version::FIRST,
        },
        None => WriteOutcome::Conflict {
            actual: Version::ABSENT,
        },
        Some(v) if v == expected => WriteOutcome::Proceed { next: v.next() },
        Some(v) => WriteOutcome::Conflict { actual: v },
    }
}
