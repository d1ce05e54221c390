//! Request validation bounds
//!
//! Limits are enforced at the engine boundary before any backend call.
//! Violations are [`Error::InvalidInput`] and never reach the backend.
//!
//! Defaults mirror the reference deployment: keys up to 600 bytes, at most
//! 1000 write items per request, listing pages capped at 100 entries.

use crate::error::{Error, Result};
use crate::types::Partition;

/// Validation bounds for inbound requests.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum key length in bytes (default: 600).
    pub max_key_bytes: usize,
    /// Maximum value size in bytes (default: 16MB).
    pub max_value_bytes: usize,
    /// Maximum number of put + delete items in one write request
    /// (default: 1000).
    pub max_items_per_request: usize,
    /// Maximum (and default) listing page size (default: 100).
    pub max_page_size: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_key_bytes: 600,
            max_value_bytes: 16 * 1024 * 1024,
            max_items_per_request: 1000,
            max_page_size: 100,
        }
    }
}

impl Limits {
    /// Small bounds for exercising limit enforcement in tests.
    pub fn with_small_limits() -> Self {
        Limits {
            max_key_bytes: 16,
            max_value_bytes: 64,
            max_items_per_request: 4,
            max_page_size: 3,
        }
    }

    /// Reject empty tenant or store identifiers.
    pub fn validate_partition(&self, partition: &Partition) -> Result<()> {
        if partition.tenant_id.is_empty() {
            return Err(Error::InvalidInput("tenant_id must not be empty".into()));
        }
        if partition.store_id.is_empty() {
            return Err(Error::InvalidInput("store_id must not be empty".into()));
        }
        Ok(())
    }

    /// Reject empty or oversized keys.
    pub fn validate_key(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::InvalidInput("key must not be empty".into()));
        }
        if key.len() > self.max_key_bytes {
            return Err(Error::InvalidInput(format!(
                "key length {} exceeds maximum of {} bytes",
                key.len(),
                self.max_key_bytes
            )));
        }
        Ok(())
    }

    /// Reject oversized values.
    pub fn validate_value(&self, value: &[u8]) -> Result<()> {
        if value.len() > self.max_value_bytes {
            return Err(Error::InvalidInput(format!(
                "value size {} exceeds maximum of {} bytes",
                value.len(),
                self.max_value_bytes
            )));
        }
        Ok(())
    }

    /// Reject write requests with too many items.
    pub fn validate_item_count(&self, count: usize) -> Result<()> {
        if count > self.max_items_per_request {
            return Err(Error::InvalidInput(format!(
                "{} write items exceed maximum of {} per request",
                count, self.max_items_per_request
            )));
        }
        Ok(())
    }

    /// Clamp a requested page size into `1..=max_page_size`.
    ///
    /// `None` means "as many as allowed".
    pub fn clamp_page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.max_page_size)
            .clamp(1, self.max_page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = Limits::default();
        assert_eq!(limits.max_key_bytes, 600);
        assert_eq!(limits.max_items_per_request, 1000);
        assert_eq!(limits.max_page_size, 100);
    }

    #[test]
    fn test_empty_partition_rejected() {
        let limits = Limits::default();
        assert!(limits
            .validate_partition(&Partition::new("", "store"))
            .is_err());
        assert!(limits
            .validate_partition(&Partition::new("tenant", ""))
            .is_err());
        assert!(limits
            .validate_partition(&Partition::new("tenant", "store"))
            .is_ok());
    }

    #[test]
    fn test_key_bounds() {
        let limits = Limits::default();
        assert!(limits.validate_key("").is_err());
        assert!(limits.validate_key(&"k".repeat(600)).is_ok());
        let err = limits.validate_key(&"k".repeat(601)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_value_bounds() {
        let limits = Limits::with_small_limits();
        assert!(limits.validate_value(&[0u8; 64]).is_ok());
        assert!(limits.validate_value(&[0u8; 65]).is_err());
    }

    #[test]
    fn test_item_count_bounds() {
        let limits = Limits::with_small_limits();
        assert!(limits.validate_item_count(4).is_ok());
        assert!(limits.validate_item_count(5).is_err());
    }

    #[test]
    fn test_page_size_clamping() {
        let limits = Limits::default();
        assert_eq!(limits.clamp_page_size(None), 100);
        assert_eq!(limits.clamp_page_size(Some(0)), 1);
        assert_eq!(limits.clamp_page_size(Some(40)), 40);
        assert_eq!(limits.clamp_page_size(Some(10_000)), 100);
    }
}
