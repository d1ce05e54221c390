//! Tenant and store partitioning
//!
//! Every operation is scoped by a [`Partition`]: the `(tenant_id, store_id)`
//! pair. The tenant id arrives from an external authorization collaborator
//! already verified; the core treats it as an opaque partition key and never
//! parses or validates its contents beyond non-emptiness.
//!
//! Cross-tenant access is structurally impossible: the partition is part of
//! every identity tuple and every backend query predicate.

use serde::{Deserialize, Serialize};

/// The `(tenant_id, store_id)` namespace a request operates in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    /// Opaque identifier of the owning principal, supplied pre-verified.
    pub tenant_id: String,
    /// Logical namespace within the tenant.
    pub store_id: String,
}

impl Partition {
    /// Create a partition.
    ///
    /// Emptiness is checked by [`Limits::validate_partition`] at the engine
    /// boundary, not here, so tests can construct arbitrary values.
    ///
    /// [`Limits::validate_partition`]: crate::Limits::validate_partition
    pub fn new(tenant_id: impl Into<String>, store_id: impl Into<String>) -> Self {
        Partition {
            tenant_id: tenant_id.into(),
            store_id: store_id.into(),
        }
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.tenant_id, self.store_id)
    }
}
