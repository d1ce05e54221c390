//! Write-set planning
//!
//! Turns a [`WriteRequest`] into the ordered write set the coordinator
//! executes: validated against limits, sequence constraint injected as a
//! regular member, duplicates rejected, sorted by the deterministic key
//! order so concurrent requests acquire row locks in the same order.
//!
//! Pure and synchronous; every rejection here is `InvalidInput` and
//! happens before any backend call.

use tessera_core::{key_order, Error, Limits, Result, Version, WriteRequest, STORE_SEQUENCE_KEY};

/// One entry of the ordered write set. `value: None` writes a tombstone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlannedWrite {
    pub key: String,
    pub expected: Version,
    pub value: Option<Vec<u8>>,
}

/// Validate and order a write request.
///
/// Returns an empty plan for an empty request (the coordinator treats
/// that as a no-op rather than opening a transaction).
pub(crate) fn plan_writes(limits: &Limits, request: WriteRequest) -> Result<Vec<PlannedWrite>> {
    limits.validate_item_count(request.item_count())?;

    let mut writes = Vec::with_capacity(request.item_count());
    for put in request.puts {
        limits.validate_key(&put.key)?;
        limits.validate_value(&put.value)?;
        writes.push(PlannedWrite {
            key: put.key,
            expected: put.expected_version,
            value: Some(put.value),
        });
    }
    for delete in request.deletes {
        limits.validate_key(&delete.key)?;
        writes.push(PlannedWrite {
            key: delete.key,
            expected: delete.expected_version,
            value: None,
        });
    }
    if let Some(expected) = request.sequence {
        writes.push(PlannedWrite {
            key: STORE_SEQUENCE_KEY.to_string(),
            expected,
            value: Some(Vec::new()),
        });
    }

    writes.sort_by(|a, b| key_order(&a.key, &b.key));
    for pair in writes.windows(2) {
        if pair[0].key == pair[1].key {
            return Err(Error::InvalidInput(format!(
                "duplicate key {:?} in write request",
                pair[0].key
            )));
        }
    }
    Ok(writes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{DeleteItem, WriteItem};

    fn limits() -> Limits {
        Limits::default()
    }

    #[test]
    fn test_plan_sorts_by_key_order() {
        let request = WriteRequest {
            puts: vec![
                WriteItem {
                    key: "b".into(),
                    value: vec![],
                    expected_version: Version::ABSENT,
                },
                WriteItem {
                    key: "a".into(),
                    value: vec![],
                    expected_version: Version::ABSENT,
                },
            ],
            deletes: vec![DeleteItem {
                key: "c".into(),
                expected_version: Version::FIRST,
            }],
            sequence: None,
        };
        let plan = plan_writes(&limits(), request).unwrap();
        let keys: Vec<_> = plan.iter().map(|w| w.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert!(plan[2].value.is_none());
    }

    #[test]
    fn test_plan_injects_sequence_as_regular_member() {
        let request = WriteRequest {
            puts: vec![WriteItem {
                key: "k".into(),
                value: b"v".to_vec(),
                expected_version: Version::new(3),
            }],
            deletes: vec![],
            sequence: Some(Version::new(12)),
        };
        let plan = plan_writes(&limits(), request).unwrap();
        assert_eq!(plan.len(), 2);
        let seq = plan.iter().find(|w| w.key == STORE_SEQUENCE_KEY).unwrap();
        assert_eq!(seq.expected, Version::new(12));
        assert_eq!(seq.value.as_deref(), Some(&[] as &[u8]));
    }

    #[test]
    fn test_plan_rejects_duplicate_keys() {
        let request = WriteRequest {
            puts: vec![WriteItem {
                key: "k".into(),
                value: vec![],
                expected_version: Version::ABSENT,
            }],
            deletes: vec![DeleteItem {
                key: "k".into(),
                expected_version: Version::FIRST,
            }],
            sequence: None,
        };
        let err = plan_writes(&limits(), request).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_plan_rejects_duplicate_sequence_key() {
        let request = WriteRequest {
            puts: vec![WriteItem {
                key: STORE_SEQUENCE_KEY.into(),
                value: vec![],
                expected_version: Version::ABSENT,
            }],
            deletes: vec![],
            sequence: Some(Version::ABSENT),
        };
        assert!(plan_writes(&limits(), request).is_err());
    }

    #[test]
    fn test_plan_enforces_limits() {
        let small = Limits::with_small_limits();

        let oversized_key = WriteRequest::put("k".repeat(17), vec![], Version::ABSENT);
        assert!(plan_writes(&small, oversized_key).is_err());

        let oversized_value = WriteRequest::put("k", vec![0u8; 65], Version::ABSENT);
        assert!(plan_writes(&small, oversized_value).is_err());

        let too_many = WriteRequest {
            puts: (0..5)
                .map(|i| WriteItem {
                    key: format!("k{}", i),
                    value: vec![],
                    expected_version: Version::ABSENT,
                })
                .collect(),
            deletes: vec![],
            sequence: None,
        };
        assert!(plan_writes(&small, too_many).is_err());
    }

    #[test]
    fn test_empty_request_plans_to_nothing() {
        let plan = plan_writes(&limits(), WriteRequest::default()).unwrap();
        assert!(plan.is_empty());
    }
}
