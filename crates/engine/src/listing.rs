//! Query/listing engine
//!
//! Paginated enumeration of a store's live keys and their versions, in
//! byte-wise key order. Each page is one point-in-time backend read;
//! pages are not mutually consistent under concurrent writes, which is a
//! deliberate scalability trade-off.
//!
//! The cursor encodes the last returned key; an exhausted enumeration
//! returns an empty page with no cursor. The first page also reports the
//! store sequence version, fetched before the page so every listed key
//! is at least as fresh as the reported sequence.

use tessera_backend::StorageBackend;
use tessera_core::{
    Error, KeyVersionPage, Limits, ListCursor, ListRequest, Partition, Result, Version,
    STORE_SEQUENCE_KEY,
};
use tracing::debug;

pub(crate) async fn list_key_versions(
    backend: &dyn StorageBackend,
    limits: &Limits,
    partition: &Partition,
    request: ListRequest,
) -> Result<KeyVersionPage> {
    limits.validate_partition(partition)?;
    if let Some(prefix) = request.prefix.as_deref() {
        if prefix.len() > limits.max_key_bytes {
            return Err(Error::InvalidInput(format!(
                "prefix length {} exceeds maximum key length of {} bytes",
                prefix.len(),
                limits.max_key_bytes
            )));
        }
    }
    let after_key = request.cursor.as_ref().map(ListCursor::last_key).transpose()?;
    let page_size = limits.clamp_page_size(request.page_size);

    let store_sequence = if request.cursor.is_none() {
        let version = match backend.get(partition, STORE_SEQUENCE_KEY).await? {
            Some(item) => item.version,
            None => Version::ABSENT,
        };
        Some(version)
    } else {
        None
    };

    // Fetch page_size + 2 rows: one look-ahead row decides whether a
    // further page exists, one more covers the sequence row (at most one
    // per store) filtered out below.
    let mut rows = backend
        .list_keys(
            partition,
            request.prefix.as_deref(),
            after_key.as_deref(),
            page_size + 2,
        )
        .await?;
    rows.retain(|kv| kv.key != STORE_SEQUENCE_KEY);

    let has_more = rows.len() > page_size as usize;
    rows.truncate(page_size as usize);
    let next_cursor = if has_more {
        rows.last().map(|kv| ListCursor::after_key(&kv.key))
    } else {
        None
    };

    debug!(
        %partition,
        returned = rows.len(),
        has_more,
        "listed key versions"
    );
    Ok(KeyVersionPage {
        key_versions: rows,
        next_cursor,
        store_sequence,
    })
}
