//! Opaque listing cursor
//!
//! A cursor encodes the last key returned by a prior listing call. The
//! caller holds it between calls; the server keeps no listing state. The
//! key is base64-encoded (URL-safe, no padding) so callers treat the token
//! as opaque rather than depending on key text.

use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Continuation token for paginated key listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListCursor(String);

impl ListCursor {
    /// Build the cursor that resumes enumeration after `key`.
    pub fn after_key(key: &str) -> Self {
        ListCursor(URL_SAFE_NO_PAD.encode(key.as_bytes()))
    }

    /// Wrap a token received from a caller. Not validated until decoded.
    pub fn from_token(token: impl Into<String>) -> Self {
        ListCursor(token.into())
    }

    /// Decode the key this cursor resumes after.
    pub fn last_key(&self) -> Result<String> {
        let bytes = URL_SAFE_NO_PAD
            .decode(self.0.as_bytes())
            .map_err(|_| Error::InvalidInput("malformed listing cursor".into()))?;
        String::from_utf8(bytes)
            .map_err(|_| Error::InvalidInput("malformed listing cursor".into()))
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let cursor = ListCursor::after_key("user:42/profile");
        assert_eq!(cursor.last_key().unwrap(), "user:42/profile");
    }

    #[test]
    fn test_token_is_opaque() {
        let cursor = ListCursor::after_key("plain-key");
        assert_ne!(cursor.as_str(), "plain-key");
    }

    #[test]
    fn test_malformed_token_is_invalid_input() {
        let cursor = ListCursor::from_token("!!not base64!!");
        assert!(matches!(
            cursor.last_key(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_utf8_payload_is_invalid_input() {
        let token = URL_SAFE_NO_PAD.encode([0xff, 0xfe]);
        let cursor = ListCursor::from_token(token);
        assert!(matches!(cursor.last_key(), Err(Error::InvalidInput(_))));
    }
}
