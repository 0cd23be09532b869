//! Stored secret entry
//!
//! One record of the persisted document: cipher mode tag, the iteration
//! count used when the entry was created, and the base64 ciphertext.
//! Fields this build does not know about (an IV for chained modes, say) are
//! carried along so rewriting the document never drops them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::crypto::CipherMode;

/// An encrypted secret as it appears on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Cipher mode used at encryption time
    #[serde(rename = "version")]
    pub cipher_version: CipherMode,

    /// PBKDF2 iteration count used to derive the key
    pub key_iterations: u64,

    /// Base64 ciphertext
    pub data: String,

    /// Any other fields of the record, written back as read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    /// Create an ECB entry from freshly encrypted data
    pub fn ecb(data: impl Into<String>, key_iterations: u32) -> Self {
        Self {
            cipher_version: CipherMode::Ecb,
            key_iterations: u64::from(key_iterations),
            data: data.into(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let entry = Entry::ecb("AAAA", 100_000);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"version": 0, "key_iterations": 100000, "data": "AAAA"})
        );
    }

    #[test]
    fn test_reserved_version_parses() {
        let entry: Entry =
            serde_json::from_str(r#"{"version": 1, "key_iterations": 5, "data": "x"}"#).unwrap();
        assert_eq!(entry.cipher_version, CipherMode::Cbc);
        assert_eq!(entry.key_iterations, 5);
        assert!(entry.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let raw = serde_json::json!({
            "version": 1,
            "key_iterations": 100000,
            "data": "AAAA",
            "iv": "MDEyMzQ1Njc4OWFiY2RlZg=="
        });
        let entry: Entry = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(entry.extra["iv"], "MDEyMzQ1Njc4OWFiY2RlZg==");
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }

    #[test]
    fn test_wide_values_parse() {
        let entry: Entry = serde_json::from_str(
            r#"{"version": 300, "key_iterations": 5000000000, "data": "x"}"#,
        )
        .unwrap();
        assert_eq!(entry.cipher_version, CipherMode::Other(300));
        assert_eq!(entry.key_iterations, 5_000_000_000);

        let entry: Entry =
            serde_json::from_str(r#"{"version": -1, "key_iterations": 1, "data": "x"}"#).unwrap();
        assert_eq!(entry.cipher_version, CipherMode::Other(-1));
    }
}
