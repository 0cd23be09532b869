//! Identifier-keyed collection of entries
//!
//! A collection is the whole persisted document for one backend. Lookup is
//! by identifier and listing follows document order. A record that does not
//! parse as an entry is kept verbatim, so one bad record neither hides its
//! siblings nor gets lost when the document is rewritten.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SeedVaultError, SeedVaultResult};

use super::entry::Entry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum Record {
    Entry(Entry),
    Unreadable(Value),
}

impl Record {
    fn into_entry(self) -> Option<Entry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Unreadable(_) => None,
        }
    }
}

/// All entries stored on one backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    entries: IndexMap<String, Record>,
}

impl Collection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document
    ///
    /// Surrounding whitespace is ignored, so documents padded by in-place
    /// rewrites still parse.
    pub fn from_json(text: &str) -> SeedVaultResult<Self> {
        serde_json::from_str(text.trim())
            .map_err(|e| SeedVaultError::Json(format!("Failed to parse secrets document: {}", e)))
    }

    /// Serialize to a JSON document
    pub fn to_json(&self) -> SeedVaultResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SeedVaultError::Json(format!("Failed to serialize secrets document: {}", e)))
    }

    /// Identifiers in document order
    pub fn identifiers(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Get an entry by identifier
    ///
    /// `None` for a record that is present but unreadable.
    pub fn get(&self, identifier: &str) -> Option<&Entry> {
        match self.entries.get(identifier)? {
            Record::Entry(entry) => Some(entry),
            Record::Unreadable(_) => None,
        }
    }

    /// Check whether an identifier is present, readable or not
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Insert or overwrite an entry, returning the previous one
    ///
    /// An overwritten entry keeps its position.
    pub fn insert(&mut self, identifier: impl Into<String>, entry: Entry) -> Option<Entry> {
        self.entries
            .insert(identifier.into(), Record::Entry(entry))
            .and_then(Record::into_entry)
    }

    /// Remove a record, preserving the order of the rest
    ///
    /// Returns whether the identifier was present.
    pub fn remove(&mut self, identifier: &str) -> bool {
        self.entries.shift_remove(identifier).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::CipherMode;

    const TWO_ENTRIES: &str = r#"{
        "ecbID": {"version": 0, "key_iterations": 100000, "data": "AAAA"},
        "cbcID": {"version": 1, "key_iterations": 100000, "data": "BBBB"}
    }"#;

    #[test]
    fn test_parse_preserves_document_order() {
        let collection = Collection::from_json(TWO_ENTRIES).unwrap();
        assert_eq!(collection.identifiers(), vec!["ecbID", "cbcID"]);
        assert_eq!(
            collection.get("cbcID").unwrap().cipher_version,
            CipherMode::Cbc
        );
    }

    #[test]
    fn test_parse_tolerates_padding() {
        let padded = format!("{}{}", TWO_ENTRIES, " ".repeat(40));
        assert_eq!(Collection::from_json(&padded).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Collection::from_json("not json").is_err());
        assert!(Collection::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut collection = Collection::from_json(TWO_ENTRIES).unwrap();
        let previous = collection.insert("ecbID", Entry::ecb("CCCC", 10));
        assert_eq!(previous.unwrap().data, "AAAA");
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.identifiers(), vec!["ecbID", "cbcID"]);
        assert_eq!(collection.get("ecbID").unwrap().data, "CCCC");
    }

    #[test]
    fn test_remove_keeps_other_entries_unchanged() {
        let mut collection = Collection::from_json(TWO_ENTRIES).unwrap();
        let original = collection.get("cbcID").cloned().unwrap();

        assert!(collection.remove("ecbID"));
        assert!(!collection.remove("ecbID"));

        let reparsed = Collection::from_json(&collection.to_json().unwrap()).unwrap();
        assert_eq!(reparsed.identifiers(), vec!["cbcID"]);
        assert_eq!(reparsed.get("cbcID"), Some(&original));
    }

    #[test]
    fn test_unreadable_record_does_not_hide_siblings() {
        let text = r#"{
            "keep": {"version": 0, "key_iterations": 100000, "data": "AAAA"},
            "odd": {"version": "zero", "data": 7},
            "huge": {"version": 0, "key_iterations": -5, "data": "BBBB"}
        }"#;
        let mut collection = Collection::from_json(text).unwrap();

        assert_eq!(collection.identifiers(), vec!["keep", "odd", "huge"]);
        assert!(collection.get("keep").is_some());
        assert!(collection.get("odd").is_none());
        assert!(collection.contains("odd"));

        collection.insert("new", Entry::ecb("CCCC", 2));
        let rewritten: Value = serde_json::from_str(&collection.to_json().unwrap()).unwrap();
        assert_eq!(rewritten["odd"], serde_json::json!({"version": "zero", "data": 7}));
        assert_eq!(rewritten["huge"]["key_iterations"], -5);
        assert_eq!(rewritten["keep"]["data"], "AAAA");
    }

    #[test]
    fn test_unreadable_record_can_be_removed() {
        let mut collection = Collection::from_json(r#"{"odd": [1, 2]}"#).unwrap();
        assert!(collection.remove("odd"));
        assert!(collection.is_empty());
    }
}
