//! Entry display formatting
//!
//! Formats stored secrets for terminal output. Only metadata is shown;
//! ciphertext and plaintext never appear in listings.

use crate::models::{Entry, Location};

/// Format a plain list of identifiers
pub fn format_identifier_list(location: Location, identifiers: &[String]) -> String {
    if identifiers.is_empty() {
        return format!("No secrets stored on {} storage.\n", location);
    }

    let mut output = String::new();
    for identifier in identifiers {
        output.push_str(identifier);
        output.push('\n');
    }
    output
}

/// Format entries with their cipher metadata as a table
pub fn format_entry_table(location: Location, entries: &[(String, Entry)]) -> String {
    if entries.is_empty() {
        return format!("No secrets stored on {} storage.\n", location);
    }

    let id_width = entries
        .iter()
        .map(|(id, _)| id.len())
        .max()
        .unwrap_or(10)
        .max(10);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<12}  {:>10}\n",
        "Identifier",
        "Mode",
        "Iterations",
        id_width = id_width,
    ));

    output.push_str(&format!(
        "{:-<id_width$}  {:-<12}  {:->10}\n",
        "",
        "",
        "",
        id_width = id_width,
    ));

    for (identifier, entry) in entries {
        output.push_str(&format!(
            "{:<id_width$}  {:<12}  {:>10}\n",
            identifier,
            entry.cipher_version.to_string(),
            entry.key_iterations,
            id_width = id_width,
        ));
    }

    output.push_str(&format!("\n{} secret(s) on {} storage\n", entries.len(), location));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::CipherMode;

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_identifier_list(Location::Removable, &[]),
            "No secrets stored on removable storage.\n"
        );
        assert_eq!(
            format_entry_table(Location::Internal, &[]),
            "No secrets stored on internal storage.\n"
        );
    }

    #[test]
    fn test_identifier_list_keeps_order() {
        let ids = vec!["ecbID".to_string(), "cbcID".to_string()];
        assert_eq!(format_identifier_list(Location::Internal, &ids), "ecbID\ncbcID\n");
    }

    #[test]
    fn test_entry_table() {
        let mut cbc = Entry::ecb("BBBB", 100_000);
        cbc.cipher_version = CipherMode::Cbc;
        let entries = vec![
            ("ecbID".to_string(), Entry::ecb("AAAA", 100_000)),
            ("cbcID".to_string(), cbc),
        ];

        let output = format_entry_table(Location::Internal, &entries);
        assert!(output.contains("Identifier"));
        assert!(output.contains("AES-ECB"));
        assert!(output.contains("AES-CBC"));
        assert!(output.contains("100000"));
        assert!(output.contains("2 secret(s) on internal storage"));
        assert!(!output.contains("AAAA"));
    }
}
