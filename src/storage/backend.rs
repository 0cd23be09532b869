//! Storage backend abstraction
//!
//! A backend reads and writes whole named documents. The secret store holds
//! one backend per location and never touches files directly.

use crate::error::SeedVaultResult;

/// Fixed logical filename of the secrets document
pub const SECRETS_FILE: &str = "seeds.json";

/// Whole-document storage collaborator
pub trait Backend: Send + Sync {
    /// Read a named document, `None` if it doesn't exist
    fn read(&self, name: &str) -> SeedVaultResult<Option<String>>;

    /// Replace a named document
    fn write(&self, name: &str, contents: &str) -> SeedVaultResult<()>;

    /// Whether the backend can currently be reached
    fn is_available(&self) -> bool {
        true
    }
}
