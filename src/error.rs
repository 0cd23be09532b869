//! Custom error types for SeedVault
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for SeedVault operations
#[derive(Error, Debug)]
pub enum SeedVaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for inputs and settings
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Stored ciphertext or text encoding is malformed
    #[error("Format error: {0}")]
    Format(String),

    /// Key derivation or cipher errors
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Entry was written with a cipher mode this build cannot process
    #[error("Unsupported cipher mode: {0}")]
    UnsupportedMode(i64),

    /// Removable media was requested but none is mounted
    #[error("Removable media not available")]
    MediaUnavailable,

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SeedVaultError {
    /// Create a "not found" error for stored secrets
    pub fn secret_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Secret",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error means removable media is missing
    pub fn is_media_unavailable(&self) -> bool {
        matches!(self, Self::MediaUnavailable)
    }
}

impl From<std::io::Error> for SeedVaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SeedVaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for SeedVault operations
pub type SeedVaultResult<T> = Result<T, SeedVaultError>;
