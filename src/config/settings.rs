//! User settings for SeedVault
//!
//! Manages the key derivation work factor for new entries and the location
//! of removable media.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::{SeedVaultPaths, MEDIA_DIR_ENV};
use crate::crypto::DEFAULT_KEY_ITERATIONS;
use crate::error::SeedVaultError;

/// User settings for SeedVault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// PBKDF2 iterations used for newly stored secrets
    #[serde(default = "default_key_iterations")]
    pub key_iterations: u32,

    /// Mount point of removable media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removable_mount: Option<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_key_iterations() -> u32 {
    DEFAULT_KEY_ITERATIONS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            key_iterations: default_key_iterations(),
            removable_mount: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SeedVaultPaths) -> Result<Self, SeedVaultError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SeedVaultError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| SeedVaultError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SeedVaultPaths) -> Result<(), SeedVaultError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SeedVaultError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SeedVaultError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check invariants of user-editable values
    pub fn validate(&self) -> Result<(), SeedVaultError> {
        if self.key_iterations == 0 {
            return Err(SeedVaultError::Config(
                "key_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the removable media mount point
    ///
    /// An explicit override wins, then `SEEDVAULT_MEDIA_DIR`, then the
    /// configured `removable_mount`.
    pub fn media_dir(&self, explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| std::env::var_os(MEDIA_DIR_ENV).map(PathBuf::from))
            .or_else(|| self.removable_mount.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.key_iterations, 100_000);
        assert_eq!(settings.schema_version, 1);
        assert!(settings.removable_mount.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeedVaultPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            key_iterations: 2048,
            removable_mount: Some(PathBuf::from("/media/sd")),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.key_iterations, 2048);
        assert_eq!(loaded.removable_mount, Some(PathBuf::from("/media/sd")));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.key_iterations, DEFAULT_KEY_ITERATIONS);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeedVaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"key_iterations": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, SeedVaultError::Config(_)));
    }

    #[test]
    fn test_explicit_media_dir_wins() {
        let settings = Settings {
            removable_mount: Some(PathBuf::from("/media/configured")),
            ..Settings::default()
        };
        assert_eq!(
            settings.media_dir(Some(PathBuf::from("/media/flag"))),
            Some(PathBuf::from("/media/flag"))
        );
    }
}
