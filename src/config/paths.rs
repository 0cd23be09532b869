//! Path management for SeedVault
//!
//! ## Path Resolution Order
//!
//! 1. `SEEDVAULT_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory joined with `seedvault`
//!    (`~/.config/seedvault` on Linux, `%APPDATA%\seedvault` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::SeedVaultError;
use crate::storage::SECRETS_FILE;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SEEDVAULT_DATA_DIR";

/// Environment variable pointing at the removable media mount point
pub const MEDIA_DIR_ENV: &str = "SEEDVAULT_MEDIA_DIR";

/// Manages all paths used by SeedVault
#[derive(Debug, Clone)]
pub struct SeedVaultPaths {
    /// Base directory for all SeedVault data
    base_dir: PathBuf,
}

impl SeedVaultPaths {
    /// Create a new SeedVaultPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, SeedVaultError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SeedVaultPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory backing the internal store
    pub fn internal_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the internal secrets document
    pub fn secrets_file(&self) -> PathBuf {
        self.base_dir.join(SECRETS_FILE)
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SeedVaultError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SeedVaultError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if SeedVault has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
fn resolve_default_path() -> Result<PathBuf, SeedVaultError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| SeedVaultError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("seedvault"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeedVaultPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.internal_dir(), temp_dir.path());
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);

        let paths = SeedVaultPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeedVaultPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SeedVaultPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.secrets_file(), temp_dir.path().join("seeds.json"));
        assert!(!paths.is_initialized());
    }
}
