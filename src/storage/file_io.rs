//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::SeedVaultError;

/// Read a text file, returning `None` if it doesn't exist
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<Option<String>, SeedVaultError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| SeedVaultError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Write a text file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), SeedVaultError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SeedVaultError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let result = write_and_sync(&temp_path, contents).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| SeedVaultError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_and_sync(temp_path: &Path, contents: &str) -> Result<(), SeedVaultError> {
    let file = File::create(temp_path)
        .map_err(|e| SeedVaultError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .map_err(|e| SeedVaultError::Storage(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| SeedVaultError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SeedVaultError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        assert_eq!(read_text(&path).unwrap(), None);
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seeds.json");

        write_text_atomic(&path, r#"{"a": 1}"#).unwrap();
        assert_eq!(read_text(&path).unwrap().as_deref(), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seeds.json");
        let temp_path = temp_dir.path().join("seeds.json.tmp");

        write_text_atomic(&path, "{}").unwrap();

        assert!(path.exists());
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("seeds.json");

        write_text_atomic(&path, "{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_overwrite_replaces_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seeds.json");

        write_text_atomic(&path, "first, and longer").unwrap();
        write_text_atomic(&path, "second").unwrap();
        assert_eq!(read_text(&path).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        // A directory in the target's place makes the final rename fail
        let path = temp_dir.path().join("seeds.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "x").unwrap();

        assert!(write_text_atomic(&path, "{}").is_err());
        assert!(!temp_dir.path().join("seeds.json.tmp").exists());
    }
}
