//! In-memory backends
//!
//! Used by unit tests and by embedders that manage persistence themselves.
//! Both backends can be told to fail, so error paths are easy to exercise.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{SeedVaultError, SeedVaultResult};

use super::backend::Backend;
use super::media::{MediaHandle, RemovableMedia};

#[derive(Debug, Default)]
struct Documents {
    files: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl Documents {
    fn read(&self, name: &str) -> SeedVaultResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SeedVaultError::Io("simulated read failure".to_string()));
        }
        let files = self
            .files
            .lock()
            .map_err(|e| SeedVaultError::Storage(format!("Failed to acquire lock: {}", e)))?;
        Ok(files.get(name).cloned())
    }

    fn write(&self, name: &str, contents: &str) -> SeedVaultResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SeedVaultError::Io("simulated write failure".to_string()));
        }
        let mut files = self
            .files
            .lock()
            .map_err(|e| SeedVaultError::Storage(format!("Failed to acquire lock: {}", e)))?;
        files.insert(name.to_string(), contents.to_string());
        Ok(())
    }

    fn get(&self, name: &str) -> Option<String> {
        self.files.lock().ok().and_then(|files| files.get(name).cloned())
    }

    fn put(&self, name: &str, contents: &str) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(name.to_string(), contents.to_string());
        }
    }
}

/// Internal storage kept in memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    docs: Documents,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document without going through `Backend::write`
    pub fn with_document(self, name: &str, contents: &str) -> Self {
        self.docs.put(name, contents);
        self
    }

    /// Current contents of a document
    pub fn document(&self, name: &str) -> Option<String> {
        self.docs.get(name)
    }

    /// Replace a document behind the store's back
    pub fn set_document(&self, name: &str, contents: &str) {
        self.docs.put(name, contents);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.docs.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.docs.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Backend for MemoryStorage {
    fn read(&self, name: &str) -> SeedVaultResult<Option<String>> {
        self.docs.read(name)
    }

    fn write(&self, name: &str, contents: &str) -> SeedVaultResult<()> {
        self.docs.write(name, contents)
    }
}

/// Removable medium kept in memory
///
/// Tracks how many handles are open so tests can check that every
/// operation released the medium.
#[derive(Debug, Default)]
pub struct MemoryMedia {
    docs: Documents,
    mounted: AtomicBool,
    open_handles: AtomicUsize,
    opens: AtomicUsize,
}

impl MemoryMedia {
    /// A mounted, empty medium
    pub fn mounted() -> Self {
        let media = Self::default();
        media.set_mounted(true);
        media
    }

    /// No medium inserted
    pub fn unmounted() -> Self {
        Self::default()
    }

    /// Seed a document without opening the medium
    pub fn with_document(self, name: &str, contents: &str) -> Self {
        self.docs.put(name, contents);
        self
    }

    pub fn set_mounted(&self, mounted: bool) {
        self.mounted.store(mounted, Ordering::SeqCst);
    }

    /// Current contents of a document
    pub fn document(&self, name: &str) -> Option<String> {
        self.docs.get(name)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.docs.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Handles currently open
    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    /// Total number of successful opens
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl RemovableMedia for MemoryMedia {
    fn open(&self) -> SeedVaultResult<Box<dyn MediaHandle + '_>> {
        if !self.is_present() {
            return Err(SeedVaultError::MediaUnavailable);
        }
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryMediaHandle { media: self }))
    }

    fn is_present(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }
}

struct MemoryMediaHandle<'a> {
    media: &'a MemoryMedia,
}

impl MediaHandle for MemoryMediaHandle<'_> {
    fn read(&mut self, name: &str) -> SeedVaultResult<Option<String>> {
        self.media.docs.read(name)
    }

    fn write(&mut self, name: &str, contents: &str) -> SeedVaultResult<()> {
        self.media.docs.write(name, contents)
    }
}

impl Drop for MemoryMediaHandle<'_> {
    fn drop(&mut self) {
        self.media.open_handles.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::media::ScopedMedia;

    #[test]
    fn test_memory_storage_failures() {
        let storage = MemoryStorage::new().with_document("seeds.json", "{}");
        assert_eq!(storage.read("seeds.json").unwrap().as_deref(), Some("{}"));

        storage.fail_reads(true);
        assert!(storage.read("seeds.json").is_err());

        storage.fail_writes(true);
        assert!(storage.write("seeds.json", "[]").is_err());
        assert_eq!(storage.document("seeds.json").as_deref(), Some("{}"));
    }

    #[test]
    fn test_handles_released_on_success_and_failure() {
        let backend = ScopedMedia::new(MemoryMedia::mounted());

        backend.write("seeds.json", "{}").unwrap();
        backend.media().fail_writes(true);
        assert!(backend.write("seeds.json", "{}").is_err());
        assert!(backend.read("seeds.json").is_ok());

        assert_eq!(backend.media().opens(), 3);
        assert_eq!(backend.media().open_handles(), 0);
    }

    #[test]
    fn test_unmounted_media_never_opens() {
        let backend = ScopedMedia::new(MemoryMedia::unmounted());
        assert!(backend.read("seeds.json").unwrap_err().is_media_unavailable());
        assert_eq!(backend.media().opens(), 0);
    }
}
