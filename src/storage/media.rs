//! Removable media storage
//!
//! Media is acquired right before each read or write and released when the
//! handle drops, on every exit path. An unmounted medium is a normal state:
//! `open` reports `MediaUnavailable` and callers decide whether that is an
//! error.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{SeedVaultError, SeedVaultResult};

use super::backend::Backend;
use super::file_io::{read_text, write_text_atomic};

/// An open session on mounted media, released on drop
pub trait MediaHandle {
    /// Read a named document, `None` if it doesn't exist
    fn read(&mut self, name: &str) -> SeedVaultResult<Option<String>>;

    /// Replace a named document
    fn write(&mut self, name: &str, contents: &str) -> SeedVaultResult<()>;
}

/// Removable medium that can be opened for a single scoped operation
pub trait RemovableMedia: Send + Sync {
    /// Acquire the medium, failing with `MediaUnavailable` if none is mounted
    fn open(&self) -> SeedVaultResult<Box<dyn MediaHandle + '_>>;

    /// Whether a medium is currently mounted
    fn is_present(&self) -> bool;
}

impl<M: RemovableMedia + ?Sized> RemovableMedia for Arc<M> {
    fn open(&self) -> SeedVaultResult<Box<dyn MediaHandle + '_>> {
        (**self).open()
    }

    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

/// Adapts a `RemovableMedia` to the whole-document `Backend` contract
///
/// Each call opens the medium, performs one operation and drops the handle.
pub struct ScopedMedia<M> {
    media: M,
}

impl<M: RemovableMedia> ScopedMedia<M> {
    pub fn new(media: M) -> Self {
        Self { media }
    }

    /// Access the wrapped medium
    pub fn media(&self) -> &M {
        &self.media
    }
}

impl<M: RemovableMedia> Backend for ScopedMedia<M> {
    fn read(&self, name: &str) -> SeedVaultResult<Option<String>> {
        let mut handle = self.media.open()?;
        handle.read(name)
    }

    fn write(&self, name: &str, contents: &str) -> SeedVaultResult<()> {
        let mut handle = self.media.open()?;
        handle.write(name, contents)
    }

    fn is_available(&self) -> bool {
        self.media.is_present()
    }
}

/// Removable medium mounted at a directory
///
/// The medium counts as present while the mount point is an existing
/// directory.
#[derive(Debug, Clone, Default)]
pub struct MountedMedia {
    mount_point: Option<PathBuf>,
}

impl MountedMedia {
    /// Media expected at `mount_point`
    pub fn new(mount_point: PathBuf) -> Self {
        Self {
            mount_point: Some(mount_point),
        }
    }

    /// No mount point configured; never present
    pub fn unmounted() -> Self {
        Self { mount_point: None }
    }
}

impl RemovableMedia for MountedMedia {
    fn open(&self) -> SeedVaultResult<Box<dyn MediaHandle + '_>> {
        match self.mount_point.as_deref() {
            Some(root) if root.is_dir() => {
                trace!(mount = %root.display(), "media acquired");
                Ok(Box::new(MountedHandle { root }))
            }
            _ => Err(SeedVaultError::MediaUnavailable),
        }
    }

    fn is_present(&self) -> bool {
        self.mount_point.as_deref().is_some_and(Path::is_dir)
    }
}

struct MountedHandle<'a> {
    root: &'a Path,
}

impl MediaHandle for MountedHandle<'_> {
    fn read(&mut self, name: &str) -> SeedVaultResult<Option<String>> {
        read_text(self.root.join(name))
    }

    fn write(&mut self, name: &str, contents: &str) -> SeedVaultResult<()> {
        let path = self.root.join(name);
        debug!(path = %path.display(), "writing removable document");
        write_text_atomic(path, contents)
    }
}

impl Drop for MountedHandle<'_> {
    fn drop(&mut self) {
        trace!(mount = %self.root.display(), "media released");
    }
}
