//! Internal storage backed by a local directory

use std::path::PathBuf;

use tracing::debug;

use crate::error::SeedVaultResult;

use super::backend::Backend;
use super::file_io::{read_text, write_text_atomic};

/// Documents stored as files in the application data directory
#[derive(Debug, Clone)]
pub struct FlashStorage {
    root: PathBuf,
}

impl FlashStorage {
    /// Create a backend rooted at `root`
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl Backend for FlashStorage {
    fn read(&self, name: &str) -> SeedVaultResult<Option<String>> {
        read_text(self.root.join(name))
    }

    fn write(&self, name: &str, contents: &str) -> SeedVaultResult<()> {
        let path = self.root.join(name);
        debug!(path = %path.display(), "writing internal document");
        write_text_atomic(path, contents)
    }
}
