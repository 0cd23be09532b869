//! Storage layer for SeedVault
//!
//! Whole-document backends for the internal store and for removable media,
//! with atomic file writes and in-memory variants for tests.

pub mod backend;
pub mod file_io;
pub mod flash;
pub mod media;
pub mod memory;

pub use backend::{Backend, SECRETS_FILE};
pub use file_io::{read_text, write_text_atomic};
pub use flash::FlashStorage;
pub use media::{MediaHandle, MountedMedia, RemovableMedia, ScopedMedia};
pub use memory::{MemoryMedia, MemoryStorage};
