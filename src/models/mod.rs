//! Core data models for SeedVault
//!
//! Entries, the per-backend collection they live in, and the selector used
//! to pick a backend.

pub mod collection;
pub mod entry;
pub mod location;

pub use collection::Collection;
pub use entry::Entry;
pub use location::Location;
