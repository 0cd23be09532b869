//! Configuration module for SeedVault
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SeedVaultPaths;
pub use settings::Settings;
