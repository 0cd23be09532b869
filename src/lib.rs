//! SeedVault - passphrase-encrypted mnemonic storage
//!
//! Stores recovery mnemonics encrypted under a key derived from a user
//! passphrase and the secret's identifier. Secrets live in a JSON document on
//! an internal store, or on removable media when it is mounted.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `crypto`: PBKDF2 key derivation and AES block encryption
//! - `models`: Entries, collections and the location selector
//! - `storage`: Internal and removable document backends
//! - `services`: The secret store
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use seedvault::config::{SeedVaultPaths, Settings};
//! use seedvault::models::Location;
//! use seedvault::services::SecretStore;
//!
//! let paths = SeedVaultPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = SecretStore::open(&paths, &settings, None);
//!
//! store.persist("passphrase", "wallet", "abandon ability able ...", Location::Internal);
//! let words = store.reveal("passphrase", "wallet", Location::Internal)?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SeedVaultError, SeedVaultResult};
