//! Service layer for SeedVault
//!
//! The service layer provides the secret CRUD operations on top of the
//! storage layer.

pub mod secret_store;

pub use secret_store::SecretStore;
