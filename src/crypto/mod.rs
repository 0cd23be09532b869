//! Cryptographic functions for SeedVault
//!
//! Provides PBKDF2-HMAC-SHA256 key derivation and AES-256 block encryption
//! of stored mnemonics.

pub mod cipher;
pub mod key_derivation;
pub mod secure_memory;

pub use cipher::{CipherMode, SeedCipher, BLOCK_SIZE};
pub use key_derivation::{derive_key, DerivedKey, KeyDerivationParams, DEFAULT_KEY_ITERATIONS};
pub use secure_memory::SecureString;
