//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives a 256-bit cipher key from a user passphrase. The entry identifier
//! is used as the salt, so the same passphrase yields a different key for
//! every stored secret.

use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{SeedVaultError, SeedVaultResult};

/// Iteration count written for newly stored entries
pub const DEFAULT_KEY_ITERATIONS: u32 = 100_000;

/// Length of the derived key in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Parameters for key derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDerivationParams {
    /// Salt for key derivation (the entry identifier)
    pub salt: String,
    /// PBKDF2 work factor
    pub iterations: u32,
}

impl KeyDerivationParams {
    /// Create params with the default iteration count
    pub fn new(salt: impl Into<String>) -> Self {
        Self::with_iterations(salt, DEFAULT_KEY_ITERATIONS)
    }

    /// Create params with a specific iteration count
    pub fn with_iterations(salt: impl Into<String>, iterations: u32) -> Self {
        Self {
            salt: salt.into(),
            iterations,
        }
    }
}

/// A derived encryption key
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The 32-byte key for AES-256
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive an encryption key from a passphrase
pub fn derive_key(passphrase: &str, params: &KeyDerivationParams) -> SeedVaultResult<DerivedKey> {
    if params.iterations == 0 {
        return Err(SeedVaultError::Validation(
            "Key iterations must be at least 1".to_string(),
        ));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(
        passphrase.as_bytes(),
        params.salt.as_bytes(),
        params.iterations,
        &mut key,
    );

    Ok(DerivedKey { key })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn test_known_answer_single_iteration() {
        let params = KeyDerivationParams::with_iterations("salt", 1);
        let key = derive_key("password", &params).unwrap();
        assert_eq!(
            key.as_bytes().to_vec(),
            hex("120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b")
        );
    }

    #[test]
    fn test_known_answer_4096_iterations() {
        let params = KeyDerivationParams::with_iterations("salt", 4096);
        let key = derive_key("password", &params).unwrap();
        assert_eq!(
            key.as_bytes().to_vec(),
            hex("c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a")
        );
    }

    #[test]
    fn test_same_inputs_same_key() {
        let params = KeyDerivationParams::with_iterations("wallet-a", 10);
        let key1 = derive_key("test_passphrase", &params).unwrap();
        let key2 = derive_key("test_passphrase", &params).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("same", &KeyDerivationParams::with_iterations("id1", 10)).unwrap();
        let key2 = derive_key("same", &KeyDerivationParams::with_iterations("id2", 10)).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_iterations_different_key() {
        let key1 = derive_key("same", &KeyDerivationParams::with_iterations("id", 10)).unwrap();
        let key2 = derive_key("same", &KeyDerivationParams::with_iterations("id", 11)).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let params = KeyDerivationParams::with_iterations("id", 0);
        let err = derive_key("pw", &params).unwrap_err();
        assert!(matches!(err, SeedVaultError::Validation(_)));
    }

    #[test]
    fn test_default_iterations() {
        let params = KeyDerivationParams::new("id");
        assert_eq!(params.iterations, DEFAULT_KEY_ITERATIONS);
        assert_eq!(params.salt, "id");
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = derive_key("pw", &KeyDerivationParams::with_iterations("id", 1)).unwrap();
        assert_eq!(format!("{:?}", key), "DerivedKey([REDACTED])");
    }
}
