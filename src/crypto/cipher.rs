//! AES-256 block encryption of stored secrets
//!
//! Plaintext is zero-padded to the 16-byte block size, encrypted block by
//! block and stored as standard base64. The format carries no IV and no
//! authentication tag. Trailing zero bytes are stripped on decrypt, so a
//! secret that itself ends in NUL bytes does not survive a round trip.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{SeedVaultError, SeedVaultResult};

use super::key_derivation::{derive_key, DerivedKey, KeyDerivationParams, KEY_LEN};

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Block-cipher mode tag stored in the `version` field of each entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum CipherMode {
    /// Independent per-block encryption, no IV (tag 0)
    Ecb,
    /// Chained blocks with IV (tag 1, reserved)
    Cbc,
    /// Counter mode with nonce (tag 2, reserved)
    Ctr,
    /// Any other tag, kept so it can be written back unchanged
    Other(i64),
}

impl CipherMode {
    /// Numeric tag of this mode
    pub fn tag(self) -> i64 {
        match self {
            Self::Ecb => 0,
            Self::Cbc => 1,
            Self::Ctr => 2,
            Self::Other(tag) => tag,
        }
    }

    /// Whether this build can encrypt and decrypt with the mode
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Ecb)
    }
}

impl From<i64> for CipherMode {
    fn from(tag: i64) -> Self {
        match tag {
            0 => Self::Ecb,
            1 => Self::Cbc,
            2 => Self::Ctr,
            other => Self::Other(other),
        }
    }
}

impl From<CipherMode> for i64 {
    fn from(mode: CipherMode) -> Self {
        mode.tag()
    }
}

impl std::fmt::Display for CipherMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ecb => write!(f, "AES-ECB"),
            Self::Cbc => write!(f, "AES-CBC"),
            Self::Ctr => write!(f, "AES-CTR"),
            Self::Other(tag) => write!(f, "unknown ({})", tag),
        }
    }
}

/// Cipher bound to a key derived from a passphrase and an entry identifier
#[derive(Debug)]
pub struct SeedCipher {
    key: DerivedKey,
}

impl SeedCipher {
    /// Derive a key and build a cipher for the given mode
    ///
    /// Fails with `UnsupportedMode` for any mode other than ECB, before the
    /// (expensive) key derivation runs.
    pub fn new(
        passphrase: &str,
        salt: &str,
        iterations: u32,
        mode: CipherMode,
    ) -> SeedVaultResult<Self> {
        if !mode.is_supported() {
            return Err(SeedVaultError::UnsupportedMode(mode.tag()));
        }

        let params = KeyDerivationParams::with_iterations(salt, iterations);
        let key = derive_key(passphrase, &params)?;
        Ok(Self { key })
    }

    /// Encrypt a string and return the base64 ciphertext
    ///
    /// Empty input still produces one full zero block.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let mut buf = zero_pad(plaintext.as_bytes());
        ecb_encrypt(self.key.as_bytes(), &mut buf);
        STANDARD.encode(&buf)
    }

    /// Decrypt base64 ciphertext back into a string
    pub fn decrypt(&self, ciphertext: &str) -> SeedVaultResult<String> {
        let mut buf = STANDARD
            .decode(ciphertext.trim())
            .map_err(|e| SeedVaultError::Format(format!("Invalid base64 ciphertext: {}", e)))?;

        if buf.len() % BLOCK_SIZE != 0 {
            return Err(SeedVaultError::Format(format!(
                "Ciphertext length {} is not a multiple of {}",
                buf.len(),
                BLOCK_SIZE
            )));
        }

        ecb_decrypt(self.key.as_bytes(), &mut buf);

        let text = String::from_utf8(buf)
            .map_err(|_| SeedVaultError::Format("Decrypted data is not valid UTF-8".to_string()))?;

        Ok(text.trim_end_matches('\0').to_string())
    }
}

/// Right-pad with zero bytes to the next block boundary
///
/// Already aligned input gets no padding, except empty input which becomes
/// a single zero block.
fn zero_pad(data: &[u8]) -> Vec<u8> {
    let padded_len = if data.is_empty() {
        BLOCK_SIZE
    } else {
        data.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE
    };
    let mut buf = Vec::with_capacity(padded_len);
    buf.extend_from_slice(data);
    buf.resize(padded_len, 0);
    buf
}

fn ecb_encrypt(key: &[u8; KEY_LEN], buf: &mut [u8]) {
    let cipher = Aes256::new(GenericArray::from_slice(key));
    for block in buf.chunks_exact_mut(BLOCK_SIZE) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
}

fn ecb_decrypt(key: &[u8; KEY_LEN], buf: &mut [u8]) {
    let cipher = Aes256::new(GenericArray::from_slice(key));
    for block in buf.chunks_exact_mut(BLOCK_SIZE) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }
}
