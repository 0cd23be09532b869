//! Secret store service
//!
//! CRUD surface over the internal and removable collections. Both are loaded
//! when the store is built. Every mutation re-reads the target document,
//! applies one change and writes the whole document back while holding that
//! collection's lock, so each collection has a single writer at a time.
//!
//! Failures are reported coarsely on purpose: `reveal` yields `NotFound` for
//! a missing entry, a wrong passphrase and a corrupt entry alike, and
//! `persist` only says whether the write went through. `try_reveal` and
//! `try_persist` expose the underlying error.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::config::{SeedVaultPaths, Settings};
use crate::crypto::{CipherMode, SecureString, SeedCipher, DEFAULT_KEY_ITERATIONS};
use crate::error::{SeedVaultError, SeedVaultResult};
use crate::models::{Collection, Entry, Location};
use crate::storage::{Backend, FlashStorage, MountedMedia, ScopedMedia, SECRETS_FILE};

/// One backend and the collection most recently loaded from it
struct Slot {
    location: Location,
    backend: Arc<dyn Backend>,
    cache: Mutex<Collection>,
}

impl Slot {
    fn new(location: Location, backend: Arc<dyn Backend>) -> Self {
        let collection = read_collection(location, backend.as_ref()).unwrap_or_else(|err| {
            if !err.is_media_unavailable() {
                warn!(%location, error = %err, "could not load secrets, starting empty");
            }
            Collection::new()
        });

        Self {
            location,
            backend,
            cache: Mutex::new(collection),
        }
    }

    fn cache(&self) -> MutexGuard<'_, Collection> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> SeedVaultResult<Collection> {
        read_collection(self.location, self.backend.as_ref())
    }

    fn write(&self, collection: &Collection) -> SeedVaultResult<()> {
        let document = collection.to_json()?;
        self.backend.write(SECRETS_FILE, &document)
    }
}

fn read_collection(location: Location, backend: &dyn Backend) -> SeedVaultResult<Collection> {
    match backend.read(SECRETS_FILE)? {
        Some(text) => {
            let collection = Collection::from_json(&text)?;
            debug!(%location, entries = collection.len(), "loaded secrets");
            Ok(collection)
        }
        None => Ok(Collection::new()),
    }
}

/// Encrypted secret storage over internal and removable backends
pub struct SecretStore {
    internal: Slot,
    removable: Slot,
    key_iterations: u32,
}

impl SecretStore {
    /// Build a store and load both collections
    ///
    /// Unreadable or malformed documents load as empty collections.
    pub fn new(internal: Arc<dyn Backend>, removable: Arc<dyn Backend>) -> Self {
        Self {
            internal: Slot::new(Location::Internal, internal),
            removable: Slot::new(Location::Removable, removable),
            key_iterations: DEFAULT_KEY_ITERATIONS,
        }
    }

    /// Build a store over the configured directories
    ///
    /// `media_dir` overrides the removable mount point from the environment
    /// and settings.
    pub fn open(paths: &SeedVaultPaths, settings: &Settings, media_dir: Option<PathBuf>) -> Self {
        let media = match settings.media_dir(media_dir) {
            Some(dir) => MountedMedia::new(dir),
            None => MountedMedia::unmounted(),
        };

        Self::new(
            Arc::new(FlashStorage::new(paths.internal_dir())),
            Arc::new(ScopedMedia::new(media)),
        )
        .with_key_iterations(settings.key_iterations)
    }

    /// Use a different iteration count for newly stored secrets
    pub fn with_key_iterations(mut self, key_iterations: u32) -> Self {
        self.key_iterations = key_iterations;
        self
    }

    /// Iteration count used for newly stored secrets
    pub fn key_iterations(&self) -> u32 {
        self.key_iterations
    }

    fn slot(&self, location: Location) -> &Slot {
        match location {
            Location::Internal => &self.internal,
            Location::Removable => &self.removable,
        }
    }

    /// Re-read both collections from their backends
    pub fn reload(&self) {
        for slot in [&self.internal, &self.removable] {
            let collection = slot.read().unwrap_or_default();
            *slot.cache() = collection;
        }
    }

    /// Whether removable media is currently present
    pub fn removable_available(&self) -> bool {
        self.removable.backend.is_available()
    }

    /// Identifiers in a collection, in document order
    ///
    /// Empty when the collection is empty or its media is not mounted.
    pub fn list_entries(&self, location: Location) -> Vec<String> {
        self.slot(location).cache().identifiers()
    }

    /// Stored metadata of an entry, without decrypting it
    pub fn entry(&self, location: Location, identifier: &str) -> Option<Entry> {
        self.slot(location).cache().get(identifier).cloned()
    }

    /// Decrypt a stored secret
    ///
    /// Any failure is reported as `NotFound`, whatever its cause.
    pub fn reveal(
        &self,
        passphrase: &str,
        identifier: &str,
        location: Location,
    ) -> SeedVaultResult<SecureString> {
        self.try_reveal(passphrase, identifier, location)
            .map_err(|err| {
                debug!(%location, error = %err, "reveal failed");
                SeedVaultError::secret_not_found(identifier)
            })
    }

    /// Decrypt a stored secret, keeping the specific failure
    pub fn try_reveal(
        &self,
        passphrase: &str,
        identifier: &str,
        location: Location,
    ) -> SeedVaultResult<SecureString> {
        let entry = {
            let cache = self.slot(location).cache();
            match cache.get(identifier) {
                Some(entry) => entry.clone(),
                None if cache.contains(identifier) => {
                    return Err(SeedVaultError::Format(format!(
                        "Entry '{}' is malformed",
                        identifier
                    )))
                }
                None => return Err(SeedVaultError::secret_not_found(identifier)),
            }
        };

        let iterations = u32::try_from(entry.key_iterations).map_err(|_| {
            SeedVaultError::Format(format!(
                "Iteration count {} is out of range",
                entry.key_iterations
            ))
        })?;
        let cipher = SeedCipher::new(passphrase, identifier, iterations, entry.cipher_version)?;
        cipher.decrypt(&entry.data).map(SecureString::from)
    }

    /// Encrypt and store a secret, overwriting any entry with the same identifier
    ///
    /// Returns `true` only when the document write completed.
    pub fn persist(
        &self,
        passphrase: &str,
        identifier: &str,
        plaintext: &str,
        location: Location,
    ) -> bool {
        match self.try_persist(passphrase, identifier, plaintext, location) {
            Ok(()) => true,
            Err(err) => {
                warn!(%location, error = %err, "could not store secret");
                false
            }
        }
    }

    /// Encrypt and store a secret, returning the failure if there is one
    pub fn try_persist(
        &self,
        passphrase: &str,
        identifier: &str,
        plaintext: &str,
        location: Location,
    ) -> SeedVaultResult<()> {
        if identifier.trim().is_empty() {
            return Err(SeedVaultError::Validation(
                "Identifier cannot be empty".to_string(),
            ));
        }

        let cipher = SeedCipher::new(
            passphrase,
            identifier,
            self.key_iterations,
            CipherMode::Ecb,
        )?;
        let entry = Entry::ecb(cipher.encrypt(plaintext), self.key_iterations);

        let slot = self.slot(location);
        let mut cache = slot.cache();

        // An unreadable document is replaced rather than blocking the write
        let mut collection = slot.read().unwrap_or_else(|err| {
            if !err.is_media_unavailable() {
                warn!(%location, error = %err, "could not re-read secrets, rewriting from empty");
            }
            Collection::new()
        });
        collection.insert(identifier, entry);

        slot.write(&collection)?;
        debug!(%location, entries = collection.len(), "stored secret");
        *cache = collection;
        Ok(())
    }

    /// Remove a stored secret
    ///
    /// Fails with `NotFound` if the identifier is absent and with
    /// `MediaUnavailable` if removable media is targeted but not mounted.
    /// A failed write of the updated document is logged and not reported.
    pub fn erase(&self, identifier: &str, location: Location) -> SeedVaultResult<()> {
        let slot = self.slot(location);
        let mut cache = slot.cache();

        let mut collection = match slot.read() {
            Ok(collection) => collection,
            Err(err) if err.is_media_unavailable() => return Err(err),
            Err(err) => {
                warn!(%location, error = %err, "could not re-read secrets, using loaded copy");
                (*cache).clone()
            }
        };

        if !collection.remove(identifier) {
            return Err(SeedVaultError::secret_not_found(identifier));
        }

        if let Err(err) = slot.write(&collection) {
            warn!(%location, error = %err, "could not write secrets after delete");
        } else {
            debug!(%location, entries = collection.len(), "deleted secret");
        }
        *cache = collection;
        Ok(())
    }
}
