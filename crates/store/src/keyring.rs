//! OS-keychain secure store built on the `keyring` crate.
//!
//! Each value lives in one keychain entry: the service name is the injected
//! application namespace, the entry user is the full cache key. Keychain
//! calls are blocking, so they run on the blocking pool.

use ::keyring::Entry;
use async_trait::async_trait;
use fedikit_types::{FedikitError, SecureStore, traits::Result};
use tracing::debug;

/// A persistent [`SecureStore`] backed by the platform keychain
/// (macOS Keychain, Windows Credential Manager, Secret Service).
pub struct KeyringSecureStore {
    /// Keychain service name, shared by all entries this store writes.
    service: String,
}

impl KeyringSecureStore {
    /// Creates a store scoped to the given keychain service name.
    ///
    /// The service name is the application's storage namespace; pass the
    /// same value used for key derivation so entries stay discoverable.
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

#[async_trait]
impl SecureStore for KeyringSecureStore {
    /// Loads the secret stored under `key`, if present.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let service = self.service.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &key)?;
            match entry.get_secret() {
                Ok(bytes) => Ok(Some(bytes)),
                Err(::keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(|e| FedikitError::Storage(e.to_string()))?
    }

    /// Saves (or overwrites) the secret under `key`.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let service = self.service.clone();
        let key = key.to_string();
        let value = value.to_vec();
        debug!(service = %service, key = %key, "writing keychain entry");
        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &key)?;
            entry.set_secret(&value).map_err(FedikitError::from)
        })
        .await
        .map_err(|e| FedikitError::Storage(e.to_string()))?
    }

    /// Removes the secret stored under `key`. Absent entries are not an error.
    async fn remove(&self, key: &str) -> Result<()> {
        let service = self.service.clone();
        let key = key.to_string();
        debug!(service = %service, key = %key, "deleting keychain entry");
        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(&service, &key)?;
            match entry.delete_credential() {
                Ok(()) | Err(::keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(|e| FedikitError::Storage(e.to_string()))?
    }
}
