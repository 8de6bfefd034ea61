//! Async traits shared across all fedikit crates.
//!
//! Every cross-crate abstraction is defined here so that higher layers depend
//! only on `fedikit-types`, not on each other.

use async_trait::async_trait;

pub use crate::error::Result;

/// Persistent key-value storage for secrets, keyed by namespaced strings.
///
/// Values are opaque byte blobs; the caller owns their encoding. Backends are
/// expected to outlive the process and to gate access through the platform
/// (OS keychain, credential manager). Implementations must be safe for
/// concurrent use.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Load the value stored under `key`, if present.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    /// Persist (or overwrite) `value` under `key`.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    /// Remove the value stored under `key`. Removing an absent key is not an
    /// error.
    async fn remove(&self, key: &str) -> Result<()>;
}
