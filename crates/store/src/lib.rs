//! Secure storage backends for persisting application credentials.
//!
//! Provides an in-memory store for testing and an OS-keychain store for
//! production.

pub mod keyring;
pub mod memory;

pub use keyring::KeyringSecureStore;
pub use memory::MemorySecureStore;
