//! Fedikit — onboarding core for a Mastodon-style social client.
//!
//! Embeds in a UI host: the user picks a server, the flow silently
//! registers (or retrieves the cached registration for) an OAuth
//! application on that instance, and the host UI observes progress through
//! a watch channel.
//!
//! ```no_run
//! use std::sync::Arc;
//! use fedikit::{CredentialCache, KeyringSecureStore, OnboardConfig, OnboardingFlow};
//!
//! # async fn onboard() {
//! let config = OnboardConfig::default();
//! let store = Arc::new(KeyringSecureStore::new(config.storage_namespace.clone()));
//! let flow = OnboardingFlow::new(Arc::new(CredentialCache::new(store, config)));
//!
//! let mut state = flow.subscribe();
//! flow.select_server("example.social");
//! while state.changed().await.is_ok() {
//!     // Render the new state; continue authorization once Ready.
//! }
//! # }
//! ```

pub use fedikit_onboard::{
    CredentialCache, InstanceClient, OnboardConfig, OnboardingFlow, OnboardingState,
};
pub use fedikit_store::{KeyringSecureStore, MemorySecureStore};
pub use fedikit_types::{AppCredentials, FedikitError, InstanceHost, SecureStore};
