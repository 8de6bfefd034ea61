//! Host-keyed credential cache over a [`SecureStore`].
//!
//! Returns the cached registration for a host when one exists, otherwise
//! registers the application once and persists the result. Corrupt or
//! unreadable cache entries fall back to re-registration; they never block
//! onboarding.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fedikit_types::{AppCredentials, InstanceHost, SecureStore, traits::Result};
use tracing::{debug, info, warn};

use crate::client::InstanceClient;
use crate::config::OnboardConfig;

/// Produces [`AppCredentials`] for instances, registering at most once per
/// host.
pub struct CredentialCache {
    store: Arc<dyn SecureStore>,
    config: OnboardConfig,
    /// Per-key guards serializing concurrent registrations for the same host.
    inflight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl CredentialCache {
    /// Creates a cache over the given store, keyed under the configured
    /// storage namespace.
    #[must_use]
    pub fn new(store: Arc<dyn SecureStore>, config: OnboardConfig) -> Self {
        Self {
            store,
            config,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// The registration configuration this cache was built with.
    #[must_use]
    pub fn config(&self) -> &OnboardConfig {
        &self.config
    }

    /// Return the credentials for the client's host, registering the
    /// application if no usable cached record exists.
    ///
    /// Concurrent calls for the same host are single-flighted: the first
    /// caller registers, the rest observe its cached write. A cache hit
    /// makes no network call and no writes; a miss makes exactly one
    /// registration call and at most one best-effort store write.
    ///
    /// # Errors
    ///
    /// Returns the registration failure ([`FedikitError::Http`],
    /// [`FedikitError::Registration`], or [`FedikitError::Serialization`])
    /// when the application cannot be registered. Nothing is written to the
    /// store in that case.
    ///
    /// [`FedikitError::Http`]: fedikit_types::FedikitError::Http
    /// [`FedikitError::Registration`]: fedikit_types::FedikitError::Registration
    /// [`FedikitError::Serialization`]: fedikit_types::FedikitError::Serialization
    pub async fn get_or_create(&self, client: &InstanceClient) -> Result<AppCredentials> {
        let key = client.host().cache_key(&self.config.storage_namespace);
        let guard = self.key_guard(&key);
        let _inflight = guard.lock().await;

        if let Some(creds) = self.load_cached(&key).await {
            debug!(key = %key, "using cached app credentials");
            return Ok(creds);
        }

        let creds = client.register_app(&self.config).await?;
        info!(host = %client.host(), "registered application with instance");

        // Best-effort write: onboarding proceeds with the in-memory record
        // even when nothing could be cached.
        match creds.to_bytes() {
            Ok(bytes) => {
                if let Err(e) = self.store.set(&key, &bytes).await {
                    warn!(key = %key, error = %e, "skipped caching app credentials");
                }
            }
            Err(e) => warn!(key = %key, error = %e, "skipped caching app credentials"),
        }

        Ok(creds)
    }

    /// Drop the stored registration for a host, forcing a fresh
    /// registration on the next [`Self::get_or_create`].
    ///
    /// # Errors
    ///
    /// Returns [`FedikitError::Storage`] if the store backend fails.
    ///
    /// [`FedikitError::Storage`]: fedikit_types::FedikitError::Storage
    pub async fn forget(&self, host: &InstanceHost) -> Result<()> {
        let key = host.cache_key(&self.config.storage_namespace);
        self.store.remove(&key).await
    }

    /// Read and decode the cached record. Decode failures and store read
    /// errors are both treated as a cache miss.
    async fn load_cached(&self, key: &str) -> Option<AppCredentials> {
        match self.store.get(key).await {
            Ok(Some(bytes)) => match AppCredentials::from_bytes(&bytes) {
                Ok(creds) => Some(creds),
                Err(e) => {
                    warn!(key = %key, error = %e, "corrupt cached credentials, re-registering");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %key, error = %e, "secure store read failed, treating as cache miss");
                None
            }
        }
    }

    fn key_guard(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.inflight
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedikit_store::MemorySecureStore;
    use fedikit_types::{FedikitError, InstanceHost};
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    fn cache_with(store: Arc<MemorySecureStore>) -> CredentialCache {
        CredentialCache::new(store, OnboardConfig::default())
    }

    fn client_for(server: &MockServer) -> InstanceClient {
        let host = InstanceHost::parse(&server.base_url()).unwrap();
        InstanceClient::new(host)
    }

    async fn mock_registration(server: &MockServer) -> httpmock::Mock<'_> {
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/apps");
                then.status(200).json_body(json!({
                    "client_id": "id-123",
                    "client_secret": "secret-456",
                    "vapid_key": "vapid-789"
                }));
            })
            .await
    }

    #[tokio::test]
    async fn test_miss_registers_and_caches() {
        let server = MockServer::start_async().await;
        let mock = mock_registration(&server).await;
        let store = Arc::new(MemorySecureStore::new());
        let cache = cache_with(Arc::clone(&store));
        let client = client_for(&server);

        let creds = cache.get_or_create(&client).await.unwrap();

        mock.assert_async().await;
        assert_eq!(creds.client_id, "id-123");
        assert_eq!(creds.vapid_key.as_deref(), Some("vapid-789"));

        // The record is persisted under the host's namespaced key.
        let key = client.host().cache_key("fedikit");
        let stored = store.get(&key).await.unwrap().unwrap();
        assert_eq!(AppCredentials::from_bytes(&stored).unwrap(), creds);
    }

    #[tokio::test]
    async fn test_hit_makes_no_network_call() {
        let server = MockServer::start_async().await;
        let mock = mock_registration(&server).await;
        let store = Arc::new(MemorySecureStore::new());
        let cache = cache_with(Arc::clone(&store));
        let client = client_for(&server);

        let creds = AppCredentials::new("cached-id", "cached-secret");
        let key = client.host().cache_key("fedikit");
        store.set(&key, &creds.to_bytes().unwrap()).await.unwrap();

        let loaded = cache.get_or_create(&client).await.unwrap();
        assert_eq!(loaded, creds);
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_second_call_is_cached() {
        let server = MockServer::start_async().await;
        let mock = mock_registration(&server).await;
        let cache = cache_with(Arc::new(MemorySecureStore::new()));
        let client = client_for(&server);

        let first = cache.get_or_create(&client).await.unwrap();
        let second = cache.get_or_create(&client).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_corrupt_entry_treated_as_miss() {
        let server = MockServer::start_async().await;
        let mock = mock_registration(&server).await;
        let store = Arc::new(MemorySecureStore::new());
        let cache = cache_with(Arc::clone(&store));
        let client = client_for(&server);

        let key = client.host().cache_key("fedikit");
        store.set(&key, b"not credentials").await.unwrap();

        let creds = cache.get_or_create(&client).await.unwrap();

        assert_eq!(mock.hits_async().await, 1);
        assert_eq!(creds.client_id, "id-123");

        // The corrupt entry was overwritten with the fresh record.
        let stored = store.get(&key).await.unwrap().unwrap();
        assert_eq!(AppCredentials::from_bytes(&stored).unwrap(), creds);
    }

    #[tokio::test]
    async fn test_registration_failure_not_cached() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/apps");
                then.status(503).body("instance is down");
            })
            .await;
        let store = Arc::new(MemorySecureStore::new());
        let cache = cache_with(Arc::clone(&store));
        let client = client_for(&server);

        let err = cache.get_or_create(&client).await.unwrap_err();
        assert!(matches!(
            err,
            FedikitError::Registration { status: 503, .. }
        ));

        let key = client.host().cache_key("fedikit");
        assert!(store.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_calls_single_flight() {
        let server = MockServer::start_async().await;
        let mock = mock_registration(&server).await;
        let cache = cache_with(Arc::new(MemorySecureStore::new()));
        let client = client_for(&server);

        let (a, b) = tokio::join!(
            cache.get_or_create(&client),
            cache.get_or_create(&client)
        );

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_forget_forces_reregistration() {
        let server = MockServer::start_async().await;
        let mock = mock_registration(&server).await;
        let cache = cache_with(Arc::new(MemorySecureStore::new()));
        let client = client_for(&server);

        cache.get_or_create(&client).await.unwrap();
        cache.forget(client.host()).await.unwrap();
        cache.get_or_create(&client).await.unwrap();

        assert_eq!(mock.hits_async().await, 2);
    }

    #[tokio::test]
    async fn test_distinct_hosts_distinct_registrations() {
        let server_a = MockServer::start_async().await;
        let server_b = MockServer::start_async().await;
        let mock_a = mock_registration(&server_a).await;
        let mock_b = mock_registration(&server_b).await;
        let cache = cache_with(Arc::new(MemorySecureStore::new()));

        cache.get_or_create(&client_for(&server_a)).await.unwrap();
        cache.get_or_create(&client_for(&server_b)).await.unwrap();

        assert_eq!(mock_a.hits_async().await, 1);
        assert_eq!(mock_b.hits_async().await, 1);
    }
}
