//! OAuth application credentials issued by an instance at registration time.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Client credentials returned by an instance's "create application" endpoint.
///
/// Immutable once created; the whole record is what gets cached per host so
/// that an application is registered at most once per instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppCredentials {
    /// OAuth 2.0 client ID.
    pub client_id: String,
    /// OAuth 2.0 client secret.
    pub client_secret: String,
    /// VAPID public key for web-push subscriptions, when the instance
    /// provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vapid_key: Option<String>,
}

impl AppCredentials {
    /// Create a credential record without a VAPID key.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            vapid_key: None,
        }
    }

    /// Attach the instance's VAPID public key.
    #[must_use]
    pub fn with_vapid_key(mut self, vapid_key: impl Into<String>) -> Self {
        self.vapid_key = Some(vapid_key.into());
        self
    }

    /// Encode the record into the byte form used by [`SecureStore`] values.
    ///
    /// [`SecureStore`]: crate::SecureStore
    ///
    /// # Errors
    ///
    /// Returns [`FedikitError::Serialization`] if encoding fails.
    ///
    /// [`FedikitError::Serialization`]: crate::FedikitError::Serialization
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode a record previously written with [`Self::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`FedikitError::Serialization`] if the bytes are not a valid
    /// encoding of this record shape.
    ///
    /// [`FedikitError::Serialization`]: crate::FedikitError::Serialization
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
