//! HTTP client bound to a single instance.
//!
//! Thin wrapper over `reqwest` handling the common send → status-check →
//! parse pattern for the endpoints this core consumes.

use fedikit_types::{AppCredentials, FedikitError, InstanceHost, traits::Result};

use crate::config::OnboardConfig;
use crate::registration;

/// An HTTP client bound to one instance's base URL.
#[derive(Debug, Clone)]
pub struct InstanceClient {
    host: InstanceHost,
    http: reqwest::Client,
}

impl InstanceClient {
    /// Creates a client for the given instance with default HTTP settings.
    ///
    /// Timeouts inherit `reqwest`'s defaults.
    #[must_use]
    pub fn new(host: InstanceHost) -> Self {
        Self::with_http(host, reqwest::Client::new())
    }

    /// Creates a client with a caller-supplied `reqwest::Client`.
    #[must_use]
    pub fn with_http(host: InstanceHost, http: reqwest::Client) -> Self {
        Self { host, http }
    }

    /// The instance this client is bound to.
    #[must_use]
    pub fn host(&self) -> &InstanceHost {
        &self.host
    }

    /// Register this application with the instance and return the issued
    /// credentials.
    ///
    /// # Errors
    ///
    /// Returns [`FedikitError::Http`] on transport failures,
    /// [`FedikitError::Registration`] on non-success statuses (with the
    /// response body attached), or [`FedikitError::Serialization`] if the
    /// response body is malformed.
    pub async fn register_app(&self, config: &OnboardConfig) -> Result<AppCredentials> {
        let endpoint = format!("{}{}", self.host.base(), registration::REGISTER_PATH);
        let body = registration::build_register_request(config);

        let resp = self.http.post(&endpoint).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(FedikitError::Registration {
                status: status.as_u16(),
                body: text,
            });
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| FedikitError::Http(e.to_string()))?;
        registration::parse_register_response(json)
    }
}
