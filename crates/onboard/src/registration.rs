//! Application registration against an instance's apps endpoint.
//!
//! Builds the `POST /api/v1/apps` request body and parses the response into
//! an [`AppCredentials`] record.

use fedikit_types::{AppCredentials, traits::Result};
use serde::Deserialize;

use crate::config::OnboardConfig;

/// Path of the "create application" endpoint, relative to the instance root.
pub const REGISTER_PATH: &str = "/api/v1/apps";

/// The fields of a registration response this core consumes.
///
/// Instances return more (numeric id, echoed name and website); only the
/// credential material is kept.
#[derive(Debug, Deserialize)]
pub struct RegisteredApp {
    /// OAuth 2.0 client ID.
    pub client_id: String,
    /// OAuth 2.0 client secret.
    pub client_secret: String,
    /// VAPID public key for web-push subscriptions, when provided.
    #[serde(default)]
    pub vapid_key: Option<String>,
}

impl From<RegisteredApp> for AppCredentials {
    fn from(app: RegisteredApp) -> Self {
        let creds = AppCredentials::new(app.client_id, app.client_secret);
        match app.vapid_key {
            Some(key) => creds.with_vapid_key(key),
            None => creds,
        }
    }
}

/// Build the JSON body for registering the application with an instance.
#[must_use]
pub fn build_register_request(config: &OnboardConfig) -> serde_json::Value {
    serde_json::json!({
        "client_name": config.app_name,
        "redirect_uris": config.redirect_uri,
        "scopes": config.scope_param(),
        "website": config.website,
    })
}

/// Parse the registration endpoint's JSON response into an [`AppCredentials`].
///
/// # Errors
///
/// Returns [`FedikitError::Serialization`] if the response is missing
/// `client_id` or `client_secret`.
///
/// [`FedikitError::Serialization`]: fedikit_types::FedikitError::Serialization
pub fn parse_register_response(json: serde_json::Value) -> Result<AppCredentials> {
    let app: RegisteredApp = serde_json::from_value(json)?;
    Ok(app.into())
}
