//! Registration parameters and storage namespace configuration.
//!
//! Hosts embedding the onboarding core can rebrand the registered
//! application (name, website, redirect scheme) and relocate the storage
//! namespace without code changes, via YAML merged over defaults.

use serde::{Deserialize, Serialize};

fn default_app_name() -> String {
    "Fedikit".to_string()
}
fn default_scopes() -> Vec<String> {
    ["read", "write", "follow", "push"]
        .map(String::from)
        .to_vec()
}
fn default_website() -> String {
    "https://github.com/fedikit/fedikit".to_string()
}
fn default_redirect_uri() -> String {
    "fedikit://oauth_callback".to_string()
}
fn default_namespace() -> String {
    "fedikit".to_string()
}

/// Parameters sent when registering the application with an instance, plus
/// the namespace prefixing every secure-store key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardConfig {
    /// Application name shown on the instance's authorized-apps page.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// OAuth scopes requested at registration.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// Project website sent with the registration.
    #[serde(default = "default_website")]
    pub website: String,
    /// Custom-scheme redirect URI. Must match the value the OS hands back
    /// to the application after authorization.
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
    /// Namespace prefixing secure-store keys and naming the keychain
    /// service.
    #[serde(default = "default_namespace")]
    pub storage_namespace: String,
}

impl Default for OnboardConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            scopes: default_scopes(),
            website: default_website(),
            redirect_uri: default_redirect_uri(),
            storage_namespace: default_namespace(),
        }
    }
}

impl OnboardConfig {
    /// The space-separated scope string the registration endpoint expects.
    #[must_use]
    pub fn scope_param(&self) -> String {
        self.scopes.join(" ")
    }

    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(OnboardConfig::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Loads configuration from a file path, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &std::path::Path) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(OnboardConfig::default()))
            .merge(Yaml::file(path))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"
app_name: "Trunkline"
website: "https://trunkline.example"
storage_namespace: "trunkline"
"#;

    #[test]
    fn test_default_config() {
        let c = OnboardConfig::default();
        assert_eq!(c.app_name, "Fedikit");
        assert_eq!(c.scope_param(), "read write follow push");
        assert_eq!(c.redirect_uri, "fedikit://oauth_callback");
        assert_eq!(c.storage_namespace, "fedikit");
    }

    #[test]
    fn test_from_yaml_overrides() {
        let c = OnboardConfig::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(c.app_name, "Trunkline");
        assert_eq!(c.website, "https://trunkline.example");
        assert_eq!(c.storage_namespace, "trunkline");
    }

    #[test]
    fn test_from_yaml_keeps_defaults_for_missing_fields() {
        let c = OnboardConfig::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(c.scope_param(), "read write follow push");
        assert_eq!(c.redirect_uri, "fedikit://oauth_callback");
    }

    #[test]
    fn test_from_yaml_invalid() {
        assert!(OnboardConfig::from_yaml("scopes: 42").is_err());
    }

    #[test]
    fn test_scope_param_custom() {
        let c = OnboardConfig {
            scopes: vec!["read".into(), "write".into()],
            ..OnboardConfig::default()
        };
        assert_eq!(c.scope_param(), "read write");
    }
}
