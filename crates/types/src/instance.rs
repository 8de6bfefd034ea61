//! Validated instance host and secure-store key derivation.

use std::fmt;

use url::Url;

use crate::error::{FedikitError, Result};

/// The scheme prepended to bare server names entered by the user.
pub const DEFAULT_SCHEME: &str = "https";

/// A validated absolute URL identifying a social-network instance.
///
/// Construction is the only place user input is trusted: everything
/// downstream (HTTP base URL, storage keys) derives from a parsed host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceHost(Url);

impl InstanceHost {
    /// Parse a user-entered server string into an instance host.
    ///
    /// Bare names (`"example.social"`) get the `https://` prefix. Explicit
    /// `http://` / `https://` URLs are accepted as-is; any other scheme is
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`FedikitError::InvalidHost`] if the input is empty, does not
    /// parse as an absolute URL, uses an unsupported scheme, or has no host.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FedikitError::InvalidHost(input.to_string()));
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("{DEFAULT_SCHEME}://{trimmed}")
        };

        let url =
            Url::parse(&candidate).map_err(|_| FedikitError::InvalidHost(input.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(FedikitError::InvalidHost(input.to_string()));
        }

        Ok(Self(url))
    }

    /// The parsed URL, for building request paths against the instance.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.0
    }

    /// Canonical `scheme://host[:port]` form — no path, no trailing slash.
    ///
    /// `Url` already lower-cases registered domain names, so two spellings
    /// of the same host canonicalize identically.
    #[must_use]
    pub fn base(&self) -> String {
        let host = self.0.host_str().unwrap_or_default();
        match self.0.port() {
            Some(port) => format!("{}://{host}:{port}", self.0.scheme()),
            None => format!("{}://{host}", self.0.scheme()),
        }
    }

    /// Derive the secure-store key for this host under `namespace`.
    ///
    /// Format: `"<namespace>:app:<lowercased scheme://host[:port]>"`.
    #[must_use]
    pub fn cache_key(&self, namespace: &str) -> String {
        format!("{namespace}:app:{}", self.base().to_lowercase())
    }
}

impl fmt::Display for InstanceHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base())
    }
}
