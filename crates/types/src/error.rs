//! Unified error type for the fedikit workspace.

use thiserror::Error;

/// Enumerates all error kinds that can occur across fedikit crates.
#[derive(Debug, Error)]
pub enum FedikitError {
    /// The user-entered server string does not form a valid instance URL.
    #[error("invalid server host: {0}")]
    InvalidHost(String),

    /// The instance rejected the application registration request.
    #[error("registration failed: status={status}, body={body}")]
    Registration { status: u16, body: String },

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(String),

    /// JSON serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Secure storage backend error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration loading or validation error.
    #[error("configuration error: {0}")]
    Config(String),
}

// ── Feature-gated From impls ──────────────────────────────────────────────────

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for FedikitError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

#[cfg(feature = "keyring")]
impl From<keyring::Error> for FedikitError {
    fn from(e: keyring::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl FedikitError {
    /// Returns `true` if the error is likely transient and worth retrying
    /// against the same instance.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Registration { status, .. } => {
                matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            Self::Http(_) => true, // transport errors are retryable
            _ => false,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FedikitError>;
