//! Onboarding state machine driving server selection.
//!
//! States: `Idle → Selecting → Fetching → Ready | Failed`, with `Failed`
//! recoverable by a new selection. The UI layer subscribes to state through
//! a watch channel; this core never references UI types.

use std::sync::{Arc, Mutex};

use fedikit_types::{AppCredentials, FedikitError, InstanceHost};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::CredentialCache;
use crate::client::InstanceClient;

/// Observable onboarding progress.
#[derive(Debug, Clone)]
pub enum OnboardingState {
    /// Nothing started yet.
    Idle,
    /// The server picker is open, no selection made.
    Selecting,
    /// A selection was made; credentials are being fetched.
    Fetching {
        /// The instance being onboarded against.
        host: InstanceHost,
    },
    /// Credentials are available; the host UI continues the authorization
    /// sequence from here.
    Ready {
        /// The instance the credentials belong to.
        host: InstanceHost,
        /// The cached or freshly registered application credentials.
        credentials: AppCredentials,
    },
    /// The selection or fetch failed. Recoverable: a new selection retries.
    Failed {
        /// What went wrong.
        error: Arc<FedikitError>,
    },
}

impl OnboardingState {
    /// The credentials, when the flow has reached [`OnboardingState::Ready`].
    #[must_use]
    pub fn credentials(&self) -> Option<&AppCredentials> {
        match self {
            Self::Ready { credentials, .. } => Some(credentials),
            _ => None,
        }
    }
}

/// Reacts to server selections by resolving credentials asynchronously and
/// publishing state transitions.
///
/// One fetch task runs at a time: a new selection aborts the previous one,
/// and dropping the flow aborts whatever is still pending.
pub struct OnboardingFlow {
    cache: Arc<CredentialCache>,
    state: Arc<watch::Sender<OnboardingState>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl OnboardingFlow {
    /// Creates a flow in the [`OnboardingState::Idle`] state.
    #[must_use]
    pub fn new(cache: Arc<CredentialCache>) -> Self {
        let (tx, _rx) = watch::channel(OnboardingState::Idle);
        Self {
            cache,
            state: Arc::new(tx),
            task: Mutex::new(None),
        }
    }

    /// Subscribe to state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OnboardingState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> OnboardingState {
        self.state.borrow().clone()
    }

    /// The user opened the server picker.
    pub fn begin(&self) {
        self.abort_pending();
        self.state.send_replace(OnboardingState::Selecting);
    }

    /// The user selected a server.
    ///
    /// An unparseable selection transitions straight to
    /// [`OnboardingState::Failed`] with [`FedikitError::InvalidHost`] — no
    /// network or storage calls are made. A valid selection aborts any fetch
    /// still running for a previous selection, transitions to
    /// [`OnboardingState::Fetching`], and resolves credentials on a spawned
    /// task.
    ///
    /// Must be called within a Tokio runtime.
    pub fn select_server(&self, server: &str) {
        self.abort_pending();

        let host = match InstanceHost::parse(server) {
            Ok(host) => host,
            Err(e) => {
                warn!(server, error = %e, "rejected server selection");
                self.state.send_replace(OnboardingState::Failed {
                    error: Arc::new(e),
                });
                return;
            }
        };

        debug!(%host, "server selected, fetching app credentials");
        self.state.send_replace(OnboardingState::Fetching {
            host: host.clone(),
        });

        let cache = Arc::clone(&self.cache);
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            let client = InstanceClient::new(host.clone());
            match cache.get_or_create(&client).await {
                Ok(credentials) => {
                    state.send_replace(OnboardingState::Ready { host, credentials });
                }
                Err(e) => {
                    warn!(%host, error = %e, "onboarding fetch failed");
                    state.send_replace(OnboardingState::Failed {
                        error: Arc::new(e),
                    });
                }
            }
        });
        *self.task.lock().unwrap() = Some(handle);
    }

    fn abort_pending(&self) {
        if let Some(task) = self.task.lock().unwrap().take() {
            task.abort();
        }
    }
}

impl Drop for OnboardingFlow {
    /// A fetch does not outlive the flow that started it.
    fn drop(&mut self) {
        self.abort_pending();
    }
}
