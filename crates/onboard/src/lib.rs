//! Onboarding core: server selection and OAuth application registration.
//!
//! The [`OnboardingFlow`] reacts to a user's server selection, the
//! [`CredentialCache`] resolves per-host application credentials (cached in
//! a secure store, registered over HTTP on first contact), and
//! [`OnboardConfig`] carries the registration parameters.

pub mod cache;
pub mod client;
pub mod config;
pub mod flow;
pub mod registration;

pub use cache::CredentialCache;
pub use client::InstanceClient;
pub use config::OnboardConfig;
pub use flow::{OnboardingFlow, OnboardingState};
