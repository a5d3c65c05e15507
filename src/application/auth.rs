// src/application/auth.rs
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Checks credentials against the stored user records.
///
/// `Ok(false)` means "no such user"; `Err` is reserved for transport trouble.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, credentials: &Credentials) -> Result<bool, DomainError>;
}

/// Owns the session state and publishes every change to subscribers.
pub struct AuthGate<V: CredentialVerifier> {
    verifier: V,
    state: watch::Sender<SessionState>,
}

impl<V: CredentialVerifier> AuthGate<V> {
    pub fn new(verifier: V) -> Self {
        let (state, _) = watch::channel(SessionState::Anonymous);
        Self { verifier, state }
    }

    /// Returns whether the credentials matched a stored user.
    ///
    /// A rejected login leaves the session anonymous. A transport failure
    /// reports `false` and keeps the current state.
    #[instrument(level = "debug", skip(self))]
    pub async fn login(&self, credentials: &Credentials) -> bool {
        if !credentials.is_complete() {
            debug!("Missing username or password");
            return false;
        }

        match self.verifier.verify(credentials).await {
            Ok(true) => {
                info!(username = %credentials.username, "Logged in");
                self.state.send_replace(SessionState::Authenticated);
                true
            }
            Ok(false) => {
                info!(username = %credentials.username, "Invalid credentials");
                self.state.send_replace(SessionState::Anonymous);
                false
            }
            Err(e) => {
                warn!(error = %e, "Login request failed");
                false
            }
        }
    }

    pub fn logout(&self) {
        debug!("Logging out");
        self.state.send_replace(SessionState::Anonymous);
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Receiver that sees the current state and every later change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::MockVerifier;

    fn alice() -> Credentials {
        Credentials::new("alice", "secret")
    }

    #[tokio::test]
    async fn given_matching_user_when_logging_in_then_authenticated() {
        let gate = AuthGate::new(MockVerifier::with_user("alice", "secret"));

        let ok = gate.login(&alice()).await;

        assert!(ok);
        assert_eq!(gate.state(), SessionState::Authenticated);
    }

    #[tokio::test]
    async fn given_wrong_password_when_logging_in_then_stays_anonymous() {
        let gate = AuthGate::new(MockVerifier::with_user("alice", "secret"));

        let ok = gate.login(&Credentials::new("alice", "Secret")).await;

        assert!(!ok);
        assert_eq!(gate.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn given_unreachable_backend_when_logging_in_then_reports_failure() {
        let gate = AuthGate::new(MockVerifier::failing());

        assert!(!gate.login(&alice()).await);
        assert!(!gate.is_authenticated());
    }

    #[tokio::test]
    async fn given_empty_password_when_logging_in_then_skips_backend() {
        let gate = AuthGate::new(MockVerifier::failing());

        assert!(!gate.login(&Credentials::new("alice", "")).await);
    }

    #[test]
    fn given_anonymous_when_logging_out_then_stays_anonymous() {
        let gate = AuthGate::new(MockVerifier::with_user("alice", "secret"));

        gate.logout();
        gate.logout();

        assert_eq!(gate.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn given_subscriber_when_session_changes_then_observes_each_change() {
        let gate = AuthGate::new(MockVerifier::with_user("alice", "secret"));
        let mut rx = gate.subscribe();
        assert_eq!(*rx.borrow(), SessionState::Anonymous);

        gate.login(&alice()).await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SessionState::Authenticated);

        gate.logout();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);
    }

    #[test]
    fn given_credentials_when_debug_printing_then_password_hidden() {
        let printed = format!("{:?}", alice());

        assert!(printed.contains("alice"));
        assert!(!printed.contains("secret"));
    }
}
