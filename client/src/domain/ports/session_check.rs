//! Driven port for the remote "who am I" session check.
//!
//! Session validity is decided entirely by the remote service; the gate only
//! needs to know whether the check succeeded and who is signed in.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::Identity;

define_port_error! {
    /// Errors surfaced by the session check.
    pub enum SessionCheckError {
        /// The service rejected the session (expired, missing, or invalid).
        Unauthorized { message: String } =>
            "session rejected: {message}",
        /// Network transport failed or the service answered with an error.
        Transport { message: String } =>
            "session check transport failed: {message}",
        /// The check exceeded its timeout.
        Timeout { message: String } =>
            "session check timed out: {message}",
        /// The identity payload could not be decoded.
        Decode { message: String } =>
            "session identity decode failed: {message}",
    }
}

/// Port validating the ambient session against the remote service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionCheck: Send + Sync {
    /// Resolve the identity behind the current session.
    async fn whoami(&self) -> Result<Identity, SessionCheckError>;
}

/// Fixture check answering with a fixed identity, or rejecting when none is
/// configured.
#[derive(Debug, Clone, Default)]
pub struct FixtureSessionCheck {
    identity: Option<Identity>,
}

impl FixtureSessionCheck {
    /// Check that always succeeds with `identity`.
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Check that always rejects the session.
    pub fn signed_out() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionCheck for FixtureSessionCheck {
    async fn whoami(&self) -> Result<Identity, SessionCheckError> {
        self.identity
            .clone()
            .ok_or_else(|| SessionCheckError::unauthorized("no fixture session"))
    }
}
