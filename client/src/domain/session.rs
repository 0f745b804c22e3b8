//! Session context shared by the session gate and the remote adapters.
//!
//! Holds the ambient session token sent with every remote call and the
//! identity resolved by the most recent successful session check. Views that
//! need to know who is signed in read it from here instead of from global
//! storage.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use zeroize::Zeroizing;

use super::UserId;

/// Opaque bearer token identifying the session to the remote service.
///
/// The token is redacted from `Debug` output and wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Wrap a raw token; blank tokens are treated as no token.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(Zeroizing::new(raw)))
        }
    }

    /// Raw token value for the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Who the remote service says is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Signed-in user.
    #[serde(alias = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login e-mail.
    #[serde(default)]
    pub email: String,
}

struct SessionInner {
    token: Option<SessionToken>,
    identity: watch::Sender<Option<Identity>>,
}

/// Explicit session context injected into the gate and adapters.
///
/// Cloning is cheap; clones share the same identity slot.
///
/// # Examples
/// ```
/// use client::domain::{SessionContext, SessionToken};
///
/// let session = SessionContext::new(SessionToken::new("abc"));
/// assert!(session.token().is_some());
/// assert!(session.identity().is_none());
/// ```
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

impl SessionContext {
    /// Create a context carrying `token` and no resolved identity.
    pub fn new(token: Option<SessionToken>) -> Self {
        let (identity, _) = watch::channel(None);
        Self {
            inner: Arc::new(SessionInner { token, identity }),
        }
    }

    /// Context with no session token.
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    /// Session token to present to the remote service.
    pub fn token(&self) -> Option<&SessionToken> {
        self.inner.token.as_ref()
    }

    /// Identity recorded by the last successful session check.
    pub fn identity(&self) -> Option<Identity> {
        self.inner.identity.borrow().clone()
    }

    /// Observe identity changes.
    pub fn subscribe_identity(&self) -> watch::Receiver<Option<Identity>> {
        self.inner.identity.subscribe()
    }

    pub(crate) fn record_identity(&self, identity: Identity) {
        self.inner.identity.send_replace(Some(identity));
    }

    pub(crate) fn clear_identity(&self) {
        self.inner.identity.send_if_modified(|current| current.take().is_some());
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &self.inner.token)
            .field("identity", &*self.inner.identity.borrow())
            .finish()
    }
}
