//! Access gate guarding views that require a signed-in session.
//!
//! Mounting a gate starts exactly one remote session check. Until it
//! resolves the gate renders a loading placeholder; afterwards it either
//! renders the protected view or redirects to the login route. The outcome is
//! final for that mount, and there is no retry.
//!
//! Unmounting abandons the check without cancelling it. A check resolving
//! after unmount is discarded: the liveness flag is flipped and read while
//! holding the state channel's write lock, so a late result can never land
//! after teardown.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::ports::{SessionCheck, SessionCheckError};
use crate::domain::{Identity, SessionContext};

/// Default bound on the session check.
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Default redirect target for rejected sessions.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Progress of the session check for one mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// The check has not resolved yet.
    Checking,
    /// The remote service accepted the session.
    Authenticated,
    /// The check failed for any reason.
    Unauthenticated,
}

/// What the host should display for the current gate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    /// Loading placeholder only.
    Loading,
    /// Navigate away; the protected view must not be shown.
    Redirect {
        /// Route to navigate to.
        location: String,
    },
    /// Show the protected view.
    Children,
}

/// Tunables for the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateSettings {
    /// Upper bound on the session check; expiry counts as failure.
    pub timeout: Duration,
    /// Redirect target for rejected sessions.
    pub login_path: String,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_CHECK_TIMEOUT,
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
        }
    }
}

/// Factory for mounted gates sharing one checker and session context.
#[derive(Clone)]
pub struct SessionGate {
    checker: Arc<dyn SessionCheck>,
    session: SessionContext,
    settings: GateSettings,
}

impl SessionGate {
    /// Create a gate validating `session` through `checker`.
    pub fn new(
        checker: Arc<dyn SessionCheck>,
        session: SessionContext,
        settings: GateSettings,
    ) -> Self {
        Self {
            checker,
            session,
            settings,
        }
    }

    /// Session context updated by the checks.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Mount the gate and start its session check.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&self) -> MountedGate {
        let (state, _) = watch::channel(GateState::Checking);
        let cell = Arc::new(GateCell {
            state,
            alive: AtomicBool::new(true),
        });

        let task = tokio::spawn(run_check(
            Arc::clone(&cell),
            Arc::clone(&self.checker),
            self.session.clone(),
            self.settings.timeout,
        ));

        MountedGate {
            cell,
            login_path: self.settings.login_path.clone(),
            task: Some(task),
        }
    }
}

async fn run_check(
    cell: Arc<GateCell>,
    checker: Arc<dyn SessionCheck>,
    session: SessionContext,
    limit: Duration,
) {
    let outcome = match tokio::time::timeout(limit, checker.whoami()).await {
        Ok(outcome) => outcome,
        Err(_) => Err(SessionCheckError::timeout(format!(
            "no answer within {}ms",
            limit.as_millis()
        ))),
    };

    if let Err(error) = &outcome {
        debug!(%error, "session check failed");
    }

    if !cell.settle(outcome, &session) {
        debug!("session check resolved after unmount; result discarded");
    }
}

struct GateCell {
    state: watch::Sender<GateState>,
    alive: AtomicBool,
}

impl GateCell {
    /// Apply the check outcome unless the mount was torn down.
    fn settle(&self, outcome: Result<Identity, SessionCheckError>, session: &SessionContext) -> bool {
        self.state.send_if_modified(|state| {
            if !self.alive.load(Ordering::Acquire) {
                return false;
            }
            *state = match outcome {
                Ok(identity) => {
                    session.record_identity(identity);
                    GateState::Authenticated
                }
                Err(_) => {
                    session.clear_identity();
                    GateState::Unauthenticated
                }
            };
            true
        })
    }

    fn retire(&self) {
        self.state.send_if_modified(|_| {
            self.alive.store(false, Ordering::Release);
            false
        });
    }
}

/// A live gate instance.
///
/// Dropping it has the same effect as [`MountedGate::unmount`].
pub struct MountedGate {
    cell: Arc<GateCell>,
    login_path: String,
    task: Option<JoinHandle<()>>,
}

impl MountedGate {
    /// Current state.
    pub fn state(&self) -> GateState {
        *self.cell.state.borrow()
    }

    /// Output for the current state.
    pub fn render(&self) -> Render {
        match self.state() {
            GateState::Checking => Render::Loading,
            GateState::Authenticated => Render::Children,
            GateState::Unauthenticated => Render::Redirect {
                location: self.login_path.clone(),
            },
        }
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.cell.state.subscribe()
    }

    /// Wait until the check has resolved and return the final state.
    pub async fn settled(&self) -> GateState {
        let mut updates = self.subscribe();
        match updates
            .wait_for(|state| *state != GateState::Checking)
            .await
        {
            Ok(state) => *state,
            // The sender lives in `self.cell`, so the channel cannot close
            // while `self` is borrowed.
            Err(_) => self.state(),
        }
    }

    /// Tear the gate down without cancelling the in-flight check.
    ///
    /// Returns the check task so callers can wait for it to wind down.
    pub fn unmount(mut self) -> Option<JoinHandle<()>> {
        self.cell.retire();
        self.task.take()
    }
}

impl Drop for MountedGate {
    fn drop(&mut self) {
        self.cell.retire();
    }
}

#[cfg(test)]
#[path = "session_gate_tests.rs"]
mod tests;
