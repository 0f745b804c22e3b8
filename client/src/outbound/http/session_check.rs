//! Reqwest-backed "who am I" session check.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use super::transport::{HttpTransport, decode};
use crate::domain::ports::{RemoteError, SessionCheck, SessionCheckError};
use crate::domain::{Identity, SessionContext};

/// Session check calling `GET {base}/{whoami path}` with the bearer token.
pub struct HttpSessionCheck {
    transport: HttpTransport,
    whoami_path: String,
}

impl HttpSessionCheck {
    /// Build a checker for `whoami_path` below `base`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base: Url,
        whoami_path: impl Into<String>,
        timeout: Duration,
        session: SessionContext,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            transport: HttpTransport::new(base, timeout, session)?,
            whoami_path: whoami_path.into(),
        })
    }
}

#[async_trait]
impl SessionCheck for HttpSessionCheck {
    async fn whoami(&self) -> Result<Identity, SessionCheckError> {
        let url = self
            .transport
            .endpoint(self.whoami_path.split('/'))
            .map_err(to_session_error)?;
        let request = self.transport.client().get(url);
        let body = self
            .transport
            .execute(request)
            .await
            .map_err(to_session_error)?;
        decode(&body, "identity").map_err(to_session_error)
    }
}

fn to_session_error(error: RemoteError) -> SessionCheckError {
    match error {
        RemoteError::Status { status, message } if matches!(status, 401 | 403) => {
            SessionCheckError::unauthorized(message)
        }
        RemoteError::Status { status, message } => {
            SessionCheckError::transport(format!("status {status}: {message}"))
        }
        RemoteError::Timeout { message } => SessionCheckError::timeout(message),
        RemoteError::Decode { message } => SessionCheckError::decode(message),
        RemoteError::Transport { message } | RemoteError::InvalidRequest { message } => {
            SessionCheckError::transport(message)
        }
    }
}
