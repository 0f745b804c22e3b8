//! Shared reqwest plumbing for the marketplace adapters.
//!
//! Owns the client, the base URL and the bearer token, and maps transport and
//! status failures into port errors. Endpoint construction goes through
//! [`Url::path_segments_mut`] so identifiers are percent-encoded.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::SessionContext;
use crate::domain::ports::RemoteError;

const USER_AGENT: &str = concat!("marketplace-client/", env!("CARGO_PKG_VERSION"));

/// Error envelope returned by the marketplace on failure.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub(super) struct HttpTransport {
    client: Client,
    base: Url,
    session: SessionContext,
}

impl HttpTransport {
    pub(super) fn new(
        base: Url,
        timeout: Duration,
        session: SessionContext,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base,
            session,
        })
    }

    /// `base` with `segments` appended as path segments.
    pub(super) fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, RemoteError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::invalid_request(format!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments.into_iter().filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    pub(super) fn client(&self) -> &Client {
        &self.client
    }

    /// Attach the session token and send, returning the body of a 2xx
    /// response.
    pub(super) async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, RemoteError> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        };
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

pub(super) fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T, RemoteError> {
    serde_json::from_slice(body)
        .map_err(|error| RemoteError::decode(format!("invalid {what} JSON payload: {error}")))
}

pub(super) fn map_transport_error(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::timeout(error.to_string())
    } else {
        RemoteError::transport(error.to_string())
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteError {
    RemoteError::status(status.as_u16(), server_message(body))
}

/// Message from the error envelope, falling back to a compact body preview.
fn server_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.message.or(envelope.error))
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
