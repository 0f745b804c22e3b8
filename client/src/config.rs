//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `MARKETPLACE_*` environment variables, configuration
//! files, and command-line flags. Timeouts carry layer defaults; the
//! remaining fields are optional and their accessors apply the defaults.

use std::fmt;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{DEFAULT_LOGIN_PATH, GateSettings, SessionToken};

const DEFAULT_WHOAMI_PATH: &str = "auth/whoami";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum ClientSettingsError {
    /// No base URL was configured.
    #[error("MARKETPLACE_API_BASE_URL is not set")]
    MissingBaseUrl,
    /// The configured base URL does not parse.
    #[error("invalid API base URL {value:?}: {source}")]
    InvalidBaseUrl {
        /// Raw configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
}

/// Configuration values for the marketplace client.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MARKETPLACE")]
pub struct ClientSettings {
    /// Base URL of the marketplace API.
    pub api_base_url: Option<String>,
    /// Session check path below the base URL.
    pub whoami_path: Option<String>,
    /// Route the gate redirects to when the session is rejected.
    pub login_path: Option<String>,
    /// Timeout for CRUD requests, in milliseconds.
    #[ortho_config(default = 15_000)]
    pub request_timeout_ms: u64,
    /// Timeout for the session check, in milliseconds.
    #[ortho_config(default = 10_000)]
    pub session_check_timeout_ms: u64,
    /// Bearer token identifying the session.
    pub session_token: Option<String>,
}

impl ClientSettings {
    /// Parse the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or malformed.
    pub fn api_base_url(&self) -> Result<Url, ClientSettingsError> {
        let raw = self
            .api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ClientSettingsError::MissingBaseUrl)?;
        Url::parse(raw).map_err(|source| ClientSettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            source,
        })
    }

    /// Session check path, falling back to the default.
    pub fn whoami_path(&self) -> &str {
        self.whoami_path.as_deref().unwrap_or(DEFAULT_WHOAMI_PATH)
    }

    /// Login route, falling back to the default.
    pub fn login_path(&self) -> &str {
        self.login_path.as_deref().unwrap_or(DEFAULT_LOGIN_PATH)
    }

    /// CRUD request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Session check timeout.
    pub fn session_check_timeout(&self) -> Duration {
        Duration::from_millis(self.session_check_timeout_ms)
    }

    /// Configured session token; blank values count as none.
    pub fn session_token(&self) -> Option<SessionToken> {
        self.session_token.clone().and_then(SessionToken::new)
    }

    /// Gate tunables derived from these settings.
    pub fn gate_settings(&self) -> GateSettings {
        GateSettings {
            timeout: self.session_check_timeout(),
            login_path: self.login_path().to_owned(),
        }
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("api_base_url", &self.api_base_url)
            .field("whoami_path", &self.whoami_path)
            .field("login_path", &self.login_path)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("session_check_timeout_ms", &self.session_check_timeout_ms)
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
