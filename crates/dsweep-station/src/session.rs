//! Authenticated session against the Download Station web API.
//!
//! # Design
//! - The session owns a cookie-store client; the login cookie rides along on
//!   every later request made through clones of that client.
//! - Credentials only ever appear in the login query and are never logged.

use reqwest::{Client, Url};
use tracing::{debug, info};

use dsweep_config::SyncConfig;

use crate::error::{StationError, StationResult};
use crate::source::{StationTaskSource, decode_envelope, endpoint};
use crate::wire::{AUTH_API, AUTH_PATH, LoginData, SESSION_NAME};

const LOGIN_OPERATION: &str = "auth.login";
const LOGOUT_OPERATION: &str = "auth.logout";

/// Logged-in Download Station session.
#[derive(Debug, Clone)]
pub struct StationSession {
    client: Client,
    base_url: Url,
    sid: Option<String>,
}

impl StationSession {
    /// Build the HTTP client described by `config` and log in.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::AuthRejected`] when the service refuses the
    /// credentials, or a transport/decode error when the login call fails.
    pub async fn login(config: &SyncConfig) -> StationResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| StationError::ClientBuild { source })?;
        Self::login_with(client, config.service_base_url.clone(), config).await
    }

    /// Log in using a caller-supplied client.
    ///
    /// The client should have a cookie store enabled.
    ///
    /// # Errors
    ///
    /// Same as [`StationSession::login`].
    pub async fn login_with(
        client: Client,
        base_url: Url,
        config: &SyncConfig,
    ) -> StationResult<Self> {
        let mut url = endpoint(&base_url, AUTH_PATH)?;
        url.query_pairs_mut()
            .append_pair("api", AUTH_API)
            .append_pair("version", "2")
            .append_pair("method", "login")
            .append_pair("account", &config.account)
            .append_pair("passwd", &config.password)
            .append_pair("session", SESSION_NAME)
            .append_pair("format", "cookie");

        debug!(account = %config.account, "logging in to download station");
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|err| StationError::http(LOGIN_OPERATION, err))?;
        let envelope = decode_envelope::<LoginData>(LOGIN_OPERATION, response).await?;
        if !envelope.success {
            return Err(StationError::AuthRejected {
                code: envelope.error_code(),
            });
        }

        let sid = envelope.data.and_then(|data| data.sid);
        info!(account = %config.account, "download station session established");
        Ok(Self {
            client,
            base_url,
            sid,
        })
    }

    /// Session identifier returned by the login call, if any.
    #[must_use]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    /// Task source bound to this session.
    #[must_use]
    pub fn task_source(&self, retry_limit: u32) -> StationTaskSource {
        StationTaskSource::new(
            self.client.clone(),
            self.base_url.clone(),
            self.sid.clone(),
            retry_limit,
        )
    }

    /// End the session on the service side.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout call fails or is rejected.
    pub async fn logout(&self) -> StationResult<()> {
        let mut url = endpoint(&self.base_url, AUTH_PATH)?;
        url.query_pairs_mut()
            .append_pair("api", AUTH_API)
            .append_pair("version", "1")
            .append_pair("method", "logout")
            .append_pair("session", SESSION_NAME);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| StationError::http(LOGOUT_OPERATION, err))?;
        let envelope = decode_envelope::<serde_json::Value>(LOGOUT_OPERATION, response).await?;
        if envelope.success {
            debug!("download station session closed");
            Ok(())
        } else {
            Err(StationError::Rejected {
                operation: LOGOUT_OPERATION,
                code: envelope.error_code(),
            })
        }
    }
}
