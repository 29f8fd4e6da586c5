//! Forwarding client for the upstream identity service. The base URL is
//! injected at construction so the relay stays testable against a mock
//! upstream; nothing here retries or classifies upstream failures.

use crate::api::handlers::types::{Credentials, RegisterPayload};
use anyhow::Result;
use reqwest::{Client, Response};
use tracing::{Instrument, debug, info_span};
use url::Url;

/// Upstream path receiving the renamed registration payload.
pub const REGISTER_PATH: &str = "api/register/";
/// Upstream path receiving login credentials.
pub const LOGIN_PATH: &str = "auth/login/";

#[derive(Debug, Clone)]
pub struct Upstream {
    http: Client,
    base_url: Url,
}

impl Upstream {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url) -> Result<Self> {
        let http = Client::builder().user_agent(crate::APP_USER_AGENT).build()?;

        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins the configured base URL and a relative path, tolerating a
    /// trailing slash on the base.
    fn endpoint_url(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Forward a registration payload to the upstream register endpoint.
    ///
    /// The raw response is handed back so the caller can relay status and
    /// body verbatim.
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<Response> {
        let url = self.endpoint_url(REGISTER_PATH);

        debug!("register URL: {}", url);

        let span = info_span!(
            "upstream.register",
            http.method = "POST",
            url = %url
        );
        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .instrument(span)
            .await?;

        Ok(response)
    }

    /// Forward login credentials to the upstream login endpoint.
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent.
    pub async fn login(&self, credentials: &Credentials) -> Result<Response> {
        let url = self.endpoint_url(LOGIN_PATH);

        debug!("login URL: {}", url);

        let span = info_span!(
            "upstream.login",
            http.method = "POST",
            url = %url
        );
        let response = self
            .http
            .post(&url)
            .json(credentials)
            .send()
            .instrument(span)
            .await?;

        Ok(response)
    }
}
