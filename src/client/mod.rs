//! Client wrappers for the relay endpoints. These helpers centralize request
//! setup and error normalization so form flows never touch raw responses, and
//! they must never log the credential payloads they carry.

use crate::api::handlers::types::{
    Credentials, ErrorResponse, RegistrationData, RegistrationResponse,
};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Fallback when a registration error body carries no message.
const REGISTRATION_FAILED: &str = "Registration failed";
/// Fallback when a login error body carries no message.
const LOGIN_FAILED: &str = "Login failed";

/// Errors surfaced to form flows, normalized per failure shape.
#[derive(Clone, Debug)]
pub enum ClientError {
    Config(String),
    Network(String),
    Http { status: u16, message: String },
    Parse(String),
}

impl ClientError {
    /// The user-facing message carried by this error.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Config(message)
            | Self::Network(message)
            | Self::Parse(message)
            | Self::Http { message, .. } => message,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(message) => write!(formatter, "Config error: {message}"),
            Self::Network(message) => write!(formatter, "Network error: {message}"),
            Self::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            Self::Parse(message) => write!(formatter, "Response error: {message}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// JSON client for the relay's own endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .map_err(|err| ClientError::Config(format!("Failed to build client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Registers a new admin through the relay.
    ///
    /// On a non-success status the server-provided `{"error"}` message is
    /// raised; the success body resolves to the parsed registration response.
    ///
    /// # Errors
    /// Returns `ClientError` on transport, HTTP, or decode failure.
    pub async fn create_user(
        &self,
        data: &RegistrationData,
    ) -> Result<RegistrationResponse, ClientError> {
        let response = self.post_json("/api/create-user", data).await?;

        if !response.status().is_success() {
            return Err(api_error(response, REGISTRATION_FAILED).await);
        }

        response
            .json::<RegistrationResponse>()
            .await
            .map_err(|err| ClientError::Parse(format!("Failed to decode response: {err}")))
    }

    /// Logs in through the relay and resolves with the upstream JSON body.
    ///
    /// # Errors
    /// Returns `ClientError` on transport, HTTP, or decode failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<Value, ClientError> {
        let response = self.post_json("/api/login-user", credentials).await?;

        if !response.status().is_success() {
            return Err(api_error(response, LOGIN_FAILED).await);
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| ClientError::Parse(format!("Failed to decode response: {err}")))
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ClientError> {
        let url = build_url_with_base(&self.base_url, path);

        self.http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| ClientError::Network(format!("Unable to reach the server: {err}")))
    }
}

/// Extracts the `{"error"}` body into an HTTP error, falling back to a
/// generic message.
async fn api_error(response: reqwest::Response, fallback: &str) -> ClientError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    ClientError::Http { status, message }
}

/// Builds a URL from a base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
