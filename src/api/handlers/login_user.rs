use crate::api::{
    handlers::{
        error_response,
        types::{ErrorResponse, LoginUserRequest},
    },
    upstream::Upstream,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

const MISSING_CREDENTIALS: &str = "Email and password are required";
const LOGIN_FAILED: &str = "An error occurred during login";

#[utoipa::path(
    post,
    path = "/api/login-user",
    request_body = LoginUserRequest,
    responses(
        (status = 200, description = "Login relayed with the upstream JSON body"),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 500, description = "Upstream unreachable or unreadable", body = ErrorResponse),
    ),
    tag = "login"
)]
// axum handler for the login proxy
pub async fn login_user(
    upstream: Extension<Arc<Upstream>>,
    payload: Option<Json<LoginUserRequest>>,
) -> Response {
    let request: LoginUserRequest = match payload {
        Some(Json(payload)) => payload,
        None => return error_response(StatusCode::BAD_REQUEST, MISSING_CREDENTIALS),
    };

    let Some(credentials) = request.into_credentials() else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_CREDENTIALS);
    };

    debug!("logging in {}", credentials.email);

    let response = match upstream.login(&credentials).await {
        Ok(response) => response,
        Err(err) => {
            error!("Upstream login request failed: {err:?}");

            return error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };

    let status = response.status();

    // The body can only be consumed once; read it as text and parse JSON on
    // the success path.
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            error!("Failed to read upstream login response: {err:?}");

            return error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };

    if !status.is_success() {
        let message = if body.trim().is_empty() {
            LOGIN_FAILED
        } else {
            body.as_str()
        };

        return error_response(status, message);
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(json) => (StatusCode::OK, Json(json)).into_response(),
        Err(err) => {
            error!("Failed to parse upstream login response: {err:?}");

            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
