use crate::api::{
    handlers::{
        error_response,
        types::{CreateUserRequest, ErrorResponse, RegistrationResponse},
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

const MISSING_FIELDS: &str = "All fields are required";
const REGISTRATION_FAILED: &str = "Registration failed";

#[utoipa::path(
    post,
    path = "/api/create-user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Registration relayed", body = RegistrationResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Upstream unreachable or unreadable", body = ErrorResponse),
    ),
    tag = "register"
)]
// axum handler for the registration proxy
pub async fn create_user(
    upstream: Extension<Arc<Upstream>>,
    payload: Option<Json<CreateUserRequest>>,
) -> Response {
    let request: CreateUserRequest = match payload {
        Some(Json(payload)) => payload,
        None => return error_response(StatusCode::BAD_REQUEST, MISSING_FIELDS),
    };

    // Absent and blank fields are both rejected before any upstream call.
    let Some(register_payload) = request.into_register_payload() else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_FIELDS);
    };

    debug!("registering {}", register_payload.email);

    let response = match upstream.register(&register_payload).await {
        Ok(response) => response,
        Err(err) => {
            error!("Upstream registration request failed: {err:?}");

            return error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };

    let status = response.status();

    let body: Value = match response.json().await {
        Ok(body) => body,
        Err(err) => {
            error!("Failed to read upstream registration response: {err:?}");

            return error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };

    if !status.is_success() {
        // Relay the upstream's detail field with the upstream's status.
        let detail = body
            .get("detail")
            .and_then(Value::as_str)
            .unwrap_or(REGISTRATION_FAILED);

        return error_response(status, detail);
    }

    (StatusCode::CREATED, Json(body)).into_response()
}
