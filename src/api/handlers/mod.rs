pub mod health;

pub mod create_user;

pub mod login_user;

pub mod types;

// common helpers for the handlers
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Build a `{"error": …}` response with the given status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}
