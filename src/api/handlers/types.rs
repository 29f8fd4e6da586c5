//! Request/response types for the relay endpoints. Payloads carry raw
//! credentials in transit, so they must never be logged.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Browser-facing registration body. Fields are optional so absence is
/// detected here rather than rejected by the extractor.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl CreateUserRequest {
    /// Converts into the upstream payload; `None` if any field is absent or
    /// blank.
    #[must_use]
    pub fn into_register_payload(self) -> Option<RegisterPayload> {
        Some(RegisterPayload {
            first_name: non_blank(self.first_name)?,
            last_name: non_blank(self.last_name)?,
            email: non_blank(self.email)?,
            password: non_blank(self.password)?,
            role: non_blank(self.role)?,
        })
    }
}

fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

/// Registration payload in the snake_case shape the upstream expects.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct RegisterPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Browser-facing login body with absence detection.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginUserRequest {
    /// Converts into credentials; `None` if email or password is absent or
    /// blank.
    #[must_use]
    pub fn into_credentials(self) -> Option<Credentials> {
        Some(Credentials {
            email: non_blank(self.email)?,
            password: non_blank(self.password)?,
        })
    }
}

/// Login credentials as forwarded upstream. Transient; they exist only for
/// the duration of a submit call.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration data as the client helpers send it to the relay.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Success body relayed from a completed registration.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct RegistrationResponse {
    pub message: String,
    pub admin: AdminSummary,
}

/// Reflected summary of the registered admin.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Error body returned by the relay on every failure path.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
}
