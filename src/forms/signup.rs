//! Sign-up form flow. Validates the registration input locally, attaches the
//! fixed role, submits through the client helper, and schedules the redirect
//! back to the login screen after a short success notice.

use crate::{
    api::handlers::types::RegistrationData,
    client::{ApiClient, ClientError},
    forms::{FormPhase, LOGIN_ROUTE, Redirect, schema, schema::FieldErrors},
};
use std::time::Duration;
use tracing::error;

/// Role attached to every sign-up payload.
pub const SIGNUP_ROLE: &str = "admin";
/// Delay before redirecting to the login screen after success.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

const SUCCESS_MESSAGE: &str = "Registration successful!";
const GENERIC_ERROR: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub show_password: bool,
    pub show_confirm_password: bool,
    phase: FormPhase,
    error_message: String,
    success_message: String,
    field_errors: FieldErrors,
}

impl SignupForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates a field by its form input name. Returns `false` for unknown
    /// names.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        match name {
            "firstName" => self.first_name = value.to_string(),
            "lastName" => self.last_name = value.to_string(),
            "email" => self.email = value.to_string(),
            "password" => self.password = value.to_string(),
            "confirmPassword" => self.confirm_password = value.to_string(),
            _ => return false,
        }

        true
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn toggle_confirm_password_visibility(&mut self) {
        self.show_confirm_password = !self.show_confirm_password;
    }

    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    #[must_use]
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    #[must_use]
    pub fn success_message(&self) -> &str {
        &self.success_message
    }

    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Validate and submit the form.
    ///
    /// Schema failures are joined into one error message; a successful
    /// registration sets the success notice and returns a redirect to the
    /// login screen delayed by [`REDIRECT_DELAY`]. Failures distinguish the
    /// server-provided message from transport errors, falling back to a
    /// generic message. Loading is cleared on every outcome.
    pub async fn submit(&mut self, api: &ApiClient) -> Option<Redirect> {
        self.error_message.clear();
        self.success_message.clear();
        self.phase = FormPhase::Submitting;

        self.field_errors = schema::validate_signup(&schema::SignupInput {
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            password: &self.password,
            confirm_password: &self.confirm_password,
        });
        if !self.field_errors.is_empty() {
            self.error_message = self.field_errors.joined(", ");
            self.phase = FormPhase::Failed;

            return None;
        }

        let data = RegistrationData {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: SIGNUP_ROLE.to_string(),
        };

        match api.create_user(&data).await {
            Ok(_response) => {
                self.success_message = SUCCESS_MESSAGE.to_string();
                self.phase = FormPhase::Succeeded;

                Some(Redirect {
                    to: LOGIN_ROUTE,
                    after: Some(REDIRECT_DELAY),
                })
            }
            Err(err) => {
                error!("Registration error: {err}");

                self.error_message = signup_error_message(&err);
                self.phase = FormPhase::Failed;

                None
            }
        }
    }
}

/// Maps a client error onto the user-facing message: the structured
/// `{"error"}` body when present, the transport message otherwise, and a
/// generic fallback when neither carries anything usable.
fn signup_error_message(err: &ClientError) -> String {
    let message = err.message().trim();

    if message.is_empty() {
        GENERIC_ERROR.to_string()
    } else {
        message.to_string()
    }
}
