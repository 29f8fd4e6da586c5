//! Login form flow. Validates credentials locally, submits through the client
//! helper, and redirects to the homepage on success.

use crate::{
    api::handlers::types::Credentials,
    client::ApiClient,
    forms::{FormPhase, HOMEPAGE_ROUTE, Redirect, schema, schema::FieldErrors},
};
use tracing::error;

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub show_password: bool,
    phase: FormPhase,
    error: Option<String>,
    field_errors: FieldErrors,
}

impl LoginForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
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
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Validate and submit the form.
    ///
    /// Schema failures surface field-level errors and skip the network call.
    /// A successful login returns an immediate redirect to the homepage; a
    /// failed one captures the error message. Loading is cleared on every
    /// outcome. Re-submission while a call is in flight is not blocked here;
    /// only the UI disables inputs while loading.
    pub async fn submit(&mut self, api: &ApiClient) -> Option<Redirect> {
        self.error = None;

        self.field_errors = schema::validate_login(&self.email, &self.password);
        if !self.field_errors.is_empty() {
            return None;
        }

        self.phase = FormPhase::Submitting;

        let credentials = Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        };

        match api.login(&credentials).await {
            Ok(_body) => {
                self.phase = FormPhase::Succeeded;

                Some(Redirect {
                    to: HOMEPAGE_ROUTE,
                    after: None,
                })
            }
            Err(err) => {
                error!("Login error: {err}");

                self.phase = FormPhase::Failed;
                self.error = Some(err.message().to_string());

                None
            }
        }
    }
}
