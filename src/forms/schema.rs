//! Schema validation for form input. Structural and format checks run before
//! any network call; failures are reported per field.

use regex::Regex;

/// Minimum password length accepted by both forms.
pub const MIN_PASSWORD_LENGTH: usize = 6;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Basic email format check.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(EMAIL_PATTERN).is_ok_and(|regex| regex.is_match(email))
}

/// Field-level validation errors in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for the given field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// All messages joined into one string.
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        self.errors
            .iter()
            .map(|(_, message)| message.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Validate login input: email presence + format, password length.
#[must_use]
pub fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if email.trim().is_empty() {
        errors.push("email", "Email is required");
    } else if !valid_email(email) {
        errors.push("email", "Invalid email format");
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        errors.push("password", "Password must be at least 6 characters");
    }

    errors
}

/// Sign-up fields as validated, borrowed from the form.
#[derive(Debug)]
pub struct SignupInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// Validate sign-up input. The confirm-password equality check always runs,
/// reported on `confirmPassword` regardless of other field validity.
#[must_use]
pub fn validate_signup(input: &SignupInput<'_>) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if input.first_name.trim().is_empty() {
        errors.push("firstName", "First name is required");
    }

    if input.last_name.trim().is_empty() {
        errors.push("lastName", "Last name is required");
    }

    if !valid_email(input.email) {
        errors.push("email", "Invalid email address");
    }

    if input.password.len() < MIN_PASSWORD_LENGTH {
        errors.push("password", "Password must be at least 6 characters long");
    }

    if input.confirm_password.len() < MIN_PASSWORD_LENGTH {
        errors.push(
            "confirmPassword",
            "Password must be at least 6 characters long",
        );
    }

    if input.password != input.confirm_password {
        errors.push("confirmPassword", "Passwords do not match");
    }

    errors
}
