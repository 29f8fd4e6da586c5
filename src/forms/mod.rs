//! Form flows for the sign-in and sign-up screens. Each flow owns a small
//! explicit UI state struct (loading, messages, visibility toggles), runs
//! schema validation before any network call, drives the client helpers, and
//! reports the redirect to perform on success. State lives only as long as
//! the form instance.

pub mod login;
pub mod schema;
pub mod signup;

pub use self::login::LoginForm;
pub use self::signup::SignupForm;

use std::time::Duration;

/// Route the browser lands on after a successful sign-in.
pub const HOMEPAGE_ROUTE: &str = "/homepage";
/// Route the sign-up flow returns to once registration succeeds.
pub const LOGIN_ROUTE: &str = "/login";

/// Submission lifecycle of a form instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Client-side navigation requested by a completed submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: &'static str,
    /// Delay before navigating; `None` navigates immediately.
    pub after: Option<Duration>,
}
