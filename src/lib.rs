//! # Vestibulo (Authentication Relay)
//!
//! `vestibulo` is the thin entrance hall in front of an external identity
//! service. It owns the sign-in and sign-up contract between the browser and
//! the upstream: form flows validate input locally, client helpers call the
//! relay endpoints, and the relay forwards credentials upstream and hands the
//! response back unchanged.
//!
//! ## Relay model
//!
//! Two proxy endpoints, one upstream:
//!
//! - `POST /api/create-user` forwards a renamed registration payload to
//!   `{upstream}/api/register/` and relays the outcome (`201` on success).
//! - `POST /api/login-user` forwards credentials to `{upstream}/auth/login/`
//!   and relays the outcome (`200` on success).
//!
//! Missing fields are rejected locally with `400` before any upstream call.
//! Upstream errors are surfaced verbatim with the upstream status; they are
//! never retried or classified further. Nothing persists beyond a single
//! request/response cycle.
//!
//! The upstream base URL is injected configuration (`--upstream-url`), not
//! ambient global state, so the relay can be pointed at a mock during tests.

pub mod api;
pub mod cli;
pub mod client;
pub mod forms;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
