//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the appropriate
//! action, such as starting the relay with its injected upstream configuration.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::upstream;
use anyhow::{Context, Result, anyhow};
use url::Url;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let upstream_opts = upstream::Options::parse(matches)?;
    let upstream_url =
        Url::parse(&upstream_opts.url).context("invalid VESTIBULO_UPSTREAM_URL")?;

    match upstream_url.scheme() {
        "http" | "https" => {}
        scheme => return Err(anyhow!("unsupported upstream scheme: {scheme}")),
    }

    Ok(Action::Server(Args { port, upstream_url }))
}
