use anyhow::{Context, Result};
use clap::{Arg, Command};

pub const ARG_UPSTREAM_URL: &str = "upstream-url";

/// Upstream identity service options parsed from CLI matches.
#[derive(Debug, Clone)]
pub struct Options {
    pub url: String,
}

impl Options {
    /// # Errors
    /// Returns an error if the upstream URL argument is missing.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let url = matches
            .get_one::<String>(ARG_UPSTREAM_URL)
            .cloned()
            .context("missing required argument: --upstream-url")?;

        Ok(Self { url })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_UPSTREAM_URL)
            .short('u')
            .long("upstream-url")
            .help("Base URL of the identity service, example: https://accounts.tld")
            .env("VESTIBULO_UPSTREAM_URL")
            .required(true),
    )
}
