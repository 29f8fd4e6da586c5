use crate::api::{self, upstream::Upstream};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub upstream_url: Url,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the upstream client cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!(upstream = %args.upstream_url, "Starting relay");

    let upstream = Arc::new(Upstream::new(args.upstream_url)?);

    api::new(args.port, upstream).await
}
