//! Match Ingest Service
//!
//! Long-running poller for the CricAPI `currentMatches` feed.
//!
//! This service:
//! - Fetches current cricket matches on a fixed interval
//! - Normalizes composite name/venue strings and nested score arrays
//!   into flat columns
//! - Upserts the batch into the `cricket_matches` PostgreSQL table,
//!   keyed by match id
//! - Isolates every tick: errors are logged and the next tick retries

mod config;
mod poller;

use anyhow::Result;
use config::IngestConfig;
use dotenv::dotenv;
use poller::MatchPoller;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Match Ingest Service...");

    let config = IngestConfig::from_env()?;
    let poller = MatchPoller::new(config).await?;

    poller.run().await
}
