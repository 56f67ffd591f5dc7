//! The poll loop: fetch → transform → write, once per interval, forever.
//!
//! Ticks are strictly sequential and isolated: any error anywhere in a
//! tick is logged at the loop boundary and the loop sleeps and retries.
//! The interval runs between tick completions, not tick starts. Ctrl-C is
//! observed only between ticks, so a tick in flight always finishes.

use anyhow::Result;
use cricket_core::clients::CricApiClient;
use cricket_core::db::{self, DbPoolConfig};
use cricket_core::{snapshot, transform, IngestError};
use sqlx::PgPool;
use tracing::{error, info, warn};

use crate::config::IngestConfig;

/// Per-tick progress counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Records in the fetched payload
    pub fetched: usize,
    /// Records dropped by the rain-sentinel filter
    pub skipped: usize,
    /// Rows upserted into the store
    pub written: u64,
}

pub struct MatchPoller {
    config: IngestConfig,
    client: CricApiClient,
    pool: PgPool,
}

impl MatchPoller {
    pub async fn new(config: IngestConfig) -> Result<Self> {
        let client = CricApiClient::new(config.api_key.clone(), config.http_timeout);
        let pool = db::create_pool(&config.database_url, DbPoolConfig::from_env()).await?;
        Ok(Self {
            config,
            client,
            pool,
        })
    }

    /// Run until interrupted.
    pub async fn run(&self) -> Result<()> {
        info!(
            interval = ?self.config.poll_interval,
            "starting match poller"
        );

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            match self.run_tick().await {
                Ok(report) => info!(
                    fetched = report.fetched,
                    skipped = report.skipped,
                    written = report.written,
                    "tick complete"
                ),
                Err(err) => error!("tick failed: {err}; will retry next interval"),
            }

            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested, stopping poller");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }

    /// One fetch → transform → write cycle.
    async fn run_tick(&self) -> std::result::Result<TickReport, IngestError> {
        let body = self.client.current_matches().await?;

        if let Some(path) = &self.config.raw_snapshot_path {
            if let Err(err) = snapshot::write_snapshot(path, &body) {
                warn!(path = %path.display(), "snapshot write failed: {err}");
            }
        }

        let raw = transform::parse_payload(&body)?;
        let fetched = raw.len();
        let rows = transform::transform_batch(raw)?;
        let skipped = fetched - rows.len();

        db::ensure_schema(&self.pool).await?;
        let written = db::upsert_matches(&self.pool, &rows, self.config.upsert_page_size).await?;

        Ok(TickReport {
            fetched,
            skipped,
            written,
        })
    }
}
