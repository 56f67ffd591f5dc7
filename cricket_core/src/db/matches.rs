//! `cricket_matches` table operations.
//!
//! Idempotent schema-ensure (table, touch function, guarded trigger) and
//! the paged upsert that writes one tick's batch. A conflict on `id`
//! overwrites every derived column; `created_at` is server-managed and
//! `updated_at` is bumped by the trigger, not by the application.

use sqlx::PgPool;
use tracing::debug;

use crate::error::Result;
use crate::models::NormalizedMatch;

/// Default number of rows committed per transaction.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Well-known trigger name; the guarded DDL makes repeated runs no-ops.
pub const UPDATED_AT_TRIGGER: &str = "update_cricket_matches_updated_at";

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS cricket_matches (
    id VARCHAR(100) PRIMARY KEY,
    Team1 VARCHAR(100),
    Team2 VARCHAR(100),
    Match_Number VARCHAR(50),
    matchType VARCHAR(50),
    status VARCHAR(100),
    score_of_team1 VARCHAR(50),
    score_of_team2 VARCHAR(50),
    Venue VARCHAR(200),
    City VARCHAR(100),
    system_time TIMESTAMP,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_TOUCH_FN_SQL: &str = r#"
CREATE OR REPLACE FUNCTION update_updated_at_column()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = CURRENT_TIMESTAMP;
    RETURN NEW;
END;
$$ language 'plpgsql'
"#;

const CREATE_TRIGGER_SQL: &str = r#"
DO $$
BEGIN
    IF NOT EXISTS (
        SELECT 1
        FROM pg_trigger
        WHERE tgname = 'update_cricket_matches_updated_at'
    ) THEN
        CREATE TRIGGER update_cricket_matches_updated_at
            BEFORE UPDATE ON cricket_matches
            FOR EACH ROW
            EXECUTE FUNCTION update_updated_at_column();
    END IF;
END
$$
"#;

const UPSERT_SQL: &str = r#"
INSERT INTO cricket_matches (
    id, Team1, Team2, Match_Number, matchType, status,
    score_of_team1, score_of_team2, Venue, City, system_time
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
ON CONFLICT (id) DO UPDATE SET
    Team1 = EXCLUDED.Team1,
    Team2 = EXCLUDED.Team2,
    Match_Number = EXCLUDED.Match_Number,
    matchType = EXCLUDED.matchType,
    status = EXCLUDED.status,
    score_of_team1 = EXCLUDED.score_of_team1,
    score_of_team2 = EXCLUDED.score_of_team2,
    Venue = EXCLUDED.Venue,
    City = EXCLUDED.City,
    system_time = EXCLUDED.system_time
"#;

/// Create the table, touch function, and trigger if absent. Safe to run
/// every tick and concurrently with itself.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_TABLE_SQL).execute(pool).await?;
    sqlx::query(CREATE_TOUCH_FN_SQL).execute(pool).await?;
    sqlx::query(CREATE_TRIGGER_SQL).execute(pool).await?;
    Ok(())
}

/// Upsert a batch keyed by `id`, committing `page_size` rows per
/// transaction. Paging never changes per-row semantics: each row is
/// upserted exactly once per call. Returns the number of rows written.
pub async fn upsert_matches(
    pool: &PgPool,
    rows: &[NormalizedMatch],
    page_size: usize,
) -> Result<u64> {
    let page_size = page_size.max(1);
    let mut written: u64 = 0;

    for page in rows.chunks(page_size) {
        let mut tx = pool.begin().await?;
        for row in page {
            sqlx::query(UPSERT_SQL)
                .bind(&row.id)
                .bind(&row.team1)
                .bind(&row.team2)
                .bind(&row.match_number)
                .bind(&row.match_type)
                .bind(&row.status)
                .bind(&row.score_team1)
                .bind(&row.score_team2)
                .bind(&row.venue)
                .bind(&row.city)
                .bind(row.captured_at)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        written += page.len() as u64;
        debug!(rows = page.len(), "committed upsert page");
    }

    Ok(written)
}
