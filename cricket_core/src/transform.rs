//! Record Parser and Batch Transformer.
//!
//! Turns the semi-structured API payload into flat `NormalizedMatch`
//! rows: composite name strings ("India vs Australia, 3rd Match") and
//! venue strings ("MCG, Melbourne") are split into typed columns, nested
//! score arrays become fixed "runs/wickets(overs)" strings, and
//! rain-abandoned matches are filtered out before parsing.

use chrono::{Local, NaiveDateTime, Timelike};
use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::models::{InningsScore, NormalizedMatch, RawMatch, RAIN_SENTINEL};

/// Decode a fetched payload body into raw match records.
///
/// The payload must be a JSON object with a `"data"` key bound to an
/// array of records, each carrying the expected columns. Anything else is
/// a shape error, distinct from per-record parse errors.
pub fn parse_payload(body: &str) -> Result<Vec<RawMatch>> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| IngestError::Shape(format!("invalid json body: {e}")))?;

    let data = root
        .get("data")
        .ok_or_else(|| IngestError::Shape("expected key \"data\" not found".to_string()))?;
    let records = data
        .as_array()
        .ok_or_else(|| IngestError::Shape("\"data\" is not an array".to_string()))?;

    let mut matches = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let parsed: RawMatch = serde_json::from_value(record.clone()).map_err(|e| {
            IngestError::Shape(format!("record {idx} missing expected columns: {e}"))
        })?;
        matches.push(parsed);
    }
    Ok(matches)
}

/// Transform a fetched batch into normalized rows.
///
/// Rain-abandoned records are dropped before parsing; output order
/// mirrors the filtered input order. The whole batch is stamped with one
/// capture timestamp. A malformed record fails the whole batch.
pub fn transform_batch(raw: Vec<RawMatch>) -> Result<Vec<NormalizedMatch>> {
    transform_batch_at(raw, capture_time())
}

fn transform_batch_at(raw: Vec<RawMatch>, captured_at: NaiveDateTime) -> Result<Vec<NormalizedMatch>> {
    let mut rows = Vec::with_capacity(raw.len());
    for record in raw {
        if record.status == RAIN_SENTINEL {
            debug!(id = %record.id, "skipping rain-abandoned match");
            continue;
        }
        rows.push(parse_match(&record, captured_at)?);
    }
    Ok(rows)
}

/// Parse one raw record into a flat row, or fail with a parse error
/// naming the offending record.
pub fn parse_match(raw: &RawMatch, captured_at: NaiveDateTime) -> Result<NormalizedMatch> {
    let (team1, team2, match_number) = split_name(&raw.name).map_err(|reason| {
        IngestError::Parse {
            id: raw.id.clone(),
            reason,
        }
    })?;
    let (venue, city) = split_venue(&raw.venue).map_err(|reason| IngestError::Parse {
        id: raw.id.clone(),
        reason,
    })?;
    let (score_team1, score_team2) = format_scores(&raw.score);

    Ok(NormalizedMatch {
        id: raw.id.clone(),
        team1,
        team2,
        match_number,
        match_type: raw.match_type.to_uppercase(),
        status: raw.status.clone(),
        score_team1,
        score_team2,
        venue,
        city,
        captured_at,
    })
}

/// Split `"TeamA vs TeamB, Match N"` into (team1, team2, match_number).
///
/// The comma segment is optional (match_number is empty without it); the
/// `" vs "` separator is not.
fn split_name(name: &str) -> std::result::Result<(String, String, String), String> {
    let (teams_part, match_info) = match name.split_once(',') {
        Some((teams, rest)) => (teams, rest.trim()),
        None => (name, ""),
    };

    let mut teams = teams_part.split(" vs ");
    let team1 = teams.next().unwrap_or_default().trim();
    let team2 = teams
        .next()
        .ok_or_else(|| format!("name {name:?} has no \" vs \" separator"))?
        .trim();

    let match_number = match_info
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();

    Ok((team1.to_string(), team2.to_string(), match_number))
}

/// Split `"Ground, City"` on the first comma. A venue without a city
/// segment is malformed.
fn split_venue(venue: &str) -> std::result::Result<(String, String), String> {
    let (ground, city) = venue
        .split_once(',')
        .ok_or_else(|| format!("venue {venue:?} has no city segment"))?;
    Ok((ground.trim().to_string(), city.trim().to_string()))
}

/// Format up to two innings entries; pad with empty strings when fewer
/// exist, drop anything beyond the second.
fn format_scores(score: &[InningsScore]) -> (String, String) {
    let first = score.first().map(|s| s.formatted()).unwrap_or_default();
    let second = score.get(1).map(|s| s.formatted()).unwrap_or_default();
    (first, second)
}

/// Wall-clock capture time, truncated to whole seconds.
fn capture_time() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
