//! Data model for the match ingest pipeline.
//!
//! `RawMatch` mirrors one record of the CricAPI `currentMatches` payload;
//! `NormalizedMatch` is the flat row written to the store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Status string marking a match abandoned for weather. Records carrying
/// exactly this status are dropped before parsing.
pub const RAIN_SENTINEL: &str = "No result due to rain";

/// One match record as received from the API.
///
/// Only the columns the pipeline consumes are modeled; unknown payload
/// fields are ignored during deserialization. A record missing any of the
/// required columns fails deserialization (surfaced as a shape error).
#[derive(Debug, Clone, Deserialize)]
pub struct RawMatch {
    pub id: String,
    /// Composite: `"TeamA vs TeamB, Match N"`.
    pub name: String,
    #[serde(rename = "matchType")]
    pub match_type: String,
    pub status: String,
    /// Composite: `"Ground, City"`.
    pub venue: String,
    /// Absent, `null`, or otherwise non-list scores all mean "no innings".
    #[serde(default, deserialize_with = "score_or_empty")]
    pub score: Vec<InningsScore>,
}

/// The feed sends `score` as a list of innings entries, but abandoned or
/// unstarted matches carry `null` or omit it entirely. Anything that is
/// not a list deserializes to an empty score; malformed entries inside a
/// real list still fail.
fn score_or_empty<'de, D>(deserializer: D) -> Result<Vec<InningsScore>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

/// One team's innings entry within a match's score list.
#[derive(Debug, Clone, Deserialize)]
pub struct InningsScore {
    #[serde(rename = "r", default)]
    pub runs: i64,
    #[serde(rename = "w", default)]
    pub wickets: i64,
    #[serde(rename = "o", default)]
    pub overs: f64,
}

impl InningsScore {
    /// Render as `"runs/wickets(overs)"`, e.g. `"120/3(15.2)"`.
    pub fn formatted(&self) -> String {
        format!("{}/{}({})", self.runs, self.wickets, self.overs)
    }
}

/// Flat, typed row derived from one `RawMatch`. Field order matches the
/// store's column order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatch {
    pub id: String,
    pub team1: String,
    pub team2: String,
    /// First token of the segment after the name's comma, `""` if the
    /// name had no comma segment.
    pub match_number: String,
    /// Upper-cased match type (`"t20"` -> `"T20"`).
    pub match_type: String,
    pub status: String,
    /// `"runs/wickets(overs)"` for the first innings, `""` if absent.
    pub score_team1: String,
    /// Same for the second innings.
    pub score_team2: String,
    pub venue: String,
    pub city: String,
    /// Wall-clock time of the transform, second precision. Stamped once
    /// per batch.
    pub captured_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_match_deserializes_api_record() {
        let raw: RawMatch = serde_json::from_str(
            r#"{
                "id": "abc-123",
                "name": "India vs Australia, 3rd Match",
                "matchType": "odi",
                "status": "India won by 6 wkts",
                "venue": "MCG, Melbourne",
                "score": [{"r": 120, "w": 3, "o": 15.2, "inning": "India Inning 1"}],
                "teamInfo": [{"name": "India"}]
            }"#,
        )
        .unwrap();

        assert_eq!(raw.id, "abc-123");
        assert_eq!(raw.match_type, "odi");
        assert_eq!(raw.score.len(), 1);
        assert_eq!(raw.score[0].runs, 120);
        assert_eq!(raw.score[0].wickets, 3);
        assert_eq!(raw.score[0].overs, 15.2);
    }

    #[test]
    fn score_defaults_missing_subfields_to_zero() {
        let raw: RawMatch = serde_json::from_str(
            r#"{
                "id": "x",
                "name": "A vs B",
                "matchType": "t20",
                "status": "Live",
                "venue": "Ground, City",
                "score": [{"r": 45}]
            }"#,
        )
        .unwrap();

        assert_eq!(raw.score[0].formatted(), "45/0(0)");
    }

    #[test]
    fn absent_score_is_empty_list() {
        let raw: RawMatch = serde_json::from_str(
            r#"{
                "id": "x",
                "name": "A vs B",
                "matchType": "t20",
                "status": "Match not started",
                "venue": "Ground, City"
            }"#,
        )
        .unwrap();

        assert!(raw.score.is_empty());
    }

    #[test]
    fn null_score_means_no_innings() {
        let raw: RawMatch = serde_json::from_str(
            r#"{
                "id": "x",
                "name": "A vs B",
                "matchType": "t20",
                "status": "Match abandoned",
                "venue": "Ground, City",
                "score": null
            }"#,
        )
        .unwrap();

        assert!(raw.score.is_empty());
    }

    #[test]
    fn non_list_score_means_no_innings() {
        let raw: RawMatch = serde_json::from_str(
            r#"{
                "id": "x",
                "name": "A vs B",
                "matchType": "t20",
                "status": "Live",
                "venue": "Ground, City",
                "score": "n/a"
            }"#,
        )
        .unwrap();

        assert!(raw.score.is_empty());
    }

    #[test]
    fn malformed_entry_inside_a_real_score_list_still_fails() {
        let result: Result<RawMatch, _> = serde_json::from_str(
            r#"{
                "id": "x",
                "name": "A vs B",
                "matchType": "t20",
                "status": "Live",
                "venue": "Ground, City",
                "score": [{"r": "not a number"}]
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn innings_formatting_keeps_natural_overs_form() {
        let whole = InningsScore {
            runs: 250,
            wickets: 10,
            overs: 50.0,
        };
        let partial = InningsScore {
            runs: 120,
            wickets: 3,
            overs: 15.2,
        };
        assert_eq!(whole.formatted(), "250/10(50)");
        assert_eq!(partial.formatted(), "120/3(15.2)");
    }
}
