//! Cricket Core - match normalization and storage for the ingest service.
//!
//! This library provides:
//! - The CricAPI `currentMatches` client
//! - Payload decoding with shape validation (`"data"` key, required columns)
//! - Record parsing: composite name/venue strings and nested score arrays
//!   into flat typed rows
//! - Batch transformation with rain-abandonment filtering
//! - Idempotent PostgreSQL schema-ensure and paged keyed upserts

pub mod clients;
pub mod db;
pub mod error;
pub mod models;
pub mod snapshot;
pub mod transform;

pub use error::{IngestError, Result};
pub use models::{InningsScore, NormalizedMatch, RawMatch, RAIN_SENTINEL};
pub use transform::{parse_match, parse_payload, transform_batch};
