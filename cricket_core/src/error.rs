//! Error taxonomy for the ingest pipeline.
//!
//! Every variant aborts the current tick; the poll loop logs it and
//! retries on the next interval. None of them terminate the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// Non-success HTTP status or transport failure while calling the API.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Payload is not the expected shape: invalid JSON, missing `"data"`
    /// key, or a record missing one of the expected columns.
    #[error("unexpected payload shape: {0}")]
    Shape(String),

    /// A record's composite name/venue string could not be split.
    #[error("malformed record {id}: {reason}")]
    Parse { id: String, reason: String },

    /// Connect, schema-ensure, or write failure in the store.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        IngestError::Fetch(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
