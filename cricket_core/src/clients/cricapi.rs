//! CricAPI client.
//!
//! Fetches the `currentMatches` payload as raw text; decoding and shape
//! validation live in [`crate::transform`] so the raw body can also feed
//! the snapshot hook.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::{IngestError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.cricapi.com/v1";

#[derive(Clone)]
pub struct CricApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for CricApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CricApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl CricApiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Override the API base URL (test servers, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// GET `currentMatches` and return the raw JSON body.
    ///
    /// Any status other than 200 is a [`IngestError::Fetch`] for the tick.
    pub async fn current_matches(&self) -> Result<String> {
        let url = format!("{}/currentMatches", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str()), ("offset", "0")])
            .send()
            .await?;

        check_status(resp.status())?;

        let body = resp.text().await?;
        debug!(bytes = body.len(), "fetched currentMatches payload");
        Ok(body)
    }
}

fn check_status(status: StatusCode) -> Result<()> {
    if status != StatusCode::OK {
        return Err(IngestError::Fetch(format!(
            "api request failed with status {status}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_api_key() {
        let client = CricApiClient::new("super-secret", Duration::from_secs(5));
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn only_status_200_is_a_successful_fetch() {
        assert!(check_status(StatusCode::OK).is_ok());
        // Other 2xx codes are still hard failures for the tick.
        for status in [
            StatusCode::CREATED,
            StatusCode::NO_CONTENT,
            StatusCode::MOVED_PERMANENTLY,
            StatusCode::UNAUTHORIZED,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert!(
                matches!(check_status(status), Err(IngestError::Fetch(_))),
                "{status} should fail the fetch"
            );
        }
    }

    #[test]
    fn base_url_override() {
        let client = CricApiClient::new("k", Duration::from_secs(5))
            .with_base_url("http://localhost:9090/v1");
        assert_eq!(client.base_url, "http://localhost:9090/v1");
    }
}
