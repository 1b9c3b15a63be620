//! HTTP client for the OMDb API (feature `lookup`).

use super::response::{OmdbPayload, map_payload};
use super::LookupOutcome;

/// Environment variable holding the OMDb API key.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

const DEFAULT_ENDPOINT: &str = "https://www.omdbapi.com/";

/// Title lookup client. Cheap to clone; reuses one connection pool.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    api_key: String,
    endpoint: String,
    http: reqwest::Client,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    /// Endpoint override, for tests against a local stub.
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Build a client from [`API_KEY_ENV`], or `None` when it is unset.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .map(Self::new)
    }

    /// Resolve a free-text title query.
    ///
    /// Every failure mode degrades to [`LookupOutcome::NotFound`]: transport
    /// errors, non-success statuses, and bodies that do not deserialize. The
    /// underlying error goes to the log, not to the caller.
    pub async fn lookup(&self, query: &str) -> LookupOutcome {
        let request = self
            .http
            .get(&self.endpoint)
            .query(&[("t", query), ("apikey", self.api_key.as_str())]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(error = %err, "metadata request failed");
                return LookupOutcome::not_found("metadata service unavailable");
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "metadata service returned an error status");
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return LookupOutcome::not_found(
                    "metadata service rejected the API key; check OMDB_API_KEY",
                );
            }
            return LookupOutcome::not_found(format!("metadata service error: {status}"));
        }

        match response.json::<OmdbPayload>().await {
            Ok(payload) => map_payload(payload),
            Err(err) => {
                tracing::debug!(error = %err, "metadata response did not deserialize");
                LookupOutcome::not_found("unexpected metadata response")
            }
        }
    }
}
