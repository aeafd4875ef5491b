//! HTTP client for the research platform's storage API.
//!
//! Communicates with the platform at `[api] base_url` (default
//! `http://localhost:5000/api`) using the synchronous `ureq` client. Every
//! call blocks the render pass until it completes; no timeout is applied
//! unless `[api] timeout_ms` is positive.
//!
//! Failures come back as [`ApiError`]. Views turn them into an error notice
//! and carry on with empty content, so nothing here panics or retries.

pub mod types;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::activity::ActivityLog;
use crate::config::schema::ApiConfig;

pub use types::{CleanupRequest, DateListing, RemoteSummary, SingleSummary};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection, DNS, TLS, or timeout failure.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    /// The server answered with a status other than the expected one.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// The body was not the expected JSON shape.
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous storage-API client.
///
/// Built once from the resolved `[api]` section and shared by every view of
/// a session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
    activity: ActivityLog,
}

impl ApiClient {
    /// Build a client from the resolved config.
    pub fn from_config(config: &ApiConfig, activity: ActivityLog) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent: builder.build(),
            activity,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// `GET base_url + endpoint`, decoded as arbitrary JSON.
    pub fn fetch(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.fetch_as(endpoint)
    }

    /// `GET base_url + endpoint`, decoded into `T`.
    pub fn fetch_as<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        let result = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| map_ureq_error(&url, e))
            .and_then(|resp| decode_body(&url, resp));

        if let Err(e) = &result {
            self.activity.record_failure("fetch", &e.to_string());
        }
        result
    }

    /// `GET /storage/summaries`: dates the platform has summaries for.
    pub fn list_dates(&self) -> Result<DateListing, ApiError> {
        self.fetch_as("/storage/summaries")
    }

    /// `GET /storage/summaries/{date}`: every category for one date.
    pub fn summaries_for(&self, date: &str) -> Result<Vec<RemoteSummary>, ApiError> {
        self.fetch_as(&format!("/storage/summaries/{}", encode_segment(date)))
    }

    /// `GET /storage/summaries/{date}/{category}`: one category's summary.
    pub fn summary(&self, date: &str, category: &str) -> Result<SingleSummary, ApiError> {
        self.fetch_as(&format!(
            "/storage/summaries/{}/{}",
            encode_segment(date),
            encode_segment(category)
        ))
    }

    /// `GET /storage/index`: opaque index structure, shown verbatim.
    pub fn storage_index(&self) -> Result<Value, ApiError> {
        self.fetch("/storage/index")
    }

    /// `POST /storage/export-streamlit` with no body.
    ///
    /// Succeeds only on HTTP 200 and returns the decoded body.
    pub fn export(&self) -> Result<Value, ApiError> {
        let url = self.url("/storage/export-streamlit");
        let result = self
            .agent
            .post(&url)
            .call()
            .map_err(|e| map_ureq_error(&url, e))
            .and_then(|resp| require_ok(&url, resp))
            .and_then(|resp| decode_body(&url, resp));

        match &result {
            Ok(_) => self.activity.record("export", "export completed"),
            Err(e) => self.activity.record_failure("export", &e.to_string()),
        }
        result
    }

    /// `POST /storage/cleanup` with `{"daysToKeep": days_to_keep}`.
    ///
    /// Only the status code is interpreted; HTTP 200 is success.
    pub fn cleanup(&self, days_to_keep: u32) -> Result<(), ApiError> {
        let url = self.url("/storage/cleanup");
        let result = self
            .agent
            .post(&url)
            .send_json(CleanupRequest { days_to_keep })
            .map_err(|e| map_ureq_error(&url, e))
            .and_then(|resp| require_ok(&url, resp))
            .map(|_| ());

        match &result {
            Ok(()) => self
                .activity
                .record("cleanup", &format!("kept last {days_to_keep} days")),
            Err(e) => self.activity.record_failure("cleanup", &e.to_string()),
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn map_ureq_error(url: &str, error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Status(status, _) => ApiError::Status {
            url: url.to_string(),
            status,
        },
        ureq::Error::Transport(t) => ApiError::Transport {
            url: url.to_string(),
            message: t.to_string(),
        },
    }
}

/// Treat any status other than 200 (e.g. 201, 204) as a failure.
fn require_ok(url: &str, resp: ureq::Response) -> Result<ureq::Response, ApiError> {
    if resp.status() == 200 {
        Ok(resp)
    } else {
        Err(ApiError::Status {
            url: url.to_string(),
            status: resp.status(),
        })
    }
}

fn decode_body<T: DeserializeOwned>(url: &str, resp: ureq::Response) -> Result<T, ApiError> {
    let body = resp.into_string().map_err(|e| ApiError::Transport {
        url: url.to_string(),
        message: format!("failed to read body: {e}"),
    })?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Percent-encode a single URL path segment (`/` and spaces included).
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_from_default_config() {
        let client = ApiClient::from_config(&ApiConfig::default(), ActivityLog::disabled());
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.url("/storage/index"),
            "http://localhost:5000/api/storage/index"
        );
    }

    #[test]
    fn client_strips_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:5000/api/".to_string(),
            timeout_ms: 500,
        };
        let client = ApiClient::from_config(&config, ActivityLog::disabled());
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn encode_segment_escapes_reserved() {
        assert_eq!(encode_segment("2024-01-02"), "2024-01-02");
        assert_eq!(encode_segment("tech stocks"), "tech%20stocks");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("科技"), "%E7%A7%91%E6%8A%80");
    }

    #[test]
    fn error_messages_name_the_url() {
        let e = ApiError::Status {
            url: "http://x/api/storage/index".into(),
            status: 404,
        };
        assert!(e.is_status());
        assert_eq!(e.to_string(), "http://x/api/storage/index returned HTTP 404");
    }
}
