//! Shared HTTP plumbing for the Rehability backend.

use rehab_core::RehabError;
use rehab_core::config::RehabConfig;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Error body returned by the backend on 4xx/5xx.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// A configured client for one backend base URL.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client for `base_url` with an optional session cookie.
    pub fn new(
        base_url: impl Into<String>,
        session_cookie: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, RehabError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| RehabError::config(format!("Invalid session cookie: {e}")))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RehabError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the application configuration.
    pub fn from_config(config: &RehabConfig) -> Result<Self, RehabError> {
        Self::new(
            config.classifier_url.clone(),
            config.session_cookie.as_deref(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }
}

/// A transport-level or status-level failure, before it is mapped to a
/// collaborator-specific `RehabError`.
#[derive(Debug)]
pub(crate) struct RequestFailure {
    pub message: String,
    pub retryable: bool,
}

impl RequestFailure {
    pub fn from_transport(context: &str, err: reqwest::Error) -> Self {
        Self {
            message: format!("{context} request failed: {err}"),
            retryable: err.is_connect() || err.is_timeout(),
        }
    }

    pub fn into_classifier_error(self) -> RehabError {
        RehabError::classifier(self.message, self.retryable)
    }

    pub fn into_persistence_error(self) -> RehabError {
        RehabError::persistence(self.message)
    }
}

/// Passes through successful responses and turns error statuses into a
/// `RequestFailure`, using the backend's `{"error": ...}` body when present.
pub(crate) async fn check_status(
    context: &str,
    response: Response,
) -> Result<Response, RequestFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);

    let message = if status == StatusCode::UNAUTHORIZED {
        format!("{context} rejected: unauthorized (set session_cookie in config)")
    } else {
        format!("{context} failed with {status}: {detail}")
    };

    Err(RequestFailure {
        message,
        retryable: status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = BackendClient::new("http://127.0.0.1:5000/", None, Duration::from_secs(1))
            .unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
        assert_eq!(client.url("/analyze"), "http://127.0.0.1:5000/analyze");
        assert_eq!(client.url("api/progress"), "http://127.0.0.1:5000/api/progress");
    }

    #[test]
    fn test_invalid_cookie_is_config_error() {
        let err = BackendClient::new("http://x", Some("bad\ncookie"), Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(matches!(err, RehabError::Config(_)));
    }

    #[test]
    fn test_from_config() {
        let config = RehabConfig {
            classifier_url: "https://rehab.example".to_string(),
            session_cookie: Some("session=abc".to_string()),
            ..RehabConfig::default()
        };
        let client = BackendClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://rehab.example");
    }
}
