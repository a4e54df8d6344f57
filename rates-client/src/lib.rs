//! # Rates Client
//!
//! reqwest adapter for the remote currency-rates API. Implements the
//! `RatesApi` port from `rates-types`.

use std::time::Duration;

use rates_types::{ApiError, ApiResponse, Endpoint, RatesApi, RatesQuery};
use reqwest::Client;

/// Default path suffixes, relative to the base URL.
pub const DEFAULT_LIVE_PATH: &str = "/live";
pub const DEFAULT_HISTORICAL_PATH: &str = "/historical";

/// Rates API client.
#[derive(Debug, Clone)]
pub struct RatesClient {
    base_url: String,
    live_path: String,
    historical_path: String,
    http: Client,
}

impl RatesClient {
    /// Creates a new client with the default endpoint paths.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            live_path: DEFAULT_LIVE_PATH.to_string(),
            historical_path: DEFAULT_HISTORICAL_PATH.to_string(),
            http: Client::new(),
        }
    }

    /// Overrides the path suffixes for both endpoints.
    pub fn with_paths(mut self, live: impl Into<String>, historical: impl Into<String>) -> Self {
        self.live_path = normalize_path(live.into());
        self.historical_path = normalize_path(historical.into());
        self
    }

    /// Rebuilds the underlying HTTP client with a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ApiError> {
        self.http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(self)
    }

    /// Full URL of an endpoint, without query string.
    pub fn url(&self, endpoint: Endpoint) -> String {
        let path = match endpoint {
            Endpoint::Live => &self.live_path,
            Endpoint::Historical => &self.historical_path,
        };
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl RatesApi for RatesClient {
    async fn fetch(&self, query: &RatesQuery) -> Result<ApiResponse, ApiError> {
        let url = self.url(query.endpoint);
        tracing::debug!(
            endpoint = %query.endpoint,
            apikey = %query.api_key.redacted(),
            source = ?query.source,
            currencies = ?query.currencies,
            date = ?query.date,
            "GET {}",
            url
        );

        let resp = self
            .http
            .get(&url)
            .query(&query.params())
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status().as_u16();
        let raw = resp
            .text()
            .await
            .map_err(|e| ApiError::Body(e.to_string()))?;
        tracing::debug!(status, bytes = raw.len(), "response from {}", url);

        Ok(ApiResponse::from_text(status, raw))
    }
}

fn classify(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(err.to_string())
    } else if err.is_builder() {
        ApiError::InvalidUrl(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

fn normalize_path(path: String) -> String {
    if path.is_empty() || path.starts_with('/') {
        path
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rates_types::ApiKey;

    #[test]
    fn test_client_creation() {
        let client = RatesClient::new("https://api.example.com/currency_data");
        assert_eq!(client.base_url, "https://api.example.com/currency_data");
        assert_eq!(
            client.url(Endpoint::Live),
            "https://api.example.com/currency_data/live"
        );
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = RatesClient::new("http://localhost:3000/");
        assert_eq!(
            client.url(Endpoint::Historical),
            "http://localhost:3000/historical"
        );
    }

    #[test]
    fn test_client_with_custom_paths() {
        let client = RatesClient::new("http://localhost:3000").with_paths("v2/live", "/v2/hist");
        assert_eq!(client.url(Endpoint::Live), "http://localhost:3000/v2/live");
        assert_eq!(
            client.url(Endpoint::Historical),
            "http://localhost:3000/v2/hist"
        );
    }

    #[test]
    fn test_client_with_timeout() {
        let client = RatesClient::new("http://localhost:3000").with_timeout(Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let client = RatesClient::new("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2))
            .unwrap();
        let query = RatesQuery::new(Endpoint::Live, ApiKey::new("k"));
        let err = client.fetch(&query).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Transport(_) | ApiError::Timeout(_)
        ));
    }
}
