//! HTTP client for catalog page retrieval
//!
//! One bounded-timeout GET per call, classified into a `FetchOutcome`.
//! Retrying and pacing are decided by the harvest loop, never here.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::constants::harvest::DEFAULT_TIMEOUT_SECONDS;

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub follow_redirects: bool,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub use_system_proxy: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("catalog-harvest/{}", env!("CARGO_PKG_VERSION")),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            follow_redirects: true,
            use_system_proxy: true,
        }
    }
}

/// Classified result of one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Status 200 with the response body
    Success(String),
    /// The server answered with any status other than 200
    HttpError(u16),
    /// Connection, timeout, or body read failure
    TransportError(String),
}

/// Performs exactly one retrieval attempt per call
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// reqwest-backed page fetcher
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );

        let mut builder = Client::builder();
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .gzip(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        debug!("🌐 HTTP GET: {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::TransportError(e.to_string()),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return FetchOutcome::HttpError(status.as_u16());
        }

        match response.text().await {
            Ok(body) => {
                debug!("Fetched {} ({} chars)", url, body.len());
                FetchOutcome::Success(body)
            }
            Err(e) => FetchOutcome::TransportError(format!("Failed to read response body: {e}")),
        }
    }
}
