//! Trove API client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;

use super::{ContributorApi, ContributorHarvest, RetryPolicy};
use crate::config::Config;
use crate::error::{FetchError, Result};

/// Contributor listing endpoint, relative to the API host
const CONTRIBUTOR_PATH: &str = "/v3/contributor";

/// Header carrying the API key
const API_KEY_HEADER: &str = "X-API-KEY";

/// Fallback wait when a 429 carries no usable retry-after header
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Trove API client
pub struct TroveClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl TroveClient {
    /// Create a new Trove API client
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("trove-contributors/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            retry,
        })
    }

    /// Create a client from resolved configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.validate_auth()?;
        Self::new(
            api_key,
            config.api_host(),
            config.timeout(),
            RetryPolicy::from(&config.retry),
        )
    }

    fn contributor_url(&self) -> String {
        format!("{}{}", self.base_url, CONTRIBUTOR_PATH)
    }

    /// Single GET of the contributor listing, without retries
    async fn fetch_once(&self, attempt: u32) -> std::result::Result<Value, FetchError> {
        let url = self.contributor_url();
        debug!("GET {} (attempt {})", url, attempt);

        let response = self
            .http
            .get(&url)
            .query(&[("encoding", "json"), ("reclevel", "full")])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(FetchError::from)?;

        let status = response.status();
        debug!("Response status: {}", status);

        match status {
            status if status.is_success() => response.json::<Value>().await.map_err(|e| {
                if e.is_decode() {
                    FetchError::InvalidResponse(format!("Failed to parse response: {}", e))
                } else {
                    FetchError::from(e)
                }
            }),
            StatusCode::UNAUTHORIZED => Err(FetchError::Unauthorized),
            StatusCode::FORBIDDEN => Err(FetchError::Forbidden),
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(url)),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                Err(FetchError::RateLimit(Duration::from_secs(retry_after)))
            }
            status if status.is_server_error() => {
                let body = response.text().await.unwrap_or_default();
                Err(FetchError::ServerError(format!("{} {}", status, body.trim())))
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(FetchError::InvalidResponse(format!(
                    "Unexpected status code {}: {}",
                    status,
                    body.trim()
                )))
            }
        }
    }
}

#[async_trait]
impl ContributorApi for TroveClient {
    async fn fetch_contributors(&self) -> Result<ContributorHarvest> {
        let raw = self.retry.run(|attempt| self.fetch_once(attempt)).await?;
        ContributorHarvest::from_raw(raw)
    }
}
