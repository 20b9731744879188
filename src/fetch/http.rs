// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP with reqwest.
//
// Key functionality:
// - One shared Client for the whole crawl (connection pooling)
// - A per-request timeout
// - Non-2xx responses are failures, not pages
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::PageFetcher;
use crate::error::{CrawlError, FetchError};

/// Settings for the HTTP client
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: format!("ngram-crawler/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// PageFetcher backed by a reqwest Client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(CrawlError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
