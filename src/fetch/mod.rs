// src/fetch/mod.rs
// =============================================================================
// This module downloads pages.
//
// The crawler only needs one capability from the network: "given a URL, give
// me the raw bytes or tell me why you couldn't". That capability is the
// PageFetcher trait, so the scheduler can be driven by the real HTTP client
// or by an in-memory site in tests.
//
// Submodules:
// - http: reqwest-backed implementation
// =============================================================================

mod http;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::{FetcherConfig, HttpFetcher};

/// Retrieves the raw content of a page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, failing on network errors and non-2xx responses
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
