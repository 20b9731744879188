// src/error.rs
// =============================================================================
// Error types shared by the fetcher, the parser and the crawl scheduler.
//
// Only two kinds of failure come from the outside world:
// - FetchError: the page could not be downloaded
// - ParseError: the downloaded bytes could not be turned into a page
//
// Both are caught per URL by the scheduler (see PageError) and never reach
// the caller of crawl(). CrawlError is for bad invocation settings only.
// =============================================================================

use thiserror::Error;

/// Network/HTTP failure for a single URL
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status code
    #[error("HTTP {0}")]
    Status(u16),

    /// The request took longer than the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Could not open a connection (DNS, refused, unreachable...)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other reqwest failure (invalid URL, body read error...)
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else {
            FetchError::Request(error)
        }
    }
}

/// Malformed page content
#[derive(Debug, Error)]
pub enum ParseError {
    /// Body is not valid UTF-8 text
    #[error("page is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The page URL is not an absolute URL
    #[error("invalid URL {0}")]
    InvalidUrl(String),

    /// The page URL has no host, so same-host links can't be selected
    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// Why one page contributed nothing to the crawl
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Invalid crawl settings, reported before any page is fetched
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("seed URL must not be empty")]
    EmptySeed,

    #[error("max depth must be at least 1 (got {0})")]
    InvalidDepth(usize),

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
