// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Level-by-level breadth-first crawling starting from a seed URL
// - Same-host restriction (doesn't crawl external sites)
// - Fixed depth limit
// - Sequential or bounded-concurrency fetching within a level
// - Word and word-pair counts aggregated over every visited page
// =============================================================================

mod scheduler;

pub use scheduler::{CrawlConfig, CrawlReport, Crawler, DEFAULT_MAX_DEPTH};
