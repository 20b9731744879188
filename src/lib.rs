// src/lib.rs
// =============================================================================
// ngram-crawler: crawl one website and count its words and word pairs.
//
// Modules:
// - crawl: level-by-level crawl scheduler
// - fetch: downloads pages (PageFetcher trait, reqwest implementation)
// - parse: HTML parsing and same-host link filtering
// - ngram: n-gram extraction and frequency counters
// - report: text/JSON output of the top entries
// - error: error types
// =============================================================================

pub mod crawl;
pub mod error;
pub mod fetch;
pub mod ngram;
pub mod parse;
pub mod report;
