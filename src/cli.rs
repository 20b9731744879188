// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// ngram-crawler --url https://example.com [-d 4] [-n 10] [-w 8] [-l|-ll]
// =============================================================================

use clap::{ArgAction, Parser};

use ngram_crawler::crawl::DEFAULT_MAX_DEPTH;
use ngram_crawler::report::DEFAULT_NUM_ENTRIES;

#[derive(Parser, Debug)]
#[command(
    name = "ngram-crawler",
    version,
    about = "Crawl a website and list its most frequent words and word pairs",
    long_about = "ngram-crawler follows links on the same host as the starting URL, level by level, \
                  and counts every word (unigram) and pair of adjacent words (bigram) it reads."
)]
pub struct Cli {
    /// Base url to start looking for unigrams and bigrams
    #[arg(long)]
    pub url: String,

    /// Maximum depth to search for urls
    ///
    /// Depth 1 = just the starting page
    /// Depth 2 = starting page + all pages it links to
    #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub depth: usize,

    /// Total number of unigrams and bigrams to show
    #[arg(short, long, default_value_t = DEFAULT_NUM_ENTRIES)]
    pub num_top_entries: usize,

    /// Number of pages to fetch concurrently (0 = one at a time)
    #[arg(short = 'w', long, default_value_t = 0)]
    pub num_workers: usize,

    /// Set logging level, -l for info, -ll for debug
    #[arg(short = 'l', long, action = ArgAction::Count)]
    pub log_level: u8,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Output results in JSON format instead of plain text
    #[arg(long)]
    pub json: bool,
}
