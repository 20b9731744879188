// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so stdout only carries the report)
// 3. Crawl the site
// 4. Print the top unigrams and bigrams
// 5. Exit with proper code (0 = success, 2 = error)
//
// Rust concepts used:
// - async/await: pages are fetched over the network, possibly many at once
// - Result<T, E>: every step that can fail returns a Result
// - The ? operator: return early with the error if a step fails
// =============================================================================

// Module declarations - only the CLI lives in the binary,
// everything else comes from the ngram_crawler library (src/lib.rs)
mod cli;

use std::time::Duration;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator, plus add context
use anyhow::{Context, Result};
use clap::Parser;  // Parser trait enables the parse() method
use tracing_subscriber::EnvFilter;

use cli::Cli;
use ngram_crawler::crawl::{CrawlConfig, Crawler};
use ngram_crawler::fetch::{FetcherConfig, HttpFetcher};
use ngram_crawler::report;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and turn the outcome into an exit code
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole chain: "could not crawl X: seed URL must not be empty"
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(()) = crawl finished and the report was printed
//   Err    = bad arguments or the HTTP client couldn't be built
//
// Note that pages failing to load are NOT errors here: the crawler logs
// them and carries on, and the report shows whatever was fetched.
async fn run() -> Result<()> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();
    init_logging(cli.log_level);

    // Validate depth/workers before touching the network
    let config = CrawlConfig::new(cli.depth, cli.num_workers)?;

    // One HTTP client for the whole crawl (connection pooling)
    let fetcher = HttpFetcher::new(&FetcherConfig {
        timeout: Duration::from_secs(cli.timeout),
        ..FetcherConfig::default()
    })?;

    let report = Crawler::new(fetcher, config)
        .crawl(&cli.url)
        .await
        .with_context(|| format!("could not crawl {}", cli.url))?;

    // Print results to stdout, as text or JSON
    report::print_report(&report, cli.num_top_entries, cli.json)
}

// Sets up logging to stderr
//
// RUST_LOG wins when set; otherwise -l / -ll raise our own crate's level:
//   (none) = warnings only (failed pages)
//   -l     = info (progress per level, final summary)
//   -ll    = debug (every page visited)
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // Other crates (reqwest, hyper...) stay at warn so -ll isn't flooded
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,ngram_crawler={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why log to stderr?
//    - stdout carries the report, so it can be piped or redirected
//    - Logs on stderr never end up mixed into the JSON output
//
// 2. What is EnvFilter?
//    - It decides which log lines are shown, per crate and per level
//    - "warn,ngram_crawler=debug" = warnings from everyone, debug from us
//
// 3. Why std::process::exit instead of returning from main?
//    - It lets us choose the exact exit code for scripts and CI
// -----------------------------------------------------------------------------
