// src/report.rs
// =============================================================================
// Prints the results of a crawl.
//
// Two formats:
// - text (default): the top N unigrams, a blank line, the top N bigrams,
//   one "<ngram> <count>" per line
// - JSON (--json): the same lists plus the crawl summary
//
// Entries are ordered by descending count. Equal counts keep the order in
// which the n-gram was first counted during the crawl.
// =============================================================================

use std::fmt::{self, Write};

use anyhow::Result;
use serde::Serialize;

use crate::crawl::CrawlReport;
use crate::ngram::{FrequencyCounter, NgramCounts};

pub const DEFAULT_NUM_ENTRIES: usize = 10;

/// One line of the report
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NgramEntry<'a> {
    pub ngram: &'a str,
    pub count: u64,
}

/// Machine-readable report
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub unigrams: Vec<NgramEntry<'a>>,
    pub bigrams: Vec<NgramEntry<'a>>,
    pub summary: &'a CrawlReport,
}

fn top_entries(counter: &FrequencyCounter, limit: usize) -> Vec<NgramEntry<'_>> {
    counter
        .most_common(limit)
        .into_iter()
        .map(|(ngram, count)| NgramEntry { ngram, count })
        .collect()
}

pub fn json_report(report: &CrawlReport, limit: usize) -> JsonReport<'_> {
    JsonReport {
        unigrams: top_entries(&report.counts.unigrams, limit),
        bigrams: top_entries(&report.counts.bigrams, limit),
        summary: report,
    }
}

pub fn render_text(counts: &NgramCounts, limit: usize) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "List Unigrams:")?;
    for (unigram, count) in counts.unigrams.most_common(limit) {
        writeln!(out, "{} {}", unigram, count)?;
    }

    writeln!(out)?;

    writeln!(out, "List Bigrams:")?;
    for (bigram, count) in counts.bigrams.most_common(limit) {
        writeln!(out, "{} {}", bigram, count)?;
    }

    Ok(out)
}

/// Prints the top `limit` entries to stdout, as text or JSON
pub fn print_report(report: &CrawlReport, limit: usize, json: bool) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(&json_report(report, limit))?;
        println!("{}", output);
    } else {
        print!("{}", render_text(&report.counts, limit)?);
    }
    Ok(())
}
