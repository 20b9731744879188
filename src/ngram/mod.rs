// src/ngram/mod.rs
// =============================================================================
// Word statistics.
//
// Submodules:
// - counter: FrequencyCounter, the n-gram -> count map, and NgramCounts,
//   the unigram/bigram pair the crawler accumulates
// - extract: turns a page's text segments into NgramCounts
// =============================================================================

mod counter;
mod extract;

pub use counter::{FrequencyCounter, NgramCounts};
pub use extract::{extract_ngrams, generate_ngrams, IGNORED_TAGS};
