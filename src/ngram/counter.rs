// src/ngram/counter.rs
// =============================================================================
// Frequency aggregation.
//
// FrequencyCounter remembers the order in which n-grams were first seen
// (IndexMap), so that when two n-grams have the same count, most_common()
// lists the one discovered first. Counts only ever go up.
// =============================================================================

use indexmap::IndexMap;

/// Maps an n-gram to how many times it occurred
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyCounter {
    counts: IndexMap<String, u64>,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `ngram`
    pub fn add(&mut self, ngram: impl Into<String>) {
        self.add_count(ngram, 1);
    }

    pub fn add_count(&mut self, ngram: impl Into<String>, count: u64) {
        *self.counts.entry(ngram.into()).or_insert(0) += count;
    }

    /// Adds every count of `other` into `self`
    pub fn merge(&mut self, other: FrequencyCounter) {
        for (ngram, count) in other.counts {
            self.add_count(ngram, count);
        }
    }

    pub fn get(&self, ngram: &str) -> u64 {
        self.counts.get(ngram).copied().unwrap_or(0)
    }

    /// Number of distinct n-grams
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(ngram, count)| (ngram.as_str(), *count))
    }

    /// The `limit` most frequent n-grams, highest count first
    ///
    /// Ties keep first-seen order: sort_by is stable and the map iterates in
    /// insertion order.
    pub fn most_common(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(limit);
        entries
    }
}

impl<S: Into<String>> FromIterator<S> for FrequencyCounter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counter = FrequencyCounter::new();
        counter.extend(iter);
        counter
    }
}

impl<S: Into<String>> Extend<S> for FrequencyCounter {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for ngram in iter {
            self.add(ngram);
        }
    }
}

/// Unigram and bigram counts, for one page or for a whole crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NgramCounts {
    pub unigrams: FrequencyCounter,
    pub bigrams: FrequencyCounter,
}

impl NgramCounts {
    pub fn merge(&mut self, other: NgramCounts) {
        self.unigrams.merge(other.unigrams);
        self.bigrams.merge(other.bigrams);
    }

    pub fn is_empty(&self) -> bool {
        self.unigrams.is_empty() && self.bigrams.is_empty()
    }
}
