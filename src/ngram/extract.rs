// src/ngram/extract.rs
// =============================================================================
// N-gram extraction.
//
// For every text segment that isn't inside a script/style-like tag:
// 1. trim it and split on whitespace into words
// 2. count every word (unigram)
// 3. count every adjacent pair joined by one space (bigram)
//
// Example: "the quick fox" -> unigrams: the, quick, fox
//                             bigrams:  "the quick", "quick fox"
// =============================================================================

use crate::parse::TextSegment;

use super::NgramCounts;

/// Tags whose text is code or styling, not prose
pub const IGNORED_TAGS: [&str; 4] = ["script", "noscript", "css", "style"];

/// All runs of `n` consecutive words, joined with a single space
///
/// Fewer than `n` words (or `n == 0`) gives an empty list.
pub fn generate_ngrams(words: &[&str], n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    words.windows(n).map(|window| window.join(" ")).collect()
}

/// Counts unigrams and bigrams over one page's text segments
pub fn extract_ngrams<'a, I>(segments: I) -> NgramCounts
where
    I: IntoIterator<Item = TextSegment<'a>>,
{
    let mut counts = NgramCounts::default();

    for segment in segments {
        if IGNORED_TAGS.iter().any(|tag| *tag == segment.tag) {
            continue;
        }

        let words: Vec<&str> = segment.text.split_whitespace().collect();
        counts.unigrams.extend(generate_ngrams(&words, 1));
        counts.bigrams.extend(generate_ngrams(&words, 2));
    }

    counts
}
