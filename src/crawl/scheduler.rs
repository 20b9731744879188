// src/crawl/scheduler.rs
// =============================================================================
// This module implements the crawl as a level-by-level breadth-first search.
//
// How it works:
// 1. Fetch the seed page. Its same-host links become the frontier.
// 2. For each level up to max_depth:
//    a. visit every frontier URL (one at a time, or up to `workers` at once)
//    b. wait for ALL of them to finish (this is the barrier between levels)
//    c. merge every page's n-grams into the running totals
//    d. the next frontier is every link found this level that was neither
//       visited before nor part of this level
// 3. Return the totals.
//
// Every URL is fetched at most once. A page that fails to fetch or parse is
// still marked visited; it just contributes nothing.
//
// All merging happens here, on the scheduler, after the level's futures
// have completed. Workers never touch the totals, so no locks are needed.
//
// Rust concepts:
// - Generics: Crawler<F> works with any PageFetcher (real HTTP or a fake)
// - Result<T, E>: each page visit returns Ok(stats) or Err(why it failed)
// - Streams: buffer_unordered runs a bounded number of visits at once
// - HashSet: visited URLs and the frontier (O(1) membership checks)
// =============================================================================

use std::collections::HashSet;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};  // StreamExt gives us .buffer_unordered()
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{CrawlError, PageError};
use crate::fetch::PageFetcher;
use crate::ngram::{extract_ngrams, NgramCounts};
use crate::parse::{page_host, HtmlParser};

pub const DEFAULT_MAX_DEPTH: usize = 4;

// Settings for one crawl run
//
// max_depth: how many levels to crawl (1 = only the seed page)
// workers:   0 or 1 = one page at a time, more = up to that many at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlConfig {
    pub max_depth: usize,
    pub workers: usize,
}

impl CrawlConfig {
    // Validates the settings before anything is fetched
    //
    // A depth of 0 would mean "don't even fetch the seed", which makes no
    // sense, so it's rejected here instead of silently returning nothing.
    pub fn new(max_depth: usize, workers: usize) -> Result<Self, CrawlError> {
        if max_depth == 0 {
            return Err(CrawlError::InvalidDepth(max_depth));
        }
        Ok(Self { max_depth, workers })
    }

    // Picks how a level's pages are visited
    fn execution(&self) -> Execution {
        if self.workers > 1 {
            Execution::Pool(self.workers)
        } else {
            Execution::Sequential
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            workers: 0,
        }
    }
}

// The two ways of working through a level
#[derive(Debug, Clone, Copy)]
enum Execution {
    /// One page after the other
    Sequential,
    /// Up to N pages in flight at once
    Pool(usize),
}

// What one successfully visited page contributes
#[derive(Debug, Default)]
struct PageStats {
    counts: NgramCounts,
    links: HashSet<String>,
}

// Every visit ends in one of these: Ok(stats) or Err(fetch/parse error)
type PageOutcome = Result<PageStats, PageError>;

/// Everything a finished crawl produced
///
/// Only the summary numbers are serialized; the counters and the visited
/// set are printed separately by the report module.
#[derive(Debug, Default, Serialize)]
pub struct CrawlReport {
    #[serde(skip)]
    pub counts: NgramCounts,
    #[serde(skip)]
    pub visited: HashSet<String>,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    /// Levels actually run, the seed level included
    pub levels: usize,
    #[serde(serialize_with = "as_secs")]
    pub elapsed: Duration,
}

// Writes a Duration as fractional seconds (1.5 instead of {secs, nanos})
fn as_secs<S: serde::Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

impl CrawlReport {
    // Folds one page's outcome in and returns the links it found
    //
    // The URL is marked visited whether or not the page succeeded, so a
    // broken page is never retried later in the crawl.
    fn record(&mut self, url: String, outcome: PageOutcome) -> HashSet<String> {
        let links = match outcome {
            Ok(page) => {
                if page.counts.is_empty() {
                    debug!(url = %url, "page has no countable text");
                }
                self.pages_fetched += 1;
                // Counter addition: the order pages are merged in doesn't matter
                self.counts.merge(page.counts);
                page.links
            }
            Err(e) => {
                // A failed page is logged and skipped, never fatal
                warn!(url = %url, error = %e, "error while traversing link");
                self.pages_failed += 1;
                HashSet::new()
            }
        };
        self.visited.insert(url);
        links
    }
}

/// Breadth-first crawler over a single host
pub struct Crawler<F> {
    fetcher: F,
    parser: HtmlParser,
    config: CrawlConfig,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            parser: HtmlParser::new(),
            config,
        }
    }

    /// Crawls from `seed` and returns the aggregated n-gram counts
    ///
    /// Only invalid input is an error; failed pages are logged and skipped.
    pub async fn crawl(&self, seed: &str) -> Result<CrawlReport, CrawlError> {
        if seed.is_empty() {
            return Err(CrawlError::EmptySeed);
        }

        let started = Instant::now();
        info!(
            seed,
            max_depth = self.config.max_depth,
            workers = self.config.workers,
            "exploring site"
        );

        let mut report = CrawlReport::default();

        // Level 1: the seed page on its own
        let seed_outcome = self.visit_page(seed).await;
        let mut frontier = report.record(seed.to_string(), seed_outcome);
        // A page linking back to the seed must not fetch it again
        frontier.retain(|link| !report.visited.contains(link));
        report.levels = 1;

        let mut depth = 1;
        while depth < self.config.max_depth {
            // Nothing new to visit: later levels would do no work either
            if frontier.is_empty() {
                debug!(depth, "frontier is empty, nothing left to visit");
                break;
            }

            // std::mem::take moves the frontier out and leaves an empty set
            let to_visit = std::mem::take(&mut frontier);
            let outcomes = self.visit_level(&to_visit).await;

            // Every outcome of this level is in hand: merge, then dedup
            // against the complete visited set.
            let mut next = HashSet::new();
            for (url, outcome) in outcomes {
                next.extend(report.record(url, outcome));
            }
            // Drop links to pages already fetched, including pages of this
            // same level that link to each other
            next.retain(|link| !to_visit.contains(link) && !report.visited.contains(link));

            frontier = next;
            depth += 1;
            report.levels = depth;
            info!(found = frontier.len(), depth, "found links at depth");
        }

        report.elapsed = started.elapsed();
        info!(
            pages_fetched = report.pages_fetched,
            pages_failed = report.pages_failed,
            words = report.counts.unigrams.total(),
            unigrams = report.counts.unigrams.len(),
            bigrams = report.counts.bigrams.len(),
            elapsed = ?report.elapsed,
            "crawl finished"
        );

        Ok(report)
    }

    // Visits all `urls` and returns only once every one of them is done
    //
    // Returning a Vec (instead of merging as pages complete) is what makes
    // this a barrier: the caller can't start the next level early.
    async fn visit_level(&self, urls: &HashSet<String>) -> Vec<(String, PageOutcome)> {
        match self.config.execution() {
            Execution::Sequential => {
                let mut outcomes = Vec::with_capacity(urls.len());
                for url in urls {
                    outcomes.push((url.clone(), self.visit_page(url).await));
                }
                outcomes
            }
            Execution::Pool(workers) => {
                // Turn the URLs into a stream of visit futures and run at
                // most `workers` of them at once. Results come back in
                // completion order ("unordered"), which is fine because
                // merging is order-independent.
                stream::iter(urls)
                    .map(|url| async move { (url.clone(), self.visit_page(url).await) })
                    .buffer_unordered(workers)
                    .collect()
                    .await
            }
        }
    }

    // Fetch + parse + extract for one URL
    //
    // Each `?` turns a FetchError or ParseError into a PageError and returns
    // early; the caller decides what a failure means (log and skip).
    async fn visit_page(&self, url: &str) -> PageOutcome {
        debug!(url, "traversing link");

        let host = page_host(url)?;
        // The only await: everything after it is plain CPU work
        let raw = self.fetcher.fetch(url).await?;
        let page = self.parser.parse(&raw, &host)?;
        let counts = extract_ngrams(page.text_segments());

        Ok(PageStats {
            counts,
            links: page.links,
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a barrier between levels?
//    - The next frontier must not contain pages that were already visited
//    - "Already visited" is only fully known once the whole level is done
//    - So each level is collected completely before any link is followed
//
// 2. What does buffer_unordered(n) guarantee?
//    - At most n futures from the stream are polled at the same time
//    - New ones start only as old ones finish
//    - A frontier of 10,000 URLs still means at most n requests in flight
//
// 3. Why no Mutex around the counters?
//    - Workers return their counts as values instead of writing shared state
//    - Only crawl() mutates the report, so there is a single writer
//
// 4. Why is a failed page still "visited"?
//    - Otherwise every other page linking to it would trigger a new fetch
//    - A URL is fetched at most once per run, success or not
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::{FetcherConfig, HttpFetcher};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const A: &str = "http://site.test/a";
    const B: &str = "http://site.test/b";
    const C: &str = "http://site.test/c";
    const D: &str = "http://site.test/d";

    /// In-memory website that remembers how often each page was fetched
    #[derive(Default)]
    struct FakeSite {
        pages: HashMap<String, Vec<u8>>,
        hits: Mutex<HashMap<String, usize>>,
    }

    impl FakeSite {
        fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.as_bytes().to_vec());
            self
        }

        fn raw_page(mut self, url: &str, body: &[u8]) -> Self {
            self.pages.insert(url.to_string(), body.to_vec());
            self
        }

        fn hits(&self, url: &str) -> usize {
            self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
        }

        fn total_hits(&self) -> usize {
            self.hits.lock().unwrap().values().sum()
        }
    }

    #[async_trait]
    impl PageFetcher for FakeSite {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            *self.hits.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
            tokio::task::yield_now().await;
            self.pages.get(url).cloned().ok_or(FetchError::Status(404))
        }
    }

    #[async_trait]
    impl<'a> PageFetcher for &'a FakeSite {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            (**self).fetch(url).await
        }
    }

    fn html(text: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|link| format!(r#"<a href="{}">link</a>"#, link))
            .collect();
        format!("<html><body><p>{}</p>{}</body></html>", text, anchors)
    }

    /// A -> B, C; B -> A; C -> nothing
    fn three_page_site() -> FakeSite {
        FakeSite::default()
            .page(A, &html("alpha page", &[B, C]))
            .page(B, &html("beta page", &[A]))
            .page(C, &html("gamma page", &[]))
    }

    fn expected_counts(site: &FakeSite, urls: &[&str]) -> NgramCounts {
        let parser = HtmlParser::new();
        let mut expected = NgramCounts::default();
        for url in urls {
            let page = parser.parse(&site.pages[*url], "site.test").unwrap();
            expected.merge(extract_ngrams(page.text_segments()));
        }
        expected
    }

    async fn crawl(site: &FakeSite, max_depth: usize, workers: usize) -> CrawlReport {
        let config = CrawlConfig::new(max_depth, workers).unwrap();
        Crawler::new(site, config).crawl(A).await.unwrap()
    }

    #[tokio::test]
    async fn test_depth_one_fetches_only_seed() {
        let site = three_page_site();
        let report = crawl(&site, 1, 0).await;

        assert_eq!(site.total_hits(), 1);
        assert_eq!(site.hits(A), 1);
        assert_eq!(report.levels, 1);
        assert_eq!(report.visited, HashSet::from([A.to_string()]));
        assert_eq!(report.counts, expected_counts(&site, &[A]));
    }

    #[tokio::test]
    async fn test_three_page_graph_visits_each_once() {
        let site = three_page_site();
        let report = crawl(&site, 4, 0).await;

        for url in [A, B, C] {
            assert_eq!(site.hits(url), 1, "{} fetched more than once", url);
        }
        assert_eq!(site.total_hits(), 3);
        assert_eq!(
            report.visited,
            HashSet::from([A.to_string(), B.to_string(), C.to_string()])
        );
        assert_eq!(report.pages_fetched, 3);
        assert_eq!(report.pages_failed, 0);
        assert_eq!(report.counts, expected_counts(&site, &[A, B, C]));
        assert_eq!(report.counts.unigrams.get("page"), 3);
        assert_eq!(report.counts.bigrams.get("beta page"), 1);
    }

    #[tokio::test]
    async fn test_depth_limits_levels() {
        // A -> B -> C -> D, a chain
        let site = FakeSite::default()
            .page(A, &html("one", &[B]))
            .page(B, &html("two", &[C]))
            .page(C, &html("three", &[D]))
            .page(D, &html("four", &[]));

        let report = crawl(&site, 3, 0).await;

        assert_eq!(report.levels, 3);
        assert_eq!(site.hits(C), 1);
        assert_eq!(site.hits(D), 0);
        assert_eq!(report.counts.unigrams.get("four"), 0);
    }

    #[tokio::test]
    async fn test_cycles_are_not_refetched() {
        let site = FakeSite::default()
            .page(A, &html("a", &[A, B]))
            .page(B, &html("b", &[A, B, C]))
            .page(C, &html("c", &[A, B, C]));

        crawl(&site, 10, 0).await;

        assert_eq!(site.hits(A), 1);
        assert_eq!(site.hits(B), 1);
        assert_eq!(site.hits(C), 1);
    }

    #[tokio::test]
    async fn test_same_level_cross_links_pruned() {
        // B and C link to each other and are both on level 2
        let site = FakeSite::default()
            .page(A, &html("root", &[B, C]))
            .page(B, &html("b", &[C]))
            .page(C, &html("c", &[B]));

        let report = crawl(&site, 4, 0).await;

        assert_eq!(site.hits(B), 1);
        assert_eq!(site.hits(C), 1);
        assert_eq!(report.levels, 2);
    }

    #[tokio::test]
    async fn test_failed_page_is_skipped() {
        // D is linked but missing, C is not valid UTF-8
        let site = FakeSite::default()
            .page(A, &html("root", &[B, C, D]))
            .page(B, &html("fine words", &[]))
            .raw_page(C, &[0xff, 0xfe, 0xfd]);

        let report = crawl(&site, 2, 0).await;

        assert_eq!(report.pages_fetched, 2);
        assert_eq!(report.pages_failed, 2);
        assert!(report.visited.contains(D));
        assert!(report.visited.contains(C));
        assert_eq!(report.counts, expected_counts(&site, &[A, B]));
    }

    #[tokio::test]
    async fn test_failed_seed_gives_empty_report() {
        let site = FakeSite::default();
        let report = crawl(&site, 4, 0).await;

        assert_eq!(site.hits(A), 1);
        assert!(report.counts.is_empty());
        assert_eq!(report.pages_failed, 1);
        assert_eq!(report.visited, HashSet::from([A.to_string()]));
    }

    #[tokio::test]
    async fn test_external_links_not_followed() {
        let site = FakeSite::default()
            .page(A, &html("root", &["http://other.test/x", B]))
            .page(B, &html("b", &[]));

        let report = crawl(&site, 4, 0).await;

        assert_eq!(site.hits("http://other.test/x"), 0);
        assert_eq!(report.visited.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let make_site = || {
            FakeSite::default()
                .page(A, &html("the root page", &[B, C, D]))
                .page(B, &html("the b page", &[A, C, "http://site.test/e"]))
                .page(C, &html("the c page", &[D, "http://site.test/f"]))
                .page(D, &html("the d page", &[B]))
                .page("http://site.test/e", &html("the e page", &["http://site.test/f"]))
                .page("http://site.test/f", &html("the f page", &[A]))
        };

        let sequential_site = make_site();
        let sequential = crawl(&sequential_site, 4, 0).await;

        for workers in [2, 3, 8] {
            let pooled_site = make_site();
            let pooled = crawl(&pooled_site, 4, workers).await;

            assert_eq!(pooled.counts, sequential.counts);
            assert_eq!(pooled.visited, sequential.visited);
            assert_eq!(pooled_site.total_hits(), sequential_site.total_hits());
        }
    }

    #[tokio::test]
    async fn test_single_worker_is_sequential() {
        let site = three_page_site();
        let report = crawl(&site, 4, 1).await;
        assert_eq!(report.pages_fetched, 3);
    }

    /// Site whose pages take a moment to load, tracking how many loads overlap
    #[derive(Default)]
    struct SlowSite {
        pages: HashMap<String, Vec<u8>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        fetched: AtomicUsize,
    }

    #[async_trait]
    impl<'a> PageFetcher for &'a SlowSite {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(10)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.fetched.fetch_add(1, Ordering::SeqCst);
            self.pages.get(url).cloned().ok_or(FetchError::Status(404))
        }
    }

    /// Seed page linking to `fanout` leaf pages
    fn wide_site(fanout: usize) -> SlowSite {
        let leaves: Vec<String> = (0..fanout)
            .map(|i| format!("http://site.test/leaf{}", i))
            .collect();
        let leaf_refs: Vec<&str> = leaves.iter().map(String::as_str).collect();

        let mut site = SlowSite::default();
        site.pages.insert(A.to_string(), html("hub", &leaf_refs).into_bytes());
        for leaf in &leaves {
            site.pages.insert(leaf.clone(), html("leaf", &[]).into_bytes());
        }
        site
    }

    #[tokio::test]
    async fn test_pool_never_exceeds_worker_count() {
        let site = wide_site(20);
        let config = CrawlConfig::new(2, 3).unwrap();

        let report = Crawler::new(&site, config).crawl(A).await.unwrap();

        let peak = site.peak.load(Ordering::SeqCst);
        assert_eq!(site.fetched.load(Ordering::SeqCst), 21);
        assert_eq!(report.pages_fetched, 21);
        assert!(peak <= 3, "{} fetches were in flight with 3 workers", peak);
        assert!(peak > 1, "pages were fetched one at a time with 3 workers");
    }

    #[tokio::test]
    async fn test_sequential_fetches_one_at_a_time() {
        let site = wide_site(5);
        let config = CrawlConfig::new(2, 0).unwrap();

        Crawler::new(&site, config).crawl(A).await.unwrap();

        assert_eq!(site.peak.load(Ordering::SeqCst), 1);
        assert_eq!(site.fetched.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_invalid_config() {
        assert!(matches!(
            CrawlConfig::new(0, 4),
            Err(CrawlError::InvalidDepth(0))
        ));

        let site = three_page_site();
        let crawler = Crawler::new(&site, CrawlConfig::default());
        assert!(matches!(crawler.crawl("").await, Err(CrawlError::EmptySeed)));
        assert_eq!(site.total_hits(), 0);
    }

    #[tokio::test]
    async fn test_crawl_over_http() {
        let server = MockServer::start().await;
        let base = server.uri();
        let a = format!("{}/", base);
        let b = format!("{}/b", base);
        let c = format!("{}/c", base);

        let pages = [
            ("/", html("home page text", &[b.as_str(), c.as_str()])),
            ("/b", html("second page text", &[a.as_str()])),
            ("/c", html("third page text", &[])),
        ];
        for (route, body) in pages {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_string(body))
                .expect(1)
                .mount(&server)
                .await;
        }

        let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();
        let crawler = Crawler::new(fetcher, CrawlConfig::new(4, 4).unwrap());
        let report = crawler.crawl(&a).await.unwrap();

        assert_eq!(report.visited, HashSet::from([a, b, c]));
        assert_eq!(report.counts.unigrams.get("text"), 3);
        assert_eq!(report.counts.bigrams.get("page text"), 3);
        assert_eq!(report.counts.bigrams.get("home page"), 1);
    }
}
