// src/parse/mod.rs
// =============================================================================
// This module turns raw page bytes into something the crawler can use:
// - the set of links that stay on the same host
// - the text of the page, one segment per text node, with the tag around it
//
// Submodules:
// - links: same-host link filtering
// - html: HTML parsing with scraper
// =============================================================================

mod html;
mod links;

pub use html::{HtmlParser, ParsedPage, TextSegment};
pub use links::{host_of, page_host, same_host_links};
