// src/parse/html.rs
// =============================================================================
// This module parses HTML pages with the `scraper` crate.
//
// Parsing gives back a ParsedPage that owns the DOM. From it you get:
// - links: same-host hrefs of every <a> on the page
// - text_segments(): a lazy walk over the text nodes, each paired with the
//   name of the element it sits in ("div", "script", ...)
//
// The walk is lazy on purpose: nothing is copied out of the DOM until the
// n-gram extractor asks for the next segment.
//
// Rust concepts:
// - Lifetimes: TextSegment<'a> borrows text straight out of the DOM
// - impl Iterator: text_segments() returns an iterator without naming its type
// - match on enums: scraper's Node is Text, Element, Comment, ...
// =============================================================================

use std::collections::HashSet;

use scraper::{Html, Node, Selector};

use super::links::same_host_links;
use crate::error::ParseError;

/// One run of text and the tag it was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSegment<'a> {
    pub text: &'a str,
    /// Enclosing element name, "" for text directly under the document
    pub tag: &'a str,
}

/// A parsed page: its same-host links plus the DOM for text extraction
pub struct ParsedPage {
    pub links: HashSet<String>,
    document: Html,
}

impl ParsedPage {
    /// Walks every text node in document order
    pub fn text_segments(&self) -> impl Iterator<Item = TextSegment<'_>> + '_ {
        // descendants() walks the tree in document order
        self.document.tree.root().descendants().filter_map(|node| {
            // Only text nodes carry words, skip elements/comments/doctype
            let text = match node.value() {
                Node::Text(text) => &**text,
                _ => return None,
            };
            // The tag around the text, e.g. "script" for inline JS
            let tag = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .map(|element| element.name())
                .unwrap_or("");
            Some(TextSegment { text, tag })
        })
    }
}

/// Page parser backed by scraper/html5ever
pub struct HtmlParser {
    anchors: Selector,
}

impl HtmlParser {
    pub fn new() -> Self {
        Self {
            // Constant selector, known to be valid
            anchors: Selector::parse("a").expect("'a' is a valid selector"),
        }
    }

    /// Parses `raw` and keeps only links on `current_host`
    pub fn parse(&self, raw: &[u8], current_host: &str) -> Result<ParsedPage, ParseError> {
        // Bytes -> &str; a non-UTF-8 body becomes ParseError::Encoding via ?
        let html = std::str::from_utf8(raw)?;
        let document = Html::parse_document(html);

        // None for an <a> without href, filtered out by same_host_links
        let hrefs = document
            .select(&self.anchors)
            .map(|anchor| anchor.value().attr("href"));
        let links = same_host_links(hrefs, current_host);

        Ok(ParsedPage { links, document })
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}
