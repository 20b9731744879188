// src/parse/links.rs
// =============================================================================
// Same-host link filtering.
//
// A link's "host" here is its network location exactly as it is written in
// the link: everything between "//" and the next "/", "?" or "#".
//
//   "http://127.0.0.1:8000/a?b"  -> "127.0.0.1:8000"
//   "http://user@a.com/x"        -> "user@a.com"
//   "//a.com/x"                  -> "a.com"   (protocol-relative)
//   "/about"                     -> ""        (relative, no host at all)
//
// Nothing is normalized: "WWW.A.COM", "a.com:80" and "a.com" are three
// different hosts. Links are kept verbatim too, so "http://a.com/x" and
// "http://a.com/x/" are two different links.
//
// Rust concepts:
// - &str slicing: host_of returns a slice of its input, no allocation
// - Iterator adapters: flatten() drops the None (href-less) anchors
// =============================================================================

use std::collections::HashSet;

use url::Url;

use crate::error::ParseError;

/// Network location of `link` as written ("" when it has none)
pub fn host_of(link: &str) -> &str {
    // Drop a leading "scheme:" if there is one
    let rest = match link.find(':') {
        Some(i) if is_scheme(&link[..i]) => &link[i + 1..],
        _ => link,
    };

    // Only "//" introduces a network location
    let Some(rest) = rest.strip_prefix("//") else {
        return "";
    };

    match rest.find(|c: char| matches!(c, '/' | '?' | '#')) {
        Some(end) => &rest[..end],
        None => rest,
    }
}

/// Host of the page being parsed; a page without one can't own any links
pub fn page_host(url: &str) -> Result<String, ParseError> {
    // The page itself has to be a real absolute URL
    Url::parse(url).map_err(|e| ParseError::InvalidUrl(format!("{}: {}", url, e)))?;

    let host = host_of(url);
    if host.is_empty() {
        return Err(ParseError::MissingHost(url.to_string()));
    }
    Ok(host.to_string())
}

/// Keeps the hrefs whose host equals `current_host`
///
/// `None` stands for an anchor without an href attribute and is skipped.
pub fn same_host_links<'a, I>(hrefs: I, current_host: &str) -> HashSet<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    hrefs
        .into_iter()
        .flatten()
        .filter(|href| host_of(href) == current_host)
        .map(str::to_string)
        .collect()
}

// A scheme starts with a letter, then letters, digits, '+', '-' or '.'
fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
