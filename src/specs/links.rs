// src/specs/links.rs
//! Scraping *spec* for article links.
//!
//! Purpose:
//! - Read every `<a href=...>` of an article and keep the ones that point at
//!   another article: relative `/wiki/Title` links whose path has no
//!   namespace separator (`File:`, `Help:`, `Special:` ... are not articles).
//! - Turn them into canonical node identifiers: host + path, with any
//!   `#fragment` or `?query` dropped.
//!
//! Order is order of first appearance; repeats are collapsed here so the
//! search does less work, although its visited map would absorb them too.

use std::collections::HashSet;

use crate::config::consts::{ARTICLE_PREFIX, HOST, NAMESPACE_SEP};
use crate::core::Scanner;
use crate::core::html::attr;

/// Canonical article links of `html`, resolved against `host`.
pub fn article_links(html: &str, host: &str) -> Vec<String> {
    let sc = Scanner::new(html);
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for href in sc.openers("a").filter_map(|o| attr(o, "href")) {
        if let Some(path) = article_path(&href) {
            if seen.insert(s!(path)) {
                out.push(join!(host, path));
            }
        }
    }
    out
}

/// `/wiki/Title` part of an in-namespace article href, or `None`.
pub fn article_path(href: &str) -> Option<&str> {
    let path = href.split(['#', '?']).next().unwrap_or("");
    let title = path.strip_prefix(ARTICLE_PREFIX)?;
    if title.is_empty() || title.contains(NAMESPACE_SEP) {
        return None;
    }
    Some(path)
}

/// Accept a full URL as-is; turn a bare title (`Peace`, `Python (programming language)`)
/// into an article URL on the default host.
pub fn article_url(title_or_url: &str) -> String {
    let t = title_or_url.trim();
    if t.starts_with("http://") || t.starts_with("https://") {
        return s!(t);
    }
    let title = t.trim_start_matches(ARTICLE_PREFIX).replace(' ', "_");
    join!(HOST, ARTICLE_PREFIX, &title)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST_T: &str = "https://en.wikipedia.org";

    #[test]
    fn keeps_only_article_links_in_first_appearance_order() {
        let html = r#"
            <p><a href="/wiki/Peace">Peace</a>
               <a href="/wiki/File:Dove.png"><img src="x"></a>
               <a href="https://example.com/wiki/Out">external</a>
               <a href="/wiki/War#History">war</a>
               <a href="/w/index.php?title=Peace&amp;action=edit">edit</a>
               <a href="/wiki/Peace">again</a>
               <a>no href</a>
               <a href="/wiki/AT&amp;T">att</a>
               <a href="/wiki/Help:Contents">help</a>
            </p>"#;
        let links = article_links(html, HOST_T);
        assert_eq!(links, vec![
            "https://en.wikipedia.org/wiki/Peace",
            "https://en.wikipedia.org/wiki/War",
            "https://en.wikipedia.org/wiki/AT&T",
        ]);
    }

    #[test]
    fn article_path_rules() {
        assert_eq!(article_path("/wiki/Rust_(programming_language)"), Some("/wiki/Rust_(programming_language)"));
        assert_eq!(article_path("/wiki/Special:Random"), None);
        assert_eq!(article_path("/wiki/"), None);
        assert_eq!(article_path("#cite_note-1"), None);
        assert_eq!(article_path("/wiki/Peace?oldid=1"), Some("/wiki/Peace"));
    }

    #[test]
    fn titles_become_urls() {
        assert_eq!(article_url("Python (programming language)"),
                   "https://en.wikipedia.org/wiki/Python_(programming_language)");
        assert_eq!(article_url("/wiki/Peace"), "https://en.wikipedia.org/wiki/Peace");
        assert_eq!(article_url("https://en.wikipedia.org/wiki/Peace"), "https://en.wikipedia.org/wiki/Peace");
    }
}
