// src/specs/anniversaries.rs
//! Scraping *spec* for `Wikipedia:Selected anniversaries/<Month>`.
//!
//! Every highlighted anniversary is a paragraph that opens with a bold link
//! to its day page:
//!
//! ```text
//! <p><b><a href="/wiki/April_1" title="April 1">April 1</a></b>: Event 1; Event 2 (a; b); ...</p>
//! ```
//!
//! `extract_anniversaries` returns those paragraphs as plain text;
//! `anniversary_rows` splits them into one `(Date, Event)` row per event.

use crate::core::Scanner;
use crate::core::html::{attr, inner_after_open_tag, opener, strip_tags};

pub const HEADERS: [&str; 2] = ["Date", "Event"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anniversary {
    pub date: String,
    pub event: String,
}

impl Anniversary {
    pub fn to_row(&self) -> Vec<String> {
        vec![self.date.clone(), self.event.clone()]
    }
}

/// Plain text of every paragraph that starts with a link to a day of `month`.
pub fn extract_anniversaries(html: &str, month: &str) -> Vec<String> {
    let sc = Scanner::new(html);
    let mut out = Vec::new();

    for p in sc.blocks("p") {
        let psc = Scanner::new(p);
        let date_link = psc.blocks("a").find(|a| {
            attr(opener(a), "href").is_some_and(|href| is_day_href(&href, month))
        });
        let Some(link) = date_link else { continue };

        let link_text = strip_tags(inner_after_open_tag(link));
        let text = strip_tags(p);
        if !link_text.is_empty() && text.starts_with(&link_text) {
            out.push(text);
        }
    }
    out
}

/// `/wiki/<Month>_<digits>`, nothing before or after.
fn is_day_href(href: &str, month: &str) -> bool {
    href.strip_prefix("/wiki/")
        .and_then(|rest| rest.strip_prefix(month))
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|day| !day.is_empty() && day.bytes().all(|b| b.is_ascii_digit()))
}

/// One row per event: split at the first `:` into date and events, then on
/// every `;` that is not inside parentheses. Entries with no `:` are dropped.
pub fn anniversary_rows<S: AsRef<str>>(list: &[S]) -> Vec<Anniversary> {
    let mut rows = Vec::new();
    for entry in list {
        let Some((date, events)) = entry.as_ref().split_once(':') else { continue };
        for event in split_events(events) {
            let event = event.trim();
            if !event.is_empty() {
                rows.push(Anniversary { date: s!(date.trim()), event: s!(event) });
            }
        }
    }
    rows
}

/// Split on `;` unless a `)` shows up after it before any `(`.
fn split_events(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    for (i, ch) in s.char_indices() {
        if ch == ';' && !closes_paren_ahead(&s[i + 1..]) {
            parts.push(&s[start..i]);
            start = i + 1;
        }
    }
    parts.push(&s[start..]);
    parts
}

fn closes_paren_ahead(rest: &str) -> bool {
    for ch in rest.chars() {
        match ch {
            '(' => return false,
            ')' => return true,
            _ => {}
        }
    }
    false
}
