// src/specs/medals.rs
//! Scraping *spec* for Olympic medal tables.
//!
//! Two pages are read:
//! - **All-time Olympic Games medal table**: the "List of NOCs with medals"
//!   table, the first `table.wikitable` / `table.sortable` on the page.
//!   Column layout per country row (th and td cells counted together):
//!   `[0]` team, `[1]` summer games, `[2]` summer gold, ... `[6]` winter
//!   games, `[7]` winter gold.
//! - **`<Country>` at the Olympics**: the table captioned "Medals by summer
//!   sport", one row per sport with the sport name in a `<th>` followed by
//!   gold, silver and bronze `<td>`s.
//!
//! Parsing only. Fetching lives in `scrape::olympics`.

use crate::core::Scanner;
use crate::core::html::{attr, cells, has_class, inner_after_open_tag, opener, strip_tags};
use crate::core::sanitize::parse_count;
use crate::error::{Error, Result};
use crate::stats::MedalCount;

const SUMMER_GOLD_COL: usize = 2;
const WINTER_GOLD_COL: usize = 7;
const SPORT_TABLE_CAPTION: &str = "medals by summer sport";

/// A country row of the all-time medal table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryMedals {
    pub name: String,
    /// Absolute URL of the country's Olympic performance article.
    pub url: String,
    pub summer_gold: u32,
    pub winter_gold: u32,
}

/// Rows of the NOC table for the requested `countries`, in table order.
pub fn parse_noc_table<S: AsRef<str>>(html: &str, countries: &[S], host: &str) -> Result<Vec<CountryMedals>> {
    let sc = Scanner::new(html);
    let table = sc
        .blocks("table")
        .find(|t| has_class(opener(t), "wikitable") || has_class(opener(t), "sortable"))
        .ok_or_else(|| Error::Parse(s!("no wikitable on the medal table page")))?;

    let mut out = Vec::new();
    for tr in Scanner::new(table).blocks("tr") {
        let row = cells(tr);
        if row.len() <= WINTER_GOLD_COL {
            continue;
        }
        let Some((name, href)) = first_named_link(row[0]) else { continue };
        if !countries.iter().any(|c| c.as_ref() == name) {
            continue;
        }

        let summer_gold = count_cell(row[SUMMER_GOLD_COL], &name, "summer gold")?;
        let winter_gold = count_cell(row[WINTER_GOLD_COL], &name, "winter gold")?;
        let url = if href.starts_with('/') { join!(host, &href) } else { href };

        out.push(CountryMedals { name, url, summer_gold, winter_gold });
    }
    Ok(out)
}

/// Gold/silver/bronze for `sport` from a country page. A sport the country
/// never medalled in has no row and counts as zero.
pub fn parse_sport_medals(html: &str, sport: &str) -> Result<MedalCount> {
    let table = sport_table(html)
        .ok_or_else(|| Error::Parse(s!("no \"Medals by summer sport\" table")))?;

    for tr in Scanner::new(table).blocks("tr") {
        let row = cells(tr);
        let Some(head_ix) = row.iter().position(|c| opener(c).get(..3).is_some_and(|t| t.eq_ignore_ascii_case("<th"))) else {
            continue;
        };
        let name = strip_tags(inner_after_open_tag(row[head_ix]));
        if !name.eq_ignore_ascii_case(sport.trim()) {
            continue;
        }

        let tds: Vec<&str> = row[head_ix + 1..]
            .iter()
            .copied()
            .filter(|c| opener(c).get(..3).is_some_and(|t| t.eq_ignore_ascii_case("<td")))
            .collect();
        if tds.len() < 3 {
            return Ok(MedalCount::default());
        }
        return Ok(MedalCount {
            gold: count_cell(tds[0], sport, "gold")?,
            silver: count_cell(tds[1], sport, "silver")?,
            bronze: count_cell(tds[2], sport, "bronze")?,
        });
    }
    Ok(MedalCount::default())
}

/// The innermost table enclosing a "Medals by summer sport" caption. Mentions
/// outside any table (headings, contents lists) are passed over.
fn sport_table(html: &str) -> Option<&str> {
    let sc = Scanner::new(html);
    let mut from = 0;
    while let Some(caption) = sc.find(SPORT_TABLE_CAPTION, from) {
        if let Some((s, e)) = enclosing_table(&sc, caption) {
            return Some(&html[s..e]);
        }
        from = caption + 1;
    }
    None
}

fn enclosing_table(sc: &Scanner, at: usize) -> Option<(usize, usize)> {
    let mut before = at;
    loop {
        let start = sc.rfind_open("table", before)?;
        if let Some((s, e)) = sc.block_at("table", start) {
            if e > at {
                return Some((s, e));
            }
        }
        before = start;
    }
}

/// Text and href of the first anchor with visible text.
fn first_named_link(cell: &str) -> Option<(String, String)> {
    Scanner::new(cell).blocks("a").find_map(|a| {
        let text = strip_tags(inner_after_open_tag(a));
        let href = attr(opener(a), "href")?;
        (!text.is_empty()).then_some((text, href))
    })
}

fn count_cell(cell: &str, whose: &str, what: &str) -> Result<u32> {
    let text = strip_tags(inner_after_open_tag(cell));
    parse_count(&text).ok_or_else(|| Error::Parse(format!("{whose}: {what} is not a number: {text:?}")))
}
