// src/scrape/anniversaries.rs
use crate::{
    core::net::PageSource,
    progress::Progress,
    specs::anniversaries::{ anniversary_rows, extract_anniversaries, Anniversary },
};

use super::pool::{ fetch_all, Job };

/// The anniversaries of one month, one row per event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthTable {
    pub month: String,
    pub rows: Vec<Anniversary>,
}

/// Fetch `{namespace_url}{Month}` for every month and split the page into
/// rows. Months whose page could not be fetched are reported and left out;
/// the rest keep the order of `months`.
pub fn collect<S: PageSource + ?Sized>(
    source: &S,
    namespace_url: &str,
    months: &[String],
    mut progress: Option<&mut dyn Progress>,
) -> Vec<MonthTable> {
    let jobs: Vec<Job> = months
        .iter()
        .map(|m| Job { label: m.clone(), url: join!(namespace_url, m) })
        .collect();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(jobs.len());
    }
    tracing::info!("Fetching selected anniversaries for {} month(s)", jobs.len());

    let pages = fetch_all(source, &jobs, progress.as_mut().map(|p| &mut **p as &mut dyn Progress));

    let mut tables = Vec::new();
    for (month, page) in months.iter().zip(pages) {
        let Ok(html) = page else { continue };
        let list = extract_anniversaries(&html, month);
        if list.is_empty() {
            tracing::warn!("{month}: no anniversaries found on the page");
        }
        tables.push(MonthTable { month: month.clone(), rows: anniversary_rows(&list) });
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    tables
}
