// src/runner.rs
//! Top-level pipelines shared by the CLI and the integration tests:
//! each takes already-resolved options, runs one job end to end and reports
//! what it produced.

use std::path::{Path, PathBuf};

use crate::{
    chart::{BarChart, Color},
    config::options::{AnniversaryOptions, OlympicOptions, RaceOptions},
    core::{net::PageSource, sanitize::sanitize_filename},
    error::{Error, Result},
    file::{self, ensure_directory},
    progress::Progress,
    scrape::{self, anniversaries::MonthTable, olympics::OlympicResults},
    search::{GraphSearch, LinkResolver, SearchReport},
    specs::anniversaries::HEADERS,
    stats::{best_country_in_sport, Medal},
    table::ExportFormat,
};

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
}

pub const SUMMER_COLOR: Color = [212, 175, 55];
pub const WINTER_COLOR: Color = [70, 130, 200];

pub fn medal_color(medal: Medal) -> Color {
    match medal {
        Medal::Gold => [212, 175, 55],
        Medal::Silver => [168, 169, 173],
        Medal::Bronze => [176, 112, 60],
    }
}

/* ---------------- Race ---------------- */

/// Shortest link path from `start` to `finish` under the race options.
pub fn race<R: LinkResolver + ?Sized>(
    opts: &RaceOptions,
    resolver: &mut R,
    start: &str,
    finish: &str,
    progress: Option<&mut dyn Progress>,
) -> SearchReport {
    GraphSearch::new()
        .with_max_nodes(opts.max_nodes)
        .run(resolver, start, finish, progress)
}

/* ---------------- Anniversaries ---------------- */

/// One table file per month under `{work_dir}/tables_of_anniversaries/`.
pub fn anniversary_tables<S: PageSource + ?Sized>(
    source: &S,
    opts: &AnniversaryOptions,
    work_dir: &Path,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    if opts.months.is_empty() {
        return Err(Error::Config(s!("no months selected")));
    }
    let tables = scrape::anniversaries::collect(source, &opts.namespace_url, &opts.months, progress);
    write_anniversary_tables(&tables, opts.format, &opts.out_dir(work_dir))
}

/// `anniversaries_{month}.{ext}` for every table, columns `Date`, `Event`.
pub fn write_anniversary_tables(tables: &[MonthTable], format: ExportFormat, dir: &Path) -> Result<RunSummary> {
    ensure_directory(dir)?;
    let headers: Vec<String> = HEADERS.iter().map(|h| s!(*h)).collect();

    let mut written = Vec::with_capacity(tables.len());
    for t in tables {
        let rows: Vec<Vec<String>> = t.rows.iter().map(|a| a.to_row()).collect();
        let stem = join!("anniversaries_", &sanitize_filename(&t.month.to_lowercase(), "month"));
        let path = file::write_table(dir, &stem, format, &headers, &rows)?;
        tracing::info!("{}: {} rows -> {}", t.month, rows.len(), path.display());
        written.push(path);
    }
    Ok(RunSummary { files_written: written })
}

/* ---------------- Olympics ---------------- */

/// Charts and the best-of-sport table under `{work_dir}/olympic_games_results/`.
pub fn olympic_report<S: PageSource + ?Sized>(
    source: &S,
    opts: &OlympicOptions,
    work_dir: &Path,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    if opts.countries.is_empty() {
        return Err(Error::Config(s!("no countries selected")));
    }
    let results = scrape::olympics::collect(source, &opts.url, &opts.countries, &opts.sports, progress)?;
    write_olympic_report(&results, opts.medal, &opts.out_dir(work_dir))
}

pub fn write_olympic_report(results: &OlympicResults, medal: Medal, dir: &Path) -> Result<RunSummary> {
    ensure_directory(dir)?;
    let mut written = Vec::new();
    let names: Vec<String> = results.countries.iter().map(|c| c.name.clone()).collect();

    let total = BarChart::new("Olympic gold medals", names.clone())
        .with_series("Summer", SUMMER_COLOR, results.countries.iter().map(|c| c.summer_gold).collect())
        .with_series("Winter", WINTER_COLOR, results.countries.iter().map(|c| c.winter_gold).collect());
    let path = dir.join("total_medal_ranking.png");
    total.render_png(&path)?;
    written.push(path);

    let mut best_rows = Vec::with_capacity(results.sports.len());
    for (ix, sport) in results.sports.iter().enumerate() {
        let per_country = results.sport_results(ix);

        let mut chart = BarChart::new(&format!("{sport} medals"), names.clone());
        for m in Medal::ALL {
            chart = chart.with_series(m.name(), medal_color(m), per_country.iter().map(|(_, c)| c.get(m)).collect());
        }
        let path = dir.join(format!("{}_medal_ranking.png", sanitize_filename(sport, "sport")));
        chart.render_png(&path)?;
        written.push(path);

        best_rows.push(vec![sport.clone(), best_country_in_sport(&per_country, medal)]);
    }

    let headers = vec![s!("Sport"), s!("Best Country")];
    let stem = format!("best_of_sport_by_{}", medal.name());
    let path = file::write_table(dir, &stem, ExportFormat::Markdown, &headers, &best_rows)?;
    written.push(path);

    tracing::info!("Olympic report: {} file(s) in {}", written.len(), dir.display());
    Ok(RunSummary { files_written: written })
}
