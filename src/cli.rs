// src/cli.rs
use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::{
    config::{
        consts::{LOG_FILE, MONTHS},
        options::AppOptions,
    },
    core::net::{get_html, origin, parse_params, HttpClient},
    error::{Error, Result},
    progress::Progress,
    runner::{self, RunSummary},
    search::WikiLinkResolver,
    specs::links::article_url,
    stats::Medal,
    table::ExportFormat,
};

/// Wikipedia scraping toolbox: wiki races, anniversaries and Olympic medal reports.
#[derive(Debug, Parser)]
#[command(name = "wiki_scrape", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Parent directory for generated output folders
    #[arg(long, global = true, default_value = ".")]
    pub work_dir: PathBuf,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also append logs to a file; a bare name lands in .store/
    #[arg(long, global = true, num_args = 0..=1, require_equals = true, default_missing_value = LOG_FILE)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Shortest chain of article links from START to FINISH
    Race {
        /// Article title or URL to start from
        start: String,
        /// Article title or URL to reach
        finish: String,
        /// Give up after resolving this many pages
        #[arg(long)]
        max_nodes: Option<usize>,
    },

    /// Download one page, optionally saving it as "url\nbody"
    Fetch {
        url: String,
        /// Query parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Tables of selected anniversaries, one file per month
    Anniversaries {
        /// Prefix the month name is appended to
        #[arg(long)]
        namespace_url: Option<String>,
        /// Month to scrape (repeatable; default all twelve)
        #[arg(long = "month")]
        months: Vec<String>,
        /// md, csv or tsv
        #[arg(long, default_value = "md")]
        format: ExportFormat,
    },

    /// Medal charts and best-country table for a set of countries
    Olympics {
        /// All-time medal table page
        #[arg(long)]
        url: Option<String>,
        /// Country to include (repeatable; default Scandinavia)
        #[arg(long = "country")]
        countries: Vec<String>,
        /// Summer sport to include (repeatable)
        #[arg(long = "sport")]
        sports: Vec<String>,
        /// Medal that decides the best country per sport
        #[arg(long, default_value = "Gold")]
        medal: Medal,
    },
}

/// Progress lines on stderr. Counted when the total is known.
#[derive(Default)]
pub struct CliProgress {
    done: usize,
    failed: usize,
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.failed = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, item: &str) {
        self.done += 1;
        if self.total > 0 {
            eprintln!("[{}/{}] {item}", self.done + self.failed, self.total);
        } else {
            eprint!("\rResolved {} page(s)", self.done);
            let _ = std::io::stderr().flush();
        }
    }

    fn item_failed(&mut self, item: &str, reason: &str) {
        self.failed += 1;
        if self.total > 0 {
            eprintln!("[{}/{}] {item} failed: {reason}", self.done + self.failed, self.total);
        }
    }

    fn finish(&mut self) {
        if self.total == 0 && self.done + self.failed > 0 {
            eprintln!();
        }
        if self.failed > 0 {
            eprintln!("{} item(s) failed, see log for details", self.failed);
        }
    }
}

/// `april` / `APRIL` -> `April`; anything that is not a month is rejected.
pub fn canonical_month(raw: &str) -> Result<String> {
    MONTHS
        .iter()
        .find(|m| m.eq_ignore_ascii_case(raw.trim()))
        .map(|m| s!(*m))
        .ok_or_else(|| Error::Config(format!("Unknown month: {raw}")))
}

/// Fold the parsed flags into the option tree, starting from the defaults.
pub fn options(cli: &Cli) -> Result<AppOptions> {
    let mut opts = AppOptions { work_dir: cli.work_dir.clone(), ..AppOptions::default() };

    match &cli.command {
        Commands::Race { max_nodes, .. } => opts.race.max_nodes = *max_nodes,
        Commands::Fetch { .. } => {}
        Commands::Anniversaries { namespace_url, months, format } => {
            if let Some(u) = namespace_url {
                opts.anniversaries.namespace_url = u.clone();
            }
            if !months.is_empty() {
                opts.anniversaries.months = months.iter().map(|m| canonical_month(m)).collect::<Result<_>>()?;
            }
            opts.anniversaries.format = *format;
        }
        Commands::Olympics { url, countries, sports, medal } => {
            if let Some(u) = url {
                opts.olympics.url = u.clone();
            }
            if !countries.is_empty() {
                opts.olympics.countries = countries.clone();
            }
            if !sports.is_empty() {
                opts.olympics.sports = sports.clone();
            }
            opts.olympics.medal = *medal;
        }
    }
    Ok(opts)
}

pub fn run(cli: Cli) -> Result<()> {
    let opts = options(&cli)?;
    let client = HttpClient::new()?;
    let mut progress = CliProgress::default();

    match cli.command {
        Commands::Race { start, finish, .. } => {
            let (start, finish) = (article_url(&start), article_url(&finish));
            tracing::info!("Race from {start} to {finish}");

            // Links are absolutized against the edition the race starts on.
            let mut resolver = WikiLinkResolver::new(client).with_host(origin(&start));
            let report = runner::race(&opts.race, &mut resolver, &start, &finish, Some(&mut progress));

            if report.found() {
                for node in &report.path {
                    println!("{node}");
                }
                eprintln!("{} hop(s), {} page(s) resolved", report.hops().unwrap_or(0), report.expanded);
            } else if report.truncated {
                eprintln!("No path within {} page(s)", report.expanded);
            } else {
                eprintln!("No path found ({} page(s) resolved)", report.expanded);
            }
        }
        Commands::Fetch { url, params, output } => {
            let params = parse_params(&params).map_err(Error::Config)?;
            let body = get_html(&client, &url, &params, output.as_deref())?;
            match output {
                Some(path) => eprintln!("Saved {}", path.display()),
                None => println!("{body}"),
            }
        }
        Commands::Anniversaries { .. } => {
            let summary = runner::anniversary_tables(&client, &opts.anniversaries, &opts.work_dir, Some(&mut progress))?;
            report_files(&summary);
        }
        Commands::Olympics { .. } => {
            let summary = runner::olympic_report(&client, &opts.olympics, &opts.work_dir, Some(&mut progress))?;
            report_files(&summary);
        }
    }
    Ok(())
}

fn report_files(summary: &RunSummary) {
    for path in &summary.files_written {
        println!("{}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wiki_scrape").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn race_flags() {
        let cli = parse(&["race", "Peace", "War", "--max-nodes", "50", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(options(&cli).unwrap().race.max_nodes, Some(50));
        assert!(matches!(cli.command, Commands::Race { ref start, .. } if start == "Peace"));
    }

    #[test]
    fn log_file_takes_value_only_with_equals() {
        let cli = parse(&["--log-file", "race", "A", "B"]);
        assert_eq!(cli.log_file, Some(PathBuf::from("debug.log")));
        let cli = parse(&["--log-file=run.log", "race", "A", "B"]);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn anniversaries_months_are_canonical() {
        let cli = parse(&["anniversaries", "--month", "april", "--month", "MAY", "--format", "csv"]);
        let opts = options(&cli).unwrap();
        assert_eq!(opts.anniversaries.months, vec!["April", "May"]);
        assert_eq!(opts.anniversaries.format, ExportFormat::Csv);

        let bad = parse(&["anniversaries", "--month", "Smarch"]);
        assert!(options(&bad).is_err());
    }

    #[test]
    fn olympics_defaults_and_overrides() {
        let cli = parse(&["--work-dir", "out", "olympics", "--country", "Finland", "--medal", "silver"]);
        let opts = options(&cli).unwrap();
        assert_eq!(opts.work_dir, PathBuf::from("out"));
        assert_eq!(opts.olympics.countries, vec!["Finland"]);
        assert_eq!(opts.olympics.sports.len(), 6);
        assert_eq!(opts.olympics.medal, Medal::Silver);

        assert!(Cli::try_parse_from(["wiki_scrape", "olympics", "--medal", "tin"]).is_err());
    }
}
