// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::stats::Medal;
use crate::table::ExportFormat;

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s!(*s)).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    /// Parent directory for every generated output folder.
    pub work_dir: PathBuf,
    pub race: RaceOptions,
    pub anniversaries: AnniversaryOptions,
    pub olympics: OlympicOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            race: RaceOptions::default(),
            anniversaries: AnniversaryOptions::default(),
            olympics: OlympicOptions::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RaceOptions {
    /// Stop after this many resolved pages. `None` explores until the
    /// finish is found or the reachable graph is exhausted.
    pub max_nodes: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnniversaryOptions {
    pub namespace_url: String,
    pub months: Vec<String>,
    pub format: ExportFormat,
}

impl Default for AnniversaryOptions {
    fn default() -> Self {
        Self {
            namespace_url: s!(ANNIVERSARIES_NAMESPACE_URL),
            months: owned(&MONTHS),
            format: ExportFormat::Markdown,
        }
    }
}

impl AnniversaryOptions {
    pub fn out_dir(&self, work_dir: &std::path::Path) -> PathBuf {
        work_dir.join(ANNIVERSARIES_SUBDIR)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OlympicOptions {
    pub url: String,
    pub countries: Vec<String>,
    pub sports: Vec<String>,
    /// Medal used to rank the best country per sport.
    pub medal: Medal,
}

impl Default for OlympicOptions {
    fn default() -> Self {
        Self {
            url: s!(MEDAL_TABLE_URL),
            countries: owned(&SCANDINAVIAN_COUNTRIES),
            sports: owned(&SUMMER_SPORTS),
            medal: Medal::Gold,
        }
    }
}

impl OlympicOptions {
    pub fn out_dir(&self, work_dir: &std::path::Path) -> PathBuf {
        work_dir.join(OLYMPICS_SUBDIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_stock_lists() {
        let opts = AppOptions::default();
        assert_eq!(opts.anniversaries.months.len(), 12);
        assert_eq!(opts.anniversaries.months[0], "January");
        assert_eq!(opts.olympics.countries, vec!["Norway", "Sweden", "Denmark"]);
        assert_eq!(opts.olympics.medal, Medal::Gold);
        assert_eq!(opts.race.max_nodes, None);
    }

    #[test]
    fn out_dirs_hang_off_work_dir() {
        let opts = AppOptions::default();
        let wd = PathBuf::from("work");
        assert_eq!(opts.anniversaries.out_dir(&wd), wd.join("tables_of_anniversaries"));
        assert_eq!(opts.olympics.out_dir(&wd), wd.join("olympic_games_results"));
    }
}
