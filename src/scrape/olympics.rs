// src/scrape/olympics.rs
use crate::{
    core::net::{ origin, PageSource },
    error::Result,
    progress::Progress,
    specs::medals::{ parse_noc_table, parse_sport_medals, CountryMedals },
    stats::MedalCount,
};

use super::pool::{ fetch_all, Job };

/// Everything the olympic report needs about one country.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryResults {
    pub name: String,
    pub summer_gold: u32,
    pub winter_gold: u32,
    /// One entry per requested sport, in request order.
    pub sports: Vec<MedalCount>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OlympicResults {
    pub sports: Vec<String>,
    /// Countries in medal-table order.
    pub countries: Vec<CountryResults>,
}

impl OlympicResults {
    /// `(country, medals)` pairs for the sport at `sport_ix`.
    pub fn sport_results(&self, sport_ix: usize) -> Vec<(String, MedalCount)> {
        self.countries
            .iter()
            .map(|c| (c.name.clone(), c.sports.get(sport_ix).copied().unwrap_or_default()))
            .collect()
    }
}

/// Read the all-time medal table at `url`, then each country's Olympic page
/// (once, for every sport). A country page that fails to load or parse
/// contributes zero medals.
pub fn collect<S: PageSource + ?Sized>(
    source: &S,
    url: &str,
    countries: &[String],
    sports: &[String],
    mut progress: Option<&mut dyn Progress>,
) -> Result<OlympicResults> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Reading the all-time medal table…");
    }
    let table_html = source.get_text(url)?;
    let rows: Vec<CountryMedals> = parse_noc_table(&table_html, countries, origin(url))?;

    for wanted in countries {
        if !rows.iter().any(|r| &r.name == wanted) {
            tracing::warn!("{wanted}: not listed in the medal table");
        }
    }
    tracing::info!("Medal table lists {} of {} requested countries", rows.len(), countries.len());

    let jobs: Vec<Job> = rows
        .iter()
        .map(|r| Job { label: r.name.clone(), url: r.url.clone() })
        .collect();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(jobs.len());
    }
    let pages = fetch_all(source, &jobs, progress.as_mut().map(|p| &mut **p as &mut dyn Progress));

    let mut out = Vec::with_capacity(rows.len());
    for (row, page) in rows.into_iter().zip(pages) {
        let medals = match page {
            Ok(html) => sports
                .iter()
                .map(|sport| match parse_sport_medals(&html, sport) {
                    Ok(m) => m,
                    Err(e) => {
                        tracing::warn!("{}: {sport}: {e}", row.name);
                        MedalCount::default()
                    }
                })
                .collect(),
            Err(_) => vec![MedalCount::default(); sports.len()],
        };
        out.push(CountryResults {
            name: row.name,
            summer_gold: row.summer_gold,
            winter_gold: row.winter_gold,
            sports: medals,
        });
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(OlympicResults { sports: sports.to_vec(), countries: out })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::FetchError;

    const TABLE: &str = r#"<table class="wikitable">
        <tr><td><a href="/wiki/Norway_at_the_Olympics">Norway</a></td><td>1</td><td>61</td><td>0</td><td>0</td><td>0</td><td>1</td><td>148</td></tr>
        <tr><td><a href="/wiki/Sweden_at_the_Olympics">Sweden</a></td><td>1</td><td>145</td><td>0</td><td>0</td><td>0</td><td>1</td><td>65</td></tr>
        </table>"#;

    const NORWAY: &str = r#"<table><tr><th>Medals by summer sport</th></tr>
        <tr><th>Sailing</th><td>18</td><td>11</td><td>3</td></tr></table>"#;

    struct Site;
    impl PageSource for Site {
        fn get_text(&self, url: &str) -> std::result::Result<String, FetchError> {
            match url {
                "http://mirror/wiki/Medals" => Ok(s!(TABLE)),
                "http://mirror/wiki/Norway_at_the_Olympics" => Ok(s!(NORWAY)),
                _ => Err(FetchError::Status { url: s!(url), status: reqwest::StatusCode::NOT_FOUND }),
            }
        }
    }

    #[test]
    fn failing_country_counts_as_zero() {
        let countries = vec![s!("Norway"), s!("Sweden"), s!("Atlantis")];
        let sports = vec![s!("Sailing"), s!("Archery")];
        let got = collect(&Site, "http://mirror/wiki/Medals", &countries, &sports, None).unwrap();

        assert_eq!(got.countries.len(), 2);
        assert_eq!(got.countries[0].sports[0], MedalCount { gold: 18, silver: 11, bronze: 3 });
        assert_eq!(got.countries[0].sports[1], MedalCount::default());
        assert_eq!(got.countries[1].summer_gold, 145);
        assert_eq!(got.countries[1].sports, vec![MedalCount::default(); 2]);

        let sailing = got.sport_results(0);
        assert_eq!(sailing[0].0, "Norway");
        assert_eq!(sailing[1].1.gold, 0);
    }

    #[test]
    fn unreachable_medal_table_is_fatal() {
        assert!(collect(&Site, "http://mirror/wiki/Nope", &[s!("Norway")], &[], None).is_err());
    }

    #[derive(Default)]
    struct Tally { total: usize, done: usize, failed: Vec<String>, finished: usize }
    impl Progress for Tally {
        fn begin(&mut self, total: usize) { self.total = total; }
        fn item_done(&mut self, _item: &str) { self.done += 1; }
        fn item_failed(&mut self, item: &str, _reason: &str) { self.failed.push(s!(item)); }
        fn finish(&mut self) { self.finished += 1; }
    }

    #[test]
    fn progress_counts_country_pages() {
        let countries = vec![s!("Norway"), s!("Sweden")];
        let mut tally = Tally::default();
        collect(&Site, "http://mirror/wiki/Medals", &countries, &[s!("Sailing")], Some(&mut tally)).unwrap();

        assert_eq!(tally.total, 2);
        assert_eq!(tally.done, 1);
        assert_eq!(tally.failed, vec![s!("Sweden")]);
        assert_eq!(tally.finished, 1);
    }
}
