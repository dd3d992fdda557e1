// tests/export_e2e.rs
use std::collections::HashMap;
use std::fs;

use wiki_scrape::config::options::{AnniversaryOptions, OlympicOptions};
use wiki_scrape::core::net::{FetchError, PageSource};
use wiki_scrape::runner;
use wiki_scrape::stats::Medal;
use wiki_scrape::table::ExportFormat;

/// Canned pages keyed by URL; anything else is a 404.
struct Site(HashMap<String, String>);

impl Site {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self(pages.iter().map(|(u, b)| (u.to_string(), b.to_string())).collect())
    }
}

impl PageSource for Site {
    fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.0.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        })
    }
}

const NS: &str = "http://wiki.test/wiki/Wikipedia:Selected_anniversaries/";

const JANUARY: &str = r#"<div>
    <p>Lead paragraph mentioning <a href="/wiki/January_1">January 1</a>.</p>
    <ul><li>not a paragraph</li></ul>
    <p><b><a href="/wiki/January_1">January 1</a></b>: New Year's Day; Global Family Day (UN; observance)</p>
    <p><b><a href="/wiki/January_2">January 2</a></b>: Berchtold's Day (Switzerland, Liechtenstein)</p>
</div>"#;

#[test]
fn anniversaries_write_one_table_per_month() {
    let site = Site::new(&[(&format!("{NS}January"), JANUARY)]);
    let tmp = tempfile::tempdir().unwrap();
    let opts = AnniversaryOptions {
        namespace_url: NS.to_string(),
        months: vec!["January".into(), "February".into()],
        format: ExportFormat::Markdown,
    };

    let summary = runner::anniversary_tables(&site, &opts, tmp.path(), None).unwrap();

    let expected = tmp.path().join("tables_of_anniversaries").join("anniversaries_january.md");
    assert_eq!(summary.files_written, vec![expected.clone()]);
    assert_eq!(
        fs::read_to_string(expected).unwrap(),
        "| Date | Event |\n\
         |:---|:---|\n\
         | January 1 | New Year's Day |\n\
         | January 1 | Global Family Day (UN; observance) |\n\
         | January 2 | Berchtold's Day (Switzerland, Liechtenstein) |\n"
    );
}

#[test]
fn anniversaries_without_months_is_a_config_error() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = AnniversaryOptions { months: vec![], ..AnniversaryOptions::default() };
    assert!(runner::anniversary_tables(&Site::new(&[]), &opts, tmp.path(), None).is_err());
}

const MEDAL_TABLE: &str = r#"<table class="wikitable sortable">
  <tr><th>Team</th><th>No.</th><th>Gold</th><th>Silver</th><th>Bronze</th><th>Total</th><th>No.</th><th>Gold</th></tr>
  <tr><th><a href="/wiki/Norway_at_the_Olympics">Norway</a> (NOR)</th><td>26</td><td>61</td><td>56</td><td>49</td><td>166</td><td>24</td><td>148</td><td>133</td></tr>
  <tr><th><a href="/wiki/Sweden_at_the_Olympics">Sweden</a> (SWE)</th><td>28</td><td>145</td><td>170</td><td>179</td><td>494</td><td>24</td><td>65</td><td>66</td></tr>
  <tr><th><a href="/wiki/Denmark_at_the_Olympics">Denmark</a> (DEN)</th><td>29</td><td>48</td><td>78</td><td>79</td><td>205</td><td>14</td><td>0</td><td>1</td></tr>
</table>"#;

fn country_page(rows: &str) -> String {
    format!(
        r#"<table class="wikitable"><tr><th colspan="5">Medals by summer sport</th></tr>
           <tr><th>Sport</th><th>Gold</th><th>Silver</th><th>Bronze</th><th>Total</th></tr>{rows}</table>"#
    )
}

#[test]
fn olympic_report_writes_charts_and_best_table() {
    let norway = country_page("<tr><th>Sailing</th><td>18</td><td>11</td><td>3</td><td>32</td></tr>");
    let sweden = country_page(
        "<tr><th>Sailing</th><td>10</td><td>12</td><td>11</td><td>33</td></tr>\
         <tr><th>Athletics</th><td>21</td><td>27</td><td>30</td><td>78</td></tr>",
    );
    // Denmark's page is missing: it counts as zero everywhere.
    let site = Site::new(&[
        ("http://wiki.test/wiki/Medals", MEDAL_TABLE),
        ("http://wiki.test/wiki/Norway_at_the_Olympics", &norway),
        ("http://wiki.test/wiki/Sweden_at_the_Olympics", &sweden),
    ]);
    let tmp = tempfile::tempdir().unwrap();
    let opts = OlympicOptions {
        url: "http://wiki.test/wiki/Medals".into(),
        countries: vec!["Norway".into(), "Sweden".into(), "Denmark".into()],
        sports: vec!["Sailing".into(), "Athletics".into(), "Handball".into()],
        medal: Medal::Gold,
    };

    let summary = runner::olympic_report(&site, &opts, tmp.path(), None).unwrap();

    let dir = tmp.path().join("olympic_games_results");
    for name in [
        "total_medal_ranking.png",
        "Sailing_medal_ranking.png",
        "Athletics_medal_ranking.png",
        "Handball_medal_ranking.png",
        "best_of_sport_by_Gold.md",
    ] {
        assert!(summary.files_written.contains(&dir.join(name)), "{name} missing");
        assert!(dir.join(name).is_file());
    }

    let chart = image::open(dir.join("total_medal_ranking.png")).unwrap();
    assert!(chart.width() >= 640);

    assert_eq!(
        fs::read_to_string(dir.join("best_of_sport_by_Gold.md")).unwrap(),
        "| Sport | Best Country |\n\
         |:---|:---|\n\
         | Sailing | Norway |\n\
         | Athletics | Sweden |\n\
         | Handball | None |\n"
    );
}

#[test]
fn ranking_by_silver_changes_the_leaders() {
    let norway = country_page("<tr><th>Sailing</th><td>18</td><td>12</td><td>3</td><td>33</td></tr>");
    let sweden = country_page("<tr><th>Sailing</th><td>10</td><td>12</td><td>11</td><td>33</td></tr>");
    let site = Site::new(&[
        ("http://wiki.test/wiki/Medals", MEDAL_TABLE),
        ("http://wiki.test/wiki/Norway_at_the_Olympics", &norway),
        ("http://wiki.test/wiki/Sweden_at_the_Olympics", &sweden),
        ("http://wiki.test/wiki/Denmark_at_the_Olympics", &country_page("")),
    ]);
    let tmp = tempfile::tempdir().unwrap();
    let opts = OlympicOptions {
        url: "http://wiki.test/wiki/Medals".into(),
        countries: vec!["Norway".into(), "Sweden".into(), "Denmark".into()],
        sports: vec!["Sailing".into()],
        medal: Medal::Silver,
    };

    runner::olympic_report(&site, &opts, tmp.path(), None).unwrap();

    let md = fs::read_to_string(tmp.path().join("olympic_games_results").join("best_of_sport_by_Silver.md")).unwrap();
    assert!(md.ends_with("| Sailing | Norway/Sweden |\n"), "{md}");
}
