// src/config/consts.rs

// Net config
pub const HOST: &str = "https://en.wikipedia.org";
pub const ARTICLE_PREFIX: &str = "/wiki/";
pub const NAMESPACE_SEP: char = ':';
pub const USER_AGENT: &str = concat!("wiki_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Pages
pub const MEDAL_TABLE_URL: &str = "https://en.wikipedia.org/wiki/All-time_Olympic_Games_medal_table";
pub const ANNIVERSARIES_NAMESPACE_URL: &str =
    "https://en.wikipedia.org/wiki/Wikipedia:Selected_anniversaries/";

// Lists (defaults only; callers pass their own through options)
pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];
pub const SCANDINAVIAN_COUNTRIES: [&str; 3] = ["Norway", "Sweden", "Denmark"];
pub const SUMMER_SPORTS: [&str; 6] = [
    "Sailing", "Athletics", "Handball", "Football", "Cycling", "Archery",
];

// Logs
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const ANNIVERSARIES_SUBDIR: &str = "tables_of_anniversaries";
pub const OLYMPICS_SUBDIR: &str = "olympic_games_results";

// Concurrency (scrape pipelines only; the race is single-threaded)
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
