// src/stats.rs
// Medal types and the per-sport ranking.

use std::{fmt, str::FromStr};

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub const ALL: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    pub fn name(self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Medal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Medal::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidMedal(s!(s)))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MedalCount {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

impl MedalCount {
    pub fn get(&self, medal: Medal) -> u32 {
        match medal {
            Medal::Gold => self.gold,
            Medal::Silver => self.silver,
            Medal::Bronze => self.bronze,
        }
    }

    pub fn total(&self) -> u32 { self.gold + self.silver + self.bronze }
}

/// Country (or countries) leading in `medal`.
///
/// One leader: its name. Several: names joined with `/` in input order.
/// Every country tied (including all at zero) or no countries: `"None"`.
pub fn best_country_in_sport(results: &[(String, MedalCount)], medal: Medal) -> String {
    let mut best: Vec<&str> = Vec::new();
    let mut max = 0u32;

    for (country, counts) in results {
        let n = counts.get(medal);
        if n > max {
            best.clear();
            best.push(country);
            max = n;
        } else if n == max {
            best.push(country);
        }
    }

    if best.is_empty() || best.len() == results.len() {
        s!("None")
    } else {
        best.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc(gold: u32, silver: u32, bronze: u32) -> MedalCount {
        MedalCount { gold, silver, bronze }
    }

    fn results(list: &[(&str, MedalCount)]) -> Vec<(String, MedalCount)> {
        list.iter().map(|(c, m)| (s!(*c), *m)).collect()
    }

    #[test]
    fn single_leader() {
        let r = results(&[("Norway", mc(3, 0, 0)), ("Sweden", mc(1, 5, 5)), ("Denmark", mc(2, 0, 0))]);
        assert_eq!(best_country_in_sport(&r, Medal::Gold), "Norway");
        assert_eq!(best_country_in_sport(&r, Medal::Silver), "Sweden");
    }

    #[test]
    fn two_way_tie_joins_names() {
        let r = results(&[("Norway", mc(4, 0, 0)), ("Sweden", mc(1, 0, 0)), ("Denmark", mc(4, 0, 0))]);
        assert_eq!(best_country_in_sport(&r, Medal::Gold), "Norway/Denmark");
    }

    #[test]
    fn all_tied_or_empty_is_none() {
        let r = results(&[("Norway", mc(0, 0, 0)), ("Sweden", mc(0, 0, 0))]);
        assert_eq!(best_country_in_sport(&r, Medal::Gold), "None");
        let r = results(&[("Norway", mc(2, 0, 0)), ("Sweden", mc(2, 0, 0))]);
        assert_eq!(best_country_in_sport(&r, Medal::Gold), "None");
        assert_eq!(best_country_in_sport(&[], Medal::Gold), "None");
    }

    #[test]
    fn leading_zeros_are_replaced_once_someone_scores() {
        let r = results(&[("Norway", mc(0, 0, 0)), ("Sweden", mc(0, 0, 0)), ("Denmark", mc(0, 0, 1))]);
        assert_eq!(best_country_in_sport(&r, Medal::Bronze), "Denmark");
    }

    #[test]
    fn medal_parsing() {
        assert_eq!("gold".parse::<Medal>().unwrap(), Medal::Gold);
        assert_eq!(" Bronze ".parse::<Medal>().unwrap(), Medal::Bronze);
        let err = "Platinum".parse::<Medal>().unwrap_err();
        assert!(err.to_string().contains("Platinum"));
    }
}
