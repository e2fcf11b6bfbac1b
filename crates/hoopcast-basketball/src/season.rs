// NBA season identifiers in the stats site's "2023-24" form.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Month (1-based) in which a new regular season begins.
const SEASON_START_MONTH: u32 = 10;

/// Start years accepted when parsing: the league's first season through the
/// last one whose "YYYY-YY" form still has a four-digit start year.
const FIRST_SEASON: i32 = 1946;
const LAST_SEASON: i32 = 9998;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    /// Season starting in the autumn of this calendar year.
    Year(i32),
    /// Career totals across every season.
    AllTime,
}

impl Season {
    /// The season in progress (or most recently started) on `date`.
    pub fn current(date: NaiveDate) -> Self {
        let start = if date.month() >= SEASON_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Season::Year(start)
    }

    /// `count` seasons ending with the one current on `date`, newest first.
    pub fn recent(count: usize, date: NaiveDate) -> Vec<Season> {
        let Season::Year(latest) = Season::current(date) else {
            return Vec::new();
        };
        (0..count as i32).map(|i| Season::Year(latest - i)).collect()
    }

    /// Cache-key-safe identifier.
    pub fn key(&self) -> String {
        match self {
            Season::Year(_) => self.to_string(),
            Season::AllTime => "all-time".into(),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Year(start) => write!(f, "{}-{:02}", start, (start.rem_euclid(100) + 1) % 100),
            Season::AllTime => f.write_str("All Time"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid season `{0}`: expected e.g. 2023-24 or \"all\"")]
pub struct SeasonParseError(pub String);

impl FromStr for Season {
    type Err = SeasonParseError;

    /// Accepts "2023-24", a bare start year "2023", or "all" / "all time".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower == "all" || lower == "all time" || lower == "all-time" {
            return Ok(Season::AllTime);
        }
        let err = || SeasonParseError(s.to_string());
        let (start, end) = match trimmed.split_once('-') {
            Some((start, end)) => (start, Some(end)),
            None => (trimmed, None),
        };
        let start: i32 = start.parse().map_err(|_| err())?;
        if !(FIRST_SEASON..=LAST_SEASON).contains(&start) {
            return Err(err());
        }
        if let Some(end) = end {
            let end: i32 = end.parse().map_err(|_| err())?;
            if end != (start + 1) % 100 {
                return Err(err());
            }
        }
        Ok(Season::Year(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_like_the_stats_site() {
        assert_eq!(Season::Year(2023).to_string(), "2023-24");
        assert_eq!(Season::Year(1999).to_string(), "1999-00");
        assert_eq!(Season::AllTime.to_string(), "All Time");
    }

    #[test]
    fn current_rolls_over_in_october() {
        assert_eq!(Season::current(date(2024, 9, 30)), Season::Year(2023));
        assert_eq!(Season::current(date(2024, 10, 1)), Season::Year(2024));
        assert_eq!(Season::current(date(2025, 3, 15)), Season::Year(2024));
    }

    #[test]
    fn recent_lists_newest_first() {
        let seasons = Season::recent(3, date(2024, 2, 1));
        assert_eq!(
            seasons,
            vec![Season::Year(2023), Season::Year(2022), Season::Year(2021)]
        );
    }

    #[test]
    fn parses_common_forms() {
        assert_eq!("2023-24".parse::<Season>().unwrap(), Season::Year(2023));
        assert_eq!("1999-00".parse::<Season>().unwrap(), Season::Year(1999));
        assert_eq!("2021".parse::<Season>().unwrap(), Season::Year(2021));
        assert_eq!("All Time".parse::<Season>().unwrap(), Season::AllTime);
        assert_eq!("all".parse::<Season>().unwrap(), Season::AllTime);
        assert!("2023-25".parse::<Season>().is_err());
        assert!("latest".parse::<Season>().is_err());
        assert!("2147483647-48".parse::<Season>().is_err());
        assert!("2147483647".parse::<Season>().is_err());
        assert!("1900".parse::<Season>().is_err());
        assert!("-5".parse::<Season>().is_err());
    }

    #[test]
    fn display_never_overflows() {
        assert_eq!(Season::Year(i32::MAX).to_string(), format!("{}-48", i32::MAX));
        assert_eq!(Season::Year(9999).to_string(), "9999-00");
    }

    #[test]
    fn keys_are_path_safe() {
        assert_eq!(Season::AllTime.key(), "all-time");
        assert_eq!(Season::Year(2024).key(), "2024-25");
    }
}
