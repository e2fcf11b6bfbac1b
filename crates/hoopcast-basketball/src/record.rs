// Win/loss records and the remaining-schedule arithmetic derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::odds::OddsError;

/// Games in a standard NBA regular season.
pub const NBA_REGULAR_SEASON_GAMES: u32 = 82;

// ---------------------------------------------------------------------------
// TeamRecord
// ---------------------------------------------------------------------------

/// A team's win/loss record. Immutable value; recompute rather than mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
}

impl TeamRecord {
    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, losses }
    }

    pub fn games_played(&self) -> u32 {
        self.wins.saturating_add(self.losses)
    }

    /// Fraction of games won, or 0.0 before the first game.
    pub fn win_pct(&self) -> f64 {
        let played = self.games_played();
        if played == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(played)
    }
}

impl fmt::Display for TeamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid record `{input}`: expected WINS-LOSSES, e.g. 45-20")]
pub struct RecordParseError {
    pub input: String,
}

impl FromStr for TeamRecord {
    type Err = RecordParseError;

    /// Parses the "W-L" form used by standings tables ("45-20", "7-3").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || RecordParseError {
            input: s.to_string(),
        };
        let (wins, losses) = s.trim().split_once('-').ok_or_else(err)?;
        let wins = wins.trim().parse::<u32>().map_err(|_| err())?;
        let losses = losses.trim().parse::<u32>().map_err(|_| err())?;
        Ok(TeamRecord { wins, losses })
    }
}

// ---------------------------------------------------------------------------
// RemainingSchedule
// ---------------------------------------------------------------------------

/// Scheduled games a team has not yet played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemainingSchedule {
    remaining_games: u32,
}

impl RemainingSchedule {
    pub fn new(remaining_games: u32) -> Self {
        Self { remaining_games }
    }

    /// `total_season_games - games_played`. A record that has already played
    /// more games than the season holds is rejected.
    pub fn from_record(record: TeamRecord, total_season_games: u32) -> Result<Self, OddsError> {
        let played = record.games_played();
        if played > total_season_games {
            return Err(OddsError::InvalidArgument {
                field: "record",
                message: format!(
                    "{played} games played exceeds a {total_season_games}-game season"
                ),
            });
        }
        Ok(Self {
            remaining_games: total_season_games - played,
        })
    }

    pub fn remaining_games(&self) -> u32 {
        self.remaining_games
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_games == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn games_played_and_win_pct() {
        let record = TeamRecord::new(45, 20);
        assert_eq!(record.games_played(), 65);
        assert!((record.win_pct() - 45.0 / 65.0).abs() < 1e-12);
        assert_eq!(TeamRecord::default().win_pct(), 0.0);
    }

    #[test]
    fn display_and_parse_agree() {
        let record: TeamRecord = "30-35".parse().unwrap();
        assert_eq!(record, TeamRecord::new(30, 35));
        assert_eq!(record.to_string(), "30-35");
        assert_eq!(" 7 - 3 ".parse::<TeamRecord>().unwrap(), TeamRecord::new(7, 3));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<TeamRecord>().is_err());
        assert!("45".parse::<TeamRecord>().is_err());
        assert!("a-b".parse::<TeamRecord>().is_err());
        assert!("-3-4".parse::<TeamRecord>().is_err());
    }

    #[test]
    fn remaining_from_record() {
        let schedule = RemainingSchedule::from_record(TeamRecord::new(45, 20), 82).unwrap();
        assert_eq!(schedule.remaining_games(), 17);
        assert!(!schedule.is_complete());

        let done = RemainingSchedule::from_record(TeamRecord::new(50, 32), 82).unwrap();
        assert!(done.is_complete());
    }

    #[test]
    fn remaining_rejects_overplayed_record() {
        let err = RemainingSchedule::from_record(TeamRecord::new(50, 33), 82).unwrap_err();
        match err {
            OddsError::InvalidArgument { field, .. } => assert_eq!(field, "record"),
        }
    }
}
