// League standings: row model, conference tables, playoff tiers, and the
// offline CSV snapshot loader.
//
// Total wins and losses always come from the WINS/LOSSES columns. Monthly
// split columns (Oct, Nov, ...) are ignored: summing a subset of them
// undercounts every team once the season passes those months.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

use crate::record::TeamRecord;

// ---------------------------------------------------------------------------
// Conference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conference {
    East,
    West,
}

impl Conference {
    pub fn label(&self) -> &'static str {
        match self {
            Conference::East => "East",
            Conference::West => "West",
        }
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            Conference::East => "Eastern",
            Conference::West => "Western",
        }
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

impl FromStr for Conference {
    type Err = StandingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "east" | "eastern" | "e" => Ok(Conference::East),
            "west" | "western" | "w" => Ok(Conference::West),
            _ => Err(StandingsError::UnknownConference(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StandingsError {
    #[error("unknown conference `{0}` (expected East or West)")]
    UnknownConference(String),

    #[error("failed to read standings snapshot {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in standings snapshot {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One team's line in the league standings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsRow {
    pub team_id: u32,
    pub team_city: String,
    pub team_name: String,
    pub conference: Conference,
    pub playoff_rank: u32,
    pub record: TeamRecord,
    pub win_pct: f64,
    /// Last-ten record as published ("7-3"); empty when absent.
    pub last_ten: String,
}

impl StandingsRow {
    /// "City Name", e.g. "Boston Celtics" or "LA Clippers".
    pub fn display_name(&self) -> String {
        format!("{} {}", self.team_city, self.team_name)
    }

    /// Case-insensitive match on display name, nickname, or tricode.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        if self.display_name().eq_ignore_ascii_case(query)
            || self.team_name.eq_ignore_ascii_case(query)
        {
            return true;
        }
        crate::teams::by_id(self.team_id)
            .is_some_and(|team| team.abbreviation.eq_ignore_ascii_case(query))
    }
}

/// Standings row keyed by the stats site's column names. Shared by the CSV
/// snapshot loader and the JSON result-set decoder, so both sources accept
/// exactly the same schema.
#[derive(Debug, Clone, Deserialize)]
#[allow(non_snake_case)]
pub struct RawStandingsRow {
    pub TeamID: u32,
    pub TeamCity: String,
    pub TeamName: String,
    pub Conference: String,
    pub PlayoffRank: u32,
    pub WINS: u32,
    pub LOSSES: u32,
    #[serde(default)]
    pub WinPCT: Option<f64>,
    #[serde(default)]
    pub L10: Option<String>,
}

impl TryFrom<RawStandingsRow> for StandingsRow {
    type Error = StandingsError;

    fn try_from(raw: RawStandingsRow) -> Result<Self, Self::Error> {
        let conference: Conference = raw.Conference.parse()?;
        let record = TeamRecord::new(raw.WINS, raw.LOSSES);
        let win_pct = raw
            .WinPCT
            .filter(|pct| pct.is_finite())
            .unwrap_or_else(|| record.win_pct());
        Ok(StandingsRow {
            team_id: raw.TeamID,
            team_city: raw.TeamCity.trim().to_string(),
            team_name: raw.TeamName.trim().to_string(),
            conference,
            playoff_rank: raw.PlayoffRank,
            record,
            win_pct,
            last_ten: raw.L10.unwrap_or_default().trim().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Conference tables and tiers
// ---------------------------------------------------------------------------

/// Where a team's conference position leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayoffTier {
    /// Seeds 1-6: direct playoff entry.
    Guaranteed,
    /// Seeds 7-8: top of the play-in.
    Likely,
    /// Seeds 9-10: play-in tournament.
    PlayIn,
    Outside,
}

impl PlayoffTier {
    /// Tier for a zero-based position in a sorted conference table.
    pub fn for_position(index: usize) -> Self {
        match index {
            0..=5 => PlayoffTier::Guaranteed,
            6..=7 => PlayoffTier::Likely,
            8..=9 => PlayoffTier::PlayIn,
            _ => PlayoffTier::Outside,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlayoffTier::Guaranteed => "playoffs",
            PlayoffTier::Likely => "likely",
            PlayoffTier::PlayIn => "play-in",
            PlayoffTier::Outside => "outside",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTeam {
    /// One-based position within the conference table.
    pub position: usize,
    pub tier: PlayoffTier,
    pub row: StandingsRow,
}

/// Filter to one conference and order by wins (desc), then playoff rank (asc).
pub fn conference_table(rows: &[StandingsRow], conference: Conference) -> Vec<RankedTeam> {
    let mut teams: Vec<&StandingsRow> = rows
        .iter()
        .filter(|r| r.conference == conference)
        .collect();
    teams.sort_by(|a, b| {
        b.record
            .wins
            .cmp(&a.record.wins)
            .then(a.playoff_rank.cmp(&b.playoff_rank))
    });
    teams
        .into_iter()
        .enumerate()
        .map(|(i, row)| RankedTeam {
            position: i + 1,
            tier: PlayoffTier::for_position(i),
            row: row.clone(),
        })
        .collect()
}

pub fn find_team<'a>(rows: &'a [StandingsRow], query: &str) -> Option<&'a StandingsRow> {
    rows.iter().find(|r| r.matches(query))
}

// ---------------------------------------------------------------------------
// CSV snapshots
// ---------------------------------------------------------------------------

/// Read standings from any CSV source with stats-site column names. Rows that
/// fail to parse are skipped with a warning; a broken header is an error.
pub fn load_snapshot_from_reader<R: Read>(rdr: R) -> Result<Vec<StandingsRow>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawStandingsRow>() {
        match result {
            Ok(raw) => {
                let team = raw.TeamName.clone();
                match StandingsRow::try_from(raw) {
                    Ok(row) => rows.push(row),
                    Err(e) => warn!("skipping standings row for '{}': {}", team.trim(), e),
                }
            }
            Err(e) => {
                warn!("skipping malformed standings row: {}", e);
            }
        }
    }
    Ok(rows)
}

pub fn load_snapshot(path: &Path) -> Result<Vec<StandingsRow>, StandingsError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| StandingsError::Io {
        path: display.clone(),
        source: e,
    })?;
    load_snapshot_from_reader(file).map_err(|e| StandingsError::Csv {
        path: display,
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
