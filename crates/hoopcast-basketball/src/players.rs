// Player statistics: per-game averages derived from season totals, plus the
// filters and summaries the player explorer offers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Raw totals
// ---------------------------------------------------------------------------

/// A league-leaders row (season totals). All-time tables omit the team
/// columns and name the player column PLAYER_NAME.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[allow(non_snake_case)]
pub struct PlayerTotals {
    pub PLAYER_ID: u32,
    #[serde(alias = "PLAYER_NAME")]
    pub PLAYER: String,
    #[serde(default)]
    pub TEAM_ID: Option<u32>,
    #[serde(default)]
    pub TEAM: Option<String>,
    pub GP: u32,
    pub PTS: f64,
    pub REB: f64,
    pub AST: f64,
}

// ---------------------------------------------------------------------------
// Per-game lines
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerLine {
    pub player_id: u32,
    pub name: String,
    pub team_id: Option<u32>,
    pub team: Option<String>,
    pub games: u32,
    pub ppg: f64,
    pub rpg: f64,
    pub apg: f64,
}

impl PlayerLine {
    pub fn stat(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Ppg => self.ppg,
            Stat::Rpg => self.rpg,
            Stat::Apg => self.apg,
        }
    }
}

impl From<&PlayerTotals> for PlayerLine {
    fn from(totals: &PlayerTotals) -> Self {
        let per_game = |total: f64| {
            if totals.GP == 0 {
                0.0
            } else {
                total / f64::from(totals.GP)
            }
        };
        PlayerLine {
            player_id: totals.PLAYER_ID,
            name: totals.PLAYER.trim().to_string(),
            team_id: totals.TEAM_ID,
            team: totals.TEAM.as_ref().map(|t| t.trim().to_string()),
            games: totals.GP,
            ppg: per_game(totals.PTS),
            rpg: per_game(totals.REB),
            apg: per_game(totals.AST),
        }
    }
}

pub fn per_game_lines(totals: &[PlayerTotals]) -> Vec<PlayerLine> {
    totals.iter().map(PlayerLine::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stat {
    Ppg,
    Rpg,
    Apg,
}

impl Stat {
    pub const ALL: [Stat; 3] = [Stat::Ppg, Stat::Rpg, Stat::Apg];

    pub fn label(&self) -> &'static str {
        match self {
            Stat::Ppg => "PPG",
            Stat::Rpg => "RPG",
            Stat::Apg => "APG",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stat `{0}` (expected ppg, rpg, or apg)")]
pub struct StatParseError(pub String);

impl FromStr for Stat {
    type Err = StatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ppg" | "pts" | "points" => Ok(Stat::Ppg),
            "rpg" | "reb" | "rebounds" => Ok(Stat::Rpg),
            "apg" | "ast" | "assists" => Ok(Stat::Apg),
            _ => Err(StatParseError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

pub fn filter_team(lines: &[PlayerLine], team_id: u32) -> Vec<PlayerLine> {
    lines
        .iter()
        .filter(|l| l.team_id == Some(team_id))
        .cloned()
        .collect()
}

/// Top `n` players by `stat`, descending. Ties keep source order.
pub fn top_by(lines: &[PlayerLine], stat: Stat, n: usize) -> Vec<PlayerLine> {
    let mut sorted = lines.to_vec();
    sorted.sort_by(|a, b| b.stat(stat).total_cmp(&a.stat(stat)));
    sorted.truncate(n);
    sorted
}

pub fn find_player<'a>(lines: &'a [PlayerLine], name: &str) -> Option<&'a PlayerLine> {
    let name = name.trim();
    lines.iter().find(|l| l.name.eq_ignore_ascii_case(name))
}

/// Side-by-side per-game numbers for two players.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub left: PlayerLine,
    pub right: PlayerLine,
}

impl Comparison {
    /// `(stat, left, right)` for each per-game stat.
    pub fn rows(&self) -> Vec<(Stat, f64, f64)> {
        Stat::ALL
            .iter()
            .map(|&s| (s, self.left.stat(s), self.right.stat(s)))
            .collect()
    }
}

pub fn compare(lines: &[PlayerLine], left: &str, right: &str) -> Option<Comparison> {
    Some(Comparison {
        left: find_player(lines, left)?.clone(),
        right: find_player(lines, right)?.clone(),
    })
}

// ---------------------------------------------------------------------------
// Distributions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub low: f64,
    pub high: f64,
    pub count: usize,
}

/// Five-number summary plus mean and an equal-width histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub stat: Stat,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub bins: Vec<HistogramBin>,
}

/// Linear-interpolated quantile of pre-sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Returns `None` for an empty slice or `bin_count == 0`.
pub fn distribution(lines: &[PlayerLine], stat: Stat, bin_count: usize) -> Option<Distribution> {
    if lines.is_empty() || bin_count == 0 {
        return None;
    }
    let mut values: Vec<f64> = lines.iter().map(|l| l.stat(stat)).collect();
    values.sort_by(f64::total_cmp);

    let min = values[0];
    let max = values[values.len() - 1];
    let width = (max - min) / bin_count as f64;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            low: min + width * i as f64,
            high: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for v in &values {
        let idx = if width > 0.0 {
            (((v - min) / width) as usize).min(bin_count - 1)
        } else {
            0
        };
        bins[idx].count += 1;
    }

    Some(Distribution {
        stat,
        count: values.len(),
        min,
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max,
        mean: values.iter().sum::<f64>() / values.len() as f64,
        bins,
    })
}

// ---------------------------------------------------------------------------
// Team summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSummary {
    pub average: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TeamSummary {
    pub players: usize,
    pub ppg: StatSummary,
    pub rpg: StatSummary,
    pub apg: StatSummary,
}

/// Average and best per-game numbers across a (team-filtered) roster.
pub fn team_summary(lines: &[PlayerLine]) -> Option<TeamSummary> {
    if lines.is_empty() {
        return None;
    }
    let summarize = |stat: Stat| {
        let values = lines.iter().map(|l| l.stat(stat));
        StatSummary {
            average: values.clone().sum::<f64>() / lines.len() as f64,
            max: values.fold(f64::NEG_INFINITY, f64::max),
        }
    };
    Some(TeamSummary {
        players: lines.len(),
        ppg: summarize(Stat::Ppg),
        rpg: summarize(Stat::Rpg),
        apg: summarize(Stat::Apg),
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
