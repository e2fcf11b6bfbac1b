// Today's scoreboard as published by the live-data CDN.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreboardResponse {
    pub scoreboard: Scoreboard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoreboard {
    #[serde(default)]
    pub game_date: String,
    #[serde(default)]
    pub games: Vec<Game>,
}

impl Scoreboard {
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn live_games(&self) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(|g| g.game_status == GameStatus::Live)
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GameStatus {
    Upcoming,
    Live,
    Final,
}

impl TryFrom<u8> for GameStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(GameStatus::Upcoming),
            2 => Ok(GameStatus::Live),
            3 => Ok(GameStatus::Final),
            other => Err(format!("unknown game status code {other}")),
        }
    }
}

impl From<GameStatus> for u8 {
    fn from(status: GameStatus) -> u8 {
        match status {
            GameStatus::Upcoming => 1,
            GameStatus::Live => 2,
            GameStatus::Final => 3,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameStatus::Upcoming => "Upcoming",
            GameStatus::Live => "LIVE",
            GameStatus::Final => "Final",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_id: String,
    pub game_status: GameStatus,
    #[serde(default)]
    pub game_status_text: String,
    #[serde(default)]
    pub period: u32,
    #[serde(default)]
    pub game_clock: String,
    pub home_team: GameTeam,
    pub away_team: GameTeam,
    #[serde(default)]
    pub game_leaders: Option<GameLeaders>,
}

impl Game {
    pub fn has_started(&self) -> bool {
        self.game_status != GameStatus::Upcoming
    }

    /// "Q3 5:21" while live, otherwise the published status text.
    pub fn clock_label(&self) -> String {
        match self.game_status {
            GameStatus::Live if self.period > 0 => {
                let clock = format_clock(&self.game_clock);
                if clock.is_empty() {
                    format!("Q{}", self.period)
                } else {
                    format!("Q{} {}", self.period, clock)
                }
            }
            _ => self.game_status_text.trim().to_string(),
        }
    }

    /// Leaders worth showing: the game has tipped off and at least one side
    /// has a named leader.
    pub fn visible_leaders(&self) -> Option<&GameLeaders> {
        if !self.has_started() {
            return None;
        }
        self.game_leaders.as_ref().filter(|l| {
            !l.home_leaders.name.trim().is_empty() || !l.away_leaders.name.trim().is_empty()
        })
    }
}

/// The live feed sends ISO-8601 durations ("PT05M21.00S"); older payloads
/// send plain "5:21". Anything else passes through untouched.
fn format_clock(raw: &str) -> String {
    let raw = raw.trim();
    let Some(rest) = raw.strip_prefix("PT") else {
        return raw.to_string();
    };
    let Some((minutes, rest)) = rest.split_once('M') else {
        return raw.to_string();
    };
    let seconds = rest.trim_end_matches('S');
    let whole_seconds = seconds.split('.').next().unwrap_or("0");
    match (minutes.parse::<u32>(), whole_seconds.parse::<u32>()) {
        (Ok(m), Ok(s)) => format!("{m}:{s:02}"),
        _ => raw.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTeam {
    #[serde(default)]
    pub team_id: u32,
    pub team_city: String,
    pub team_name: String,
    #[serde(default)]
    pub team_tricode: String,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub score: u32,
}

impl GameTeam {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.team_city, self.team_name)
    }

    pub fn record(&self) -> crate::record::TeamRecord {
        crate::record::TeamRecord::new(self.wins, self.losses)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLeaders {
    pub home_leaders: Leader,
    pub away_leaders: Leader,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub rebounds: u32,
    #[serde(default)]
    pub assists: u32,
}

impl Leader {
    pub fn stat_line(&self) -> String {
        format!(
            "{} PTS | {} REB | {} AST",
            self.points, self.rebounds, self.assists
        )
    }
}
