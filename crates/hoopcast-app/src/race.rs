// Playoff race for one conference.
//
// Combines fetched standings, conference tiers, and the odds estimator into a
// per-team outlook: where the team sits, what it needs, and how likely it is
// to get there.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use hoopcast_basketball::odds::{OddsError, OddsEstimator, OddsResult};
use hoopcast_basketball::outlook::Outlook;
use hoopcast_basketball::record::TeamRecord;
use hoopcast_basketball::season::Season;
use hoopcast_basketball::standings::{
    conference_table, Conference, PlayoffTier, RankedTeam, StandingsRow,
};

use crate::source::{SourceError, StatsSource};

#[derive(Debug, Error)]
pub enum RaceError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("no team matching {query:?} in the {conference} conference")]
    TeamNotFound {
        query: String,
        conference: Conference,
    },

    #[error(transparent)]
    Odds(#[from] OddsError),

    #[error("no standings available for {season}")]
    NoStandings { season: Season },
}

// ---------------------------------------------------------------------------
// TeamOutlook
// ---------------------------------------------------------------------------

/// Everything the race view shows for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOutlook {
    pub team: String,
    pub team_id: u32,
    /// 1-based conference position.
    pub position: usize,
    pub tier: PlayoffTier,
    pub record: TeamRecord,
    pub remaining_games: u32,
    /// Per-game probability fed to the estimator.
    pub win_probability: f64,
    pub odds: OddsResult,
    pub outlook: Outlook,
    pub season_complete: bool,
}

impl TeamOutlook {
    pub fn narrative(&self) -> String {
        self.outlook.narrative(&self.team)
    }

    /// Wins still needed to reach `threshold`; zero once it is reached.
    pub fn wins_needed(&self, threshold: u32) -> u32 {
        threshold.saturating_sub(self.record.wins)
    }
}

// ---------------------------------------------------------------------------
// PlayoffRace
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PlayoffRace {
    season: Season,
    conference: Conference,
    estimator: OddsEstimator,
    table: Vec<RankedTeam>,
}

impl PlayoffRace {
    /// Fetch standings for `season` and rank `conference`.
    pub async fn build<S: StatsSource + ?Sized>(
        source: &S,
        estimator: OddsEstimator,
        season: Season,
        conference: Conference,
    ) -> Result<Self, RaceError> {
        let rows = source.standings(season).await?;
        let race = Self::from_rows(&rows, estimator, season, conference)?;
        info!(
            "Built {} race for {}: {} teams",
            conference,
            season,
            race.table.len()
        );
        Ok(race)
    }

    /// Rank `conference` from standings already in hand (e.g. a CSV snapshot).
    pub fn from_rows(
        rows: &[StandingsRow],
        estimator: OddsEstimator,
        season: Season,
        conference: Conference,
    ) -> Result<Self, RaceError> {
        let table = conference_table(rows, conference);
        if table.is_empty() {
            return Err(RaceError::NoStandings { season });
        }
        Ok(Self {
            season,
            conference,
            estimator,
            table,
        })
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn conference(&self) -> Conference {
        self.conference
    }

    pub fn estimator(&self) -> OddsEstimator {
        self.estimator
    }

    pub fn table(&self) -> &[RankedTeam] {
        &self.table
    }

    /// Outlook for the team matching `team_query` (name, nickname or tricode).
    ///
    /// `win_probability` defaults to the team's current win percentage.
    pub fn analyze(
        &self,
        team_query: &str,
        win_probability: Option<f64>,
    ) -> Result<TeamOutlook, RaceError> {
        let ranked = self
            .table
            .iter()
            .find(|t| t.row.matches(team_query))
            .ok_or_else(|| RaceError::TeamNotFound {
                query: team_query.to_string(),
                conference: self.conference,
            })?;
        self.outlook_for(ranked, win_probability)
    }

    /// Outlook for every team in the conference, in table order.
    ///
    /// An invalid `win_probability` fails the whole call. A team whose row
    /// can't be estimated (e.g. more games played than the season holds) is
    /// skipped with a warning.
    pub fn analyze_all(&self, win_probability: Option<f64>) -> Result<Vec<TeamOutlook>, RaceError> {
        if let Some(p) = win_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(RaceError::Odds(OddsError::InvalidArgument {
                    field: "win_probability",
                    message: format!("must be between 0.0 and 1.0 inclusive, got {p}"),
                }));
            }
        }

        let mut outlooks = Vec::with_capacity(self.table.len());
        for ranked in &self.table {
            match self.outlook_for(ranked, win_probability) {
                Ok(outlook) => outlooks.push(outlook),
                Err(e) => warn!("skipping {}: {}", ranked.row.display_name(), e),
            }
        }
        Ok(outlooks)
    }

    fn outlook_for(
        &self,
        ranked: &RankedTeam,
        win_probability: Option<f64>,
    ) -> Result<TeamOutlook, RaceError> {
        let row = &ranked.row;
        let p = win_probability.unwrap_or_else(|| default_win_probability(row));
        let schedule = self.estimator.remaining_for(row.record)?;
        let odds =
            self.estimator
                .estimate_with_remaining(row.record, schedule.remaining_games(), p)?;
        debug!(
            team = %row.display_name(),
            remaining = schedule.remaining_games(),
            p,
            percent = odds.probability_percent,
            "estimated playoff odds"
        );
        Ok(TeamOutlook {
            team: row.display_name(),
            team_id: row.team_id,
            position: ranked.position,
            tier: ranked.tier,
            record: row.record,
            remaining_games: schedule.remaining_games(),
            win_probability: p,
            outlook: Outlook::from_percent(odds.probability_percent),
            odds,
            season_complete: schedule.is_complete(),
        })
    }
}

/// Current win percentage, clamped into the estimator's domain.
fn default_win_probability(row: &StandingsRow) -> f64 {
    if row.win_pct.is_finite() {
        row.win_pct.clamp(0.0, 1.0)
    } else {
        row.record.win_pct()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
