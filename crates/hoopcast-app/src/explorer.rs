// Player explorer: per-game lines for one season, with the leaderboard,
// head-to-head, distribution, and team-summary views built on top.

use tracing::info;

use hoopcast_basketball::players::{
    compare, distribution, filter_team, per_game_lines, team_summary, top_by, Comparison,
    Distribution, PlayerLine, PlayerTotals, Stat, TeamSummary,
};
use hoopcast_basketball::season::Season;

use crate::source::{SourceError, StatsSource};

pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

#[derive(Debug, Clone)]
pub struct PlayerExplorer {
    season: Season,
    lines: Vec<PlayerLine>,
}

impl PlayerExplorer {
    pub async fn load<S: StatsSource + ?Sized>(
        source: &S,
        season: Season,
    ) -> Result<Self, SourceError> {
        let totals = source.league_leaders(season).await?;
        let explorer = Self::from_totals(season, &totals);
        info!(
            "Loaded {} player lines for {}",
            explorer.lines.len(),
            season
        );
        Ok(explorer)
    }

    pub fn from_totals(season: Season, totals: &[PlayerTotals]) -> Self {
        Self {
            season,
            lines: per_game_lines(totals),
        }
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn lines(&self) -> &[PlayerLine] {
        &self.lines
    }

    /// Explorer narrowed to one team's roster.
    pub fn for_team(&self, team_id: u32) -> Self {
        Self {
            season: self.season,
            lines: filter_team(&self.lines, team_id),
        }
    }

    pub fn top(&self, stat: Stat, n: usize) -> Vec<PlayerLine> {
        top_by(&self.lines, stat, n)
    }

    pub fn compare(&self, left: &str, right: &str) -> Option<Comparison> {
        compare(&self.lines, left, right)
    }

    pub fn distribution(&self, stat: Stat) -> Option<Distribution> {
        distribution(&self.lines, stat, DEFAULT_HISTOGRAM_BINS)
    }

    pub fn team_summary(&self) -> Option<TeamSummary> {
        team_summary(&self.lines)
    }
}
