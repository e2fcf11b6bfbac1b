// The seam between reports and wherever statistics come from.

use async_trait::async_trait;
use thiserror::Error;

use hoopcast_basketball::players::PlayerTotals;
use hoopcast_basketball::scoreboard::Scoreboard;
use hoopcast_basketball::season::Season;
use hoopcast_basketball::standings::StandingsRow;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },

    #[error("unexpected {table} schema: {message}")]
    Schema { table: String, message: String },

    #[error("unsupported request: {0}")]
    Unsupported(String),
}

/// Anything that can answer the three questions the reports ask.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// League-wide standings for a regular season.
    async fn standings(&self, season: Season) -> Result<Vec<StandingsRow>, SourceError>;

    /// Season (or all-time) totals for the league's scorers.
    async fn league_leaders(&self, season: Season) -> Result<Vec<PlayerTotals>, SourceError>;

    /// Today's games.
    async fn scoreboard(&self) -> Result<Scoreboard, SourceError>;
}
