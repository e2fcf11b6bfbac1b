// TTL caching around any `StatsSource`.
//
// Each endpoint gets its own cache so the scoreboard can expire in seconds
// while standings and leaders live for an hour. Locks are never held across
// an upstream fetch; two concurrent misses both fetch and the later insert
// wins.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use hoopcast_basketball::players::PlayerTotals;
use hoopcast_basketball::scoreboard::Scoreboard;
use hoopcast_basketball::season::Season;
use hoopcast_basketball::standings::StandingsRow;
use hoopcast_core::cache::TtlCache;
use hoopcast_core::config::CacheConfig;

use crate::source::{SourceError, StatsSource};

const SCOREBOARD_KEY: &str = "scoreboard:today";

pub struct CachedSource<S> {
    inner: S,
    standings: Mutex<TtlCache<String, Vec<StandingsRow>>>,
    leaders: Mutex<TtlCache<String, Vec<PlayerTotals>>>,
    scoreboard: Mutex<TtlCache<String, Scoreboard>>,
}

impl<S: StatsSource> CachedSource<S> {
    pub fn new(
        inner: S,
        standings_ttl: Duration,
        leaders_ttl: Duration,
        scoreboard_ttl: Duration,
    ) -> Self {
        Self {
            inner,
            standings: Mutex::new(TtlCache::new(standings_ttl)),
            leaders: Mutex::new(TtlCache::new(leaders_ttl)),
            scoreboard: Mutex::new(TtlCache::new(scoreboard_ttl)),
        }
    }

    pub fn from_config(inner: S, cache: &CacheConfig) -> Self {
        Self::new(
            inner,
            cache.standings_ttl(),
            cache.leaders_ttl(),
            cache.scoreboard_ttl(),
        )
    }

    /// Drop every cached response.
    pub async fn clear(&self) {
        self.standings.lock().await.clear();
        self.leaders.lock().await.clear();
        self.scoreboard.lock().await.clear();
    }
}

fn standings_key(season: Season) -> String {
    format!("standings:{}", season.key())
}

fn leaders_key(season: Season) -> String {
    format!("leaders:{}", season.key())
}

#[async_trait]
impl<S: StatsSource> StatsSource for CachedSource<S> {
    async fn standings(&self, season: Season) -> Result<Vec<StandingsRow>, SourceError> {
        let key = standings_key(season);
        if let Some(rows) = self.standings.lock().await.get(&key) {
            debug!(key = %key, "cache hit");
            return Ok(rows);
        }
        let rows = self.inner.standings(season).await?;
        self.standings.lock().await.insert(key, rows.clone());
        Ok(rows)
    }

    async fn league_leaders(&self, season: Season) -> Result<Vec<PlayerTotals>, SourceError> {
        let key = leaders_key(season);
        if let Some(totals) = self.leaders.lock().await.get(&key) {
            debug!(key = %key, "cache hit");
            return Ok(totals);
        }
        let totals = self.inner.league_leaders(season).await?;
        self.leaders.lock().await.insert(key, totals.clone());
        Ok(totals)
    }

    async fn scoreboard(&self) -> Result<Scoreboard, SourceError> {
        let key = SCOREBOARD_KEY.to_string();
        if let Some(board) = self.scoreboard.lock().await.get(&key) {
            debug!(key = %key, "cache hit");
            return Ok(board);
        }
        let board = self.inner.scoreboard().await?;
        self.scoreboard.lock().await.insert(key, board.clone());
        Ok(board)
    }
}
