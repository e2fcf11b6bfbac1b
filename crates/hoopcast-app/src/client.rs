// HTTP client for the NBA stats site and the live-data CDN.
//
// The stats site rejects requests that don't look like they come from its own
// web pages, so every request carries the browser-style headers below.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use hoopcast_basketball::players::PlayerTotals;
use hoopcast_basketball::scoreboard::{Scoreboard, ScoreboardResponse};
use hoopcast_basketball::season::Season;
use hoopcast_basketball::standings::{RawStandingsRow, StandingsRow};
use hoopcast_core::config::ApiConfig;

use crate::resultset::StatsResponse;
use crate::source::{SourceError, StatsSource};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const LEAGUE_ID: &str = "00";
const REGULAR_SEASON: &str = "Regular Season";

const STANDINGS_ENDPOINT: &str = "leaguestandingsv3";
const LEADERS_ENDPOINT: &str = "leagueleaders";
const SCOREBOARD_PATH: &str = "scoreboard/todaysScoreboard_00.json";

pub const STANDINGS_COLUMNS: &[&str] = &[
    "TeamID",
    "TeamCity",
    "TeamName",
    "Conference",
    "PlayoffRank",
    "WINS",
    "LOSSES",
];

pub const LEADERS_COLUMNS: &[&str] = &["PLAYER_ID", "GP", "PTS", "REB", "AST"];

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

pub fn standings_params(season: Season) -> Result<Vec<(&'static str, String)>, SourceError> {
    if season == Season::AllTime {
        return Err(SourceError::Unsupported(
            "standings exist only for a single season".into(),
        ));
    }
    Ok(vec![
        ("LeagueID", LEAGUE_ID.to_string()),
        ("Season", season.to_string()),
        ("SeasonType", REGULAR_SEASON.to_string()),
    ])
}

pub fn leaders_params(season: Season) -> Vec<(&'static str, String)> {
    vec![
        ("LeagueID", LEAGUE_ID.to_string()),
        ("PerMode", "Totals".to_string()),
        ("Scope", "S".to_string()),
        ("Season", season.to_string()),
        ("SeasonType", REGULAR_SEASON.to_string()),
        ("StatCategory", "PTS".to_string()),
        ("ActiveFlag", String::new()),
    ]
}

// ---------------------------------------------------------------------------
// Response decoding (separate from I/O so fixtures can exercise it)
// ---------------------------------------------------------------------------

pub fn decode_standings(body: &[u8]) -> Result<Vec<StandingsRow>, SourceError> {
    let response: StatsResponse = decode(STANDINGS_ENDPOINT, body)?;
    let raw: Vec<RawStandingsRow> = response
        .table_or_first("Standings")?
        .records(STANDINGS_COLUMNS)?;
    let mut rows = Vec::with_capacity(raw.len());
    for r in raw {
        let team = format!("{} {}", r.TeamCity, r.TeamName);
        match StandingsRow::try_from(r) {
            Ok(row) => rows.push(row),
            Err(e) => warn!("skipping standings row for {}: {}", team, e),
        }
    }
    Ok(rows)
}

pub fn decode_leaders(body: &[u8]) -> Result<Vec<PlayerTotals>, SourceError> {
    let response: StatsResponse = decode(LEADERS_ENDPOINT, body)?;
    let table = response.table_or_first("LeagueLeaders")?;
    if !table.headers.iter().any(|h| h == "PLAYER" || h == "PLAYER_NAME") {
        return Err(SourceError::Schema {
            table: table.name.clone(),
            message: "missing columns: PLAYER".into(),
        });
    }
    table.records(LEADERS_COLUMNS)
}

pub fn decode_scoreboard(body: &[u8]) -> Result<Scoreboard, SourceError> {
    let response: ScoreboardResponse = decode("scoreboard", body)?;
    Ok(response.scoreboard)
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<T, SourceError> {
    serde_json::from_slice(body).map_err(|e| SourceError::Decode {
        endpoint: endpoint.to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// NbaStatsClient
// ---------------------------------------------------------------------------

pub struct NbaStatsClient {
    http: reqwest::Client,
    stats_base_url: String,
    live_base_url: String,
}

impl NbaStatsClient {
    pub fn from_config(api: &ApiConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.nba.com"));
        headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
        headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));

        let http = reqwest::Client::builder()
            .user_agent(api.user_agent.as_str())
            .default_headers(headers)
            .timeout(api.timeout())
            .build()
            .map_err(|e| SourceError::Http {
                endpoint: "client".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            stats_base_url: api.stats_base_url.trim_end_matches('/').to_string(),
            live_base_url: api.live_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_bytes(
        &self,
        endpoint: &str,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<u8>, SourceError> {
        debug!(endpoint, url, "GET");
        let http_err = |e| SourceError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        };
        let response = self.http.get(url).query(query).send().await.map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "upstream returned an error status");
            return Err(SourceError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(http_err)?;
        debug!(endpoint, bytes = body.len(), "response received");
        Ok(body.to_vec())
    }

    fn stats_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.stats_base_url, endpoint)
    }
}

#[async_trait]
impl StatsSource for NbaStatsClient {
    async fn standings(&self, season: Season) -> Result<Vec<StandingsRow>, SourceError> {
        let params = standings_params(season)?;
        let body = self
            .get_bytes(STANDINGS_ENDPOINT, &self.stats_url(STANDINGS_ENDPOINT), &params)
            .await?;
        let rows = decode_standings(&body)?;
        info!("Fetched standings for {}: {} teams", season, rows.len());
        Ok(rows)
    }

    async fn league_leaders(&self, season: Season) -> Result<Vec<PlayerTotals>, SourceError> {
        let params = leaders_params(season);
        let body = self
            .get_bytes(LEADERS_ENDPOINT, &self.stats_url(LEADERS_ENDPOINT), &params)
            .await?;
        let totals = decode_leaders(&body)?;
        info!("Fetched league leaders for {}: {} players", season, totals.len());
        Ok(totals)
    }

    async fn scoreboard(&self) -> Result<Scoreboard, SourceError> {
        let url = format!("{}/{}", self.live_base_url, SCOREBOARD_PATH);
        let body = self.get_bytes("scoreboard", &url, &[]).await?;
        let board = decode_scoreboard(&body)?;
        info!("Fetched scoreboard for {}: {} games", board.game_date, board.games.len());
        Ok(board)
    }
}
