// Integration tests for the data-fetch layer and reports.
//
// Recorded stats-site responses under tests/fixtures drive the decoders, and
// a counting in-memory source stands in for the network so the cache and the
// reports can be exercised end to end.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use hoopcast_app::cached::CachedSource;
use hoopcast_app::client::{decode_leaders, decode_scoreboard, decode_standings};
use hoopcast_app::explorer::PlayerExplorer;
use hoopcast_app::race::{PlayoffRace, RaceError};
use hoopcast_app::source::{SourceError, StatsSource};
use hoopcast_basketball::odds::OddsEstimator;
use hoopcast_basketball::outlook::Outlook;
use hoopcast_basketball::players::{PlayerTotals, Stat};
use hoopcast_basketball::scoreboard::{GameStatus, Scoreboard};
use hoopcast_basketball::season::Season;
use hoopcast_basketball::standings::{Conference, PlayoffTier, StandingsRow};

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

fn season() -> Season {
    Season::Year(2023)
}

/// In-memory source serving the fixtures and counting upstream calls.
#[derive(Default)]
struct FixtureSource {
    standings_calls: AtomicUsize,
    leaders_calls: AtomicUsize,
    scoreboard_calls: AtomicUsize,
}

#[async_trait]
impl StatsSource for FixtureSource {
    async fn standings(&self, season: Season) -> Result<Vec<StandingsRow>, SourceError> {
        self.standings_calls.fetch_add(1, Ordering::SeqCst);
        if season == Season::AllTime {
            return Err(SourceError::Unsupported("all-time standings".into()));
        }
        decode_standings(&fixture("standings.json"))
    }

    async fn league_leaders(&self, _season: Season) -> Result<Vec<PlayerTotals>, SourceError> {
        self.leaders_calls.fetch_add(1, Ordering::SeqCst);
        decode_leaders(&fixture("leaders.json"))
    }

    async fn scoreboard(&self) -> Result<Scoreboard, SourceError> {
        self.scoreboard_calls.fetch_add(1, Ordering::SeqCst);
        decode_scoreboard(&fixture("scoreboard.json"))
    }
}

/// Lets a test keep a handle on the counters after the source moves into a
/// `CachedSource`.
struct Shared(Arc<FixtureSource>);

#[async_trait]
impl StatsSource for Shared {
    async fn standings(&self, season: Season) -> Result<Vec<StandingsRow>, SourceError> {
        self.0.standings(season).await
    }

    async fn league_leaders(&self, season: Season) -> Result<Vec<PlayerTotals>, SourceError> {
        self.0.league_leaders(season).await
    }

    async fn scoreboard(&self) -> Result<Scoreboard, SourceError> {
        self.0.scoreboard().await
    }
}

fn cached(
    standings: u64,
    leaders: u64,
    scoreboard: u64,
) -> (CachedSource<Shared>, Arc<FixtureSource>) {
    let counters = Arc::new(FixtureSource::default());
    let source = CachedSource::new(
        Shared(Arc::clone(&counters)),
        Duration::from_secs(standings),
        Duration::from_secs(leaders),
        Duration::from_secs(scoreboard),
    );
    (source, counters)
}

// ===========================================================================
// Decoding recorded responses
// ===========================================================================

#[test]
fn standings_fixture_decodes_and_skips_unknown_conference() {
    let rows = decode_standings(&fixture("standings.json")).unwrap();
    assert_eq!(rows.len(), 10, "the 'Pacific' row is dropped");

    let lakers = rows.iter().find(|r| r.team_name == "Lakers").unwrap();
    assert_eq!(lakers.conference, Conference::West);
    assert_eq!(lakers.record.wins, 37);
    assert_eq!(lakers.record.losses, 31);
    assert_eq!(lakers.last_ten, "6-4");
}

#[test]
fn leaders_fixture_decodes_and_skips_malformed_rows() {
    let totals = decode_leaders(&fixture("leaders.json")).unwrap();
    assert_eq!(totals.len(), 6);
    assert_eq!(totals[0].PLAYER, "Luka Doncic");
    assert_eq!(totals[0].TEAM.as_deref(), Some("DAL"));
    assert_eq!(totals[0].GP, 70);
}

#[test]
fn scoreboard_fixture_decodes_statuses_and_leaders() {
    let board = decode_scoreboard(&fixture("scoreboard.json")).unwrap();
    assert_eq!(board.game_date, "2024-03-12");
    assert_eq!(board.games.len(), 3);

    let statuses: Vec<GameStatus> = board.games.iter().map(|g| g.game_status).collect();
    assert_eq!(
        statuses,
        vec![GameStatus::Final, GameStatus::Live, GameStatus::Upcoming]
    );
    assert_eq!(board.live_games().count(), 1);
    assert_eq!(board.games[1].clock_label(), "Q3 5:21");
    assert!(board.games[0].visible_leaders().is_some());
    assert!(board.games[2].visible_leaders().is_none());
}

// ===========================================================================
// Caching
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn standings_are_cached_per_season_until_ttl() {
    let (source, counters) = cached(3600, 3600, 30);

    source.standings(season()).await.unwrap();
    source.standings(season()).await.unwrap();
    assert_eq!(counters.standings_calls.load(Ordering::SeqCst), 1);

    source.standings(Season::Year(2022)).await.unwrap();
    assert_eq!(counters.standings_calls.load(Ordering::SeqCst), 2);

    tokio::time::advance(Duration::from_secs(3600)).await;
    source.standings(season()).await.unwrap();
    assert_eq!(counters.standings_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn scoreboard_expires_before_standings() {
    let (source, counters) = cached(3600, 3600, 30);

    source.scoreboard().await.unwrap();
    source.standings(season()).await.unwrap();
    tokio::time::advance(Duration::from_secs(31)).await;
    source.scoreboard().await.unwrap();
    source.standings(season()).await.unwrap();

    assert_eq!(counters.scoreboard_calls.load(Ordering::SeqCst), 2);
    assert_eq!(counters.standings_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn errors_are_not_cached() {
    let (source, counters) = cached(3600, 3600, 30);

    assert!(source.standings(Season::AllTime).await.is_err());
    assert!(source.standings(Season::AllTime).await.is_err());
    assert_eq!(counters.standings_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn clear_forces_refetch() {
    let (source, counters) = cached(3600, 3600, 30);

    source.league_leaders(season()).await.unwrap();
    source.clear().await;
    source.league_leaders(season()).await.unwrap();
    assert_eq!(counters.leaders_calls.load(Ordering::SeqCst), 2);
}

// ===========================================================================
// Reports
// ===========================================================================

#[tokio::test]
async fn west_race_orders_ties_by_playoff_rank() {
    let source = FixtureSource::default();
    let race = PlayoffRace::build(&source, OddsEstimator::default(), season(), Conference::West)
        .await
        .unwrap();

    let names: Vec<&str> = race
        .table()
        .iter()
        .map(|t| t.row.team_name.as_str())
        .collect();
    assert_eq!(names, vec!["Thunder", "Nuggets", "Lakers", "Warriors"]);
    assert!(race.table().iter().all(|t| t.tier == PlayoffTier::Guaranteed));
}

#[tokio::test]
async fn east_race_outlooks() {
    let source = FixtureSource::default();
    let race = PlayoffRace::build(&source, OddsEstimator::default(), season(), Conference::East)
        .await
        .unwrap();

    let celtics = race.analyze("bos", None).unwrap();
    assert_eq!(celtics.position, 1);
    assert_eq!(celtics.remaining_games, 16);
    assert_eq!(celtics.odds.probability_percent, 100.0);
    assert_eq!(celtics.outlook, Outlook::Excellent);

    let pistons = race.analyze("Detroit Pistons", None).unwrap();
    assert_eq!(pistons.odds.probability_percent, 0.0, "43 wins out of reach");
    assert_eq!(pistons.outlook, Outlook::UphillBattle);

    let all = race.analyze_all(Some(0.5)).unwrap();
    assert_eq!(all.len(), 6);
    for pair in all.windows(2) {
        assert!(
            pair[0].odds.probability_percent >= pair[1].odds.probability_percent,
            "odds follow wins when everyone shares p"
        );
    }
}

#[tokio::test]
async fn race_reports_missing_team_and_source_errors() {
    let source = FixtureSource::default();
    let race = PlayoffRace::build(&source, OddsEstimator::default(), season(), Conference::East)
        .await
        .unwrap();
    assert!(matches!(
        race.analyze("Lakers", None),
        Err(RaceError::TeamNotFound { .. })
    ));

    let err = PlayoffRace::build(
        &source,
        OddsEstimator::default(),
        Season::AllTime,
        Conference::East,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RaceError::Source(SourceError::Unsupported(_))));
}

#[tokio::test]
async fn explorer_views_over_fixture_leaders() {
    let source = FixtureSource::default();
    let explorer = PlayerExplorer::load(&source, season()).await.unwrap();
    assert_eq!(explorer.lines().len(), 6);

    let top = explorer.top(Stat::Rpg, 1);
    assert_eq!(top[0].name, "Nikola Jokic");

    let celtics = explorer.for_team(1610612738);
    assert_eq!(celtics.lines().len(), 2);
    let summary = celtics.team_summary().unwrap();
    assert_eq!(summary.players, 2);

    let cmp = explorer.compare("Luka Doncic", "nikola jokic").unwrap();
    assert_eq!(cmp.left.player_id, 1629029);

    let dist = explorer.distribution(Stat::Ppg).unwrap();
    assert_eq!(dist.count, 6);
    assert!(dist.min <= dist.median && dist.median <= dist.max);
}
