// Subcommand implementations. Each one resolves its inputs against the loaded
// config, calls into the app layer, and renders the result.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Local;
use tracing::info;

use hoopcast_app::cached::CachedSource;
use hoopcast_app::client::NbaStatsClient;
use hoopcast_app::explorer::PlayerExplorer;
use hoopcast_app::race::PlayoffRace;
use hoopcast_app::source::StatsSource;
use hoopcast_basketball::odds::OddsEstimator;
use hoopcast_basketball::outlook::{gauge_band, Outlook};
use hoopcast_basketball::players::Stat;
use hoopcast_basketball::record::TeamRecord;
use hoopcast_basketball::season::Season;
use hoopcast_basketball::standings::{load_snapshot, Conference};
use hoopcast_basketball::teams;
use hoopcast_core::config::Config;

use crate::render::{self, OutputMode};

// ---------------------------------------------------------------------------
// Shared setup
// ---------------------------------------------------------------------------

fn source(config: &Config) -> anyhow::Result<CachedSource<NbaStatsClient>> {
    let client =
        NbaStatsClient::from_config(&config.api).context("failed to build stats client")?;
    Ok(CachedSource::from_config(client, &config.cache))
}

/// Explicit `--season`, else `[season] current` from config, else today's.
pub fn resolve_season(explicit: Option<Season>, config: &Config) -> anyhow::Result<Season> {
    if let Some(season) = explicit {
        return Ok(season);
    }
    if let Some(current) = &config.season.current {
        return current
            .parse()
            .with_context(|| format!("invalid [season] current = {current:?}"));
    }
    Ok(Season::current(Local::now().date_naive()))
}

pub fn estimator(config: &Config, threshold: Option<u32>) -> anyhow::Result<OddsEstimator> {
    let threshold = threshold.unwrap_or(config.season.playoff_threshold);
    OddsEstimator::new(config.season.total_games, threshold).context("invalid season settings")
}

// ---------------------------------------------------------------------------
// odds
// ---------------------------------------------------------------------------

pub struct OddsArgs {
    pub wins: u32,
    pub losses: u32,
    pub remaining: Option<u32>,
    pub win_prob: f64,
    pub threshold: Option<u32>,
}

pub fn odds(args: OddsArgs, config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let estimator = estimator(config, args.threshold)?;
    let record = TeamRecord::new(args.wins, args.losses);
    let remaining = match args.remaining {
        Some(r) => r,
        None => estimator.remaining_for(record)?.remaining_games(),
    };
    let result = estimator.estimate_with_remaining(record, remaining, args.win_prob)?;
    info!(
        "odds for {} with {} left at p={}: {:.2}%",
        record, remaining, args.win_prob, result.probability_percent
    );

    if mode == OutputMode::Json {
        return render::print_json(&result);
    }

    let outlook = Outlook::from_percent(result.probability_percent);
    let band = gauge_band(result.probability_percent);
    render::section(&format!(
        "{} with {} games left, p(win) = {:.3}, threshold {} wins",
        record,
        remaining,
        args.win_prob,
        estimator.threshold()
    ));
    println!(
        "  Playoff odds:  {:.1}% [{}]",
        result.probability_percent, band.color
    );
    println!("  Best case:     {}", result.best_case_record);
    println!("  Worst case:    {}", result.worst_case_record);
    println!("  Expected:      {}", result.expected_record);
    println!();
    println!("  {}", outlook.narrative("This team"));
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// race
// ---------------------------------------------------------------------------

pub struct RaceArgs {
    pub conference: Conference,
    pub season: Option<Season>,
    pub team: Option<String>,
    pub win_prob: Option<f64>,
    pub threshold: Option<u32>,
    pub snapshot: Option<PathBuf>,
}

pub async fn race(args: RaceArgs, config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let season = resolve_season(args.season, config)?;
    let estimator = estimator(config, args.threshold)?;

    let race = match &args.snapshot {
        Some(path) => {
            let rows = load_snapshot(path)?;
            info!("Loaded {} standings rows from {}", rows.len(), path.display());
            PlayoffRace::from_rows(&rows, estimator, season, args.conference)?
        }
        None => {
            let source = source(config)?;
            PlayoffRace::build(&source, estimator, season, args.conference)
                .await
                .with_context(|| format!("failed to build {} race", args.conference))?
        }
    };

    let threshold = race.estimator().threshold();
    if let Some(team) = &args.team {
        let outlook = race.analyze(team, args.win_prob)?;
        if mode == OutputMode::Json {
            return render::print_json(&outlook);
        }
        render::print_outlook(&outlook, threshold);
        return Ok(());
    }

    let outlooks = race.analyze_all(args.win_prob)?;
    if mode == OutputMode::Json {
        return render::print_json(&outlooks);
    }
    render::section(&format!("{} standings, {}", race.conference(), race.season()));
    render::print_table(race.table().iter().map(render::StandingsLine::from).collect());
    render::section(&format!("Playoff odds (threshold {} wins)", threshold));
    render::print_table(outlooks.iter().map(render::OutlookLine::from).collect());
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// players
// ---------------------------------------------------------------------------

pub struct PlayersArgs {
    pub season: Option<Season>,
    pub team: Option<String>,
    pub top: usize,
    pub stat: Stat,
    pub compare: Option<Vec<String>>,
    pub distribution: bool,
}

pub async fn players(args: PlayersArgs, config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let season = resolve_season(args.season, config)?;
    let source = source(config)?;
    let mut explorer = PlayerExplorer::load(&source, season)
        .await
        .with_context(|| format!("failed to load player stats for {season}"))?;

    let mut team_name = None;
    if let Some(query) = &args.team {
        let Some(team) = teams::search(query) else {
            bail!("unknown team {query:?}");
        };
        explorer = explorer.for_team(team.id);
        team_name = Some(team.full_name);
    }

    if let Some(names) = &args.compare {
        let [left, right] = names.as_slice() else {
            bail!("--compare takes exactly two player names");
        };
        let Some(cmp) = explorer.compare(left, right) else {
            bail!("could not find both {left:?} and {right:?} in {season}");
        };
        if mode == OutputMode::Json {
            return render::print_json(&cmp);
        }
        render::print_comparison(&cmp);
        return Ok(());
    }

    if args.distribution {
        let Some(dist) = explorer.distribution(args.stat) else {
            bail!("no players to summarize");
        };
        if mode == OutputMode::Json {
            return render::print_json(&dist);
        }
        render::print_distribution(&dist);
        return Ok(());
    }

    let top = explorer.top(args.stat, args.top);
    if mode == OutputMode::Json {
        return render::print_json(&top);
    }
    if let (Some(name), Some(summary)) = (team_name, explorer.team_summary()) {
        render::print_team_summary(name, &summary);
    }
    render::section(&format!("Top {} by {} ({})", args.top, args.stat, season));
    render::print_table(top.iter().map(render::PlayerRow::from).collect());
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// scores
// ---------------------------------------------------------------------------

pub async fn scores(config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    let source = source(config)?;
    let board = source
        .scoreboard()
        .await
        .context("failed to fetch scoreboard")?;

    if mode == OutputMode::Json {
        return render::print_json(&board);
    }
    render::section(&format!("Games for {}", board.game_date));
    if board.is_empty() {
        println!("  No games scheduled today.");
        println!();
        return Ok(());
    }
    render::print_table(board.games.iter().map(render::GameRow::from).collect());
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// teams
// ---------------------------------------------------------------------------

pub fn list_teams(conference: Option<Conference>, geojson: bool, mode: OutputMode) -> anyhow::Result<()> {
    if geojson {
        return render::print_json(&teams::locations_geojson());
    }
    let list: Vec<&teams::Team> = match conference {
        Some(c) => teams::in_conference(c).collect(),
        None => teams::TEAMS.iter().collect(),
    };
    if mode == OutputMode::Json {
        return render::print_json(&list);
    }
    render::print_table(list.into_iter().map(render::TeamRow::from).collect());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoopcast_core::config::{ApiConfig, CacheConfig, SeasonConfig};

    fn config(current: Option<&str>) -> Config {
        Config {
            season: SeasonConfig {
                total_games: 82,
                playoff_threshold: 43,
                current: current.map(str::to_string),
            },
            api: ApiConfig {
                stats_base_url: "https://stats.example.test/stats".into(),
                live_base_url: "https://cdn.example.test/liveData".into(),
                user_agent: "hoopcast-test".into(),
                timeout_secs: 5,
            },
            cache: CacheConfig {
                standings_ttl_secs: 60,
                leaders_ttl_secs: 60,
                scoreboard_ttl_secs: 5,
            },
        }
    }

    #[test]
    fn explicit_season_wins_over_config() {
        let cfg = config(Some("2021-22"));
        assert_eq!(
            resolve_season(Some(Season::Year(2023)), &cfg).unwrap(),
            Season::Year(2023)
        );
        assert_eq!(resolve_season(None, &cfg).unwrap(), Season::Year(2021));
    }

    #[test]
    fn bad_configured_season_is_an_error() {
        assert!(resolve_season(None, &config(Some("someday"))).is_err());
    }

    #[test]
    fn threshold_override_applies() {
        let cfg = config(None);
        assert_eq!(estimator(&cfg, None).unwrap().threshold(), 43);
        assert_eq!(estimator(&cfg, Some(41)).unwrap().threshold(), 41);
        assert!(estimator(&cfg, Some(0)).is_err());
    }
}
