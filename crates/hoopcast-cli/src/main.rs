// hoopcast entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Initialize tracing (log to file, not terminal)
// 3. Load config (copying defaults/ into config/ on first run)
// 4. Dispatch the subcommand

mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use hoopcast_basketball::players::Stat;
use hoopcast_basketball::season::Season;
use hoopcast_basketball::standings::Conference;
use hoopcast_core::{config, logging};

use crate::render::OutputMode;

#[derive(Parser, Debug)]
#[command(name = "hoopcast", version, about = "NBA standings, playoff odds, and player stats")]
struct Cli {
    /// Directory holding config/ and defaults/ (defaults to the working directory).
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Playoff odds for a record, win probability, and remaining games.
    Odds {
        #[arg(long)]
        wins: u32,
        #[arg(long)]
        losses: u32,
        /// Games left; derived from the record and season length if omitted.
        #[arg(long)]
        remaining: Option<u32>,
        /// Chance of winning each remaining game, 0.0 to 1.0.
        #[arg(long, default_value_t = 0.5)]
        win_prob: f64,
        /// Wins needed for the playoffs; overrides [season] playoff_threshold.
        #[arg(long)]
        threshold: Option<u32>,
    },

    /// Conference standings with playoff tiers and odds for every team.
    Race {
        #[arg(long, default_value = "east")]
        conference: Conference,
        /// Season as "2023-24" or "2023".
        #[arg(long)]
        season: Option<Season>,
        /// Show the detailed outlook for one team (name, nickname, or tricode).
        #[arg(long)]
        team: Option<String>,
        /// Per-game win probability; each team's win percentage if omitted.
        #[arg(long)]
        win_prob: Option<f64>,
        #[arg(long)]
        threshold: Option<u32>,
        /// Read standings from a CSV snapshot instead of the stats site.
        #[arg(long, value_name = "CSV")]
        snapshot: Option<PathBuf>,
    },

    /// League leaders, head-to-head comparisons, and stat distributions.
    Players {
        /// Season as "2023-24", "2023", or "all" for career totals.
        #[arg(long)]
        season: Option<Season>,
        /// Restrict to one team (tricode, name, or nickname).
        #[arg(long)]
        team: Option<String>,
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// ppg, rpg, or apg.
        #[arg(long, default_value = "ppg")]
        stat: Stat,
        /// Compare two players by name.
        #[arg(long, num_args = 2, value_names = ["LEFT", "RIGHT"])]
        compare: Option<Vec<String>>,
        /// Show the distribution of --stat instead of a leaderboard.
        #[arg(long, conflicts_with = "compare")]
        distribution: bool,
    },

    /// Today's games with live scores and leaders.
    Scores,

    /// The 30 franchises, or their arena locations as GeoJSON.
    Teams {
        #[arg(long)]
        conference: Option<Conference>,
        #[arg(long)]
        geojson: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to read working directory")?,
    };

    let log_path = logging::init_tracing(&base_dir)?;
    info!("hoopcast starting, logging to {}", log_path.display());

    let config = config::load_config_in(&base_dir).context("failed to load configuration")?;
    info!(
        "Config loaded: {} games, playoff threshold {}",
        config.season.total_games, config.season.playoff_threshold
    );

    let mode = OutputMode::from_json_flag(cli.json);
    let result = run(cli.command, &config, mode).await;
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

async fn run(command: Command, config: &config::Config, mode: OutputMode) -> anyhow::Result<()> {
    match command {
        Command::Odds {
            wins,
            losses,
            remaining,
            win_prob,
            threshold,
        } => commands::odds(
            commands::OddsArgs {
                wins,
                losses,
                remaining,
                win_prob,
                threshold,
            },
            config,
            mode,
        ),
        Command::Race {
            conference,
            season,
            team,
            win_prob,
            threshold,
            snapshot,
        } => {
            commands::race(
                commands::RaceArgs {
                    conference,
                    season,
                    team,
                    win_prob,
                    threshold,
                    snapshot,
                },
                config,
                mode,
            )
            .await
        }
        Command::Players {
            season,
            team,
            top,
            stat,
            compare,
            distribution,
        } => {
            commands::players(
                commands::PlayersArgs {
                    season,
                    team,
                    top,
                    stat,
                    compare,
                    distribution,
                },
                config,
                mode,
            )
            .await
        }
        Command::Scores => commands::scores(config, mode).await,
        Command::Teams {
            conference,
            geojson,
        } => commands::list_teams(conference, geojson, mode),
    }
}
