// Terminal rendering: tabled rows for each view plus the JSON fallback.

use serde::Serialize;
use tabled::{Table, Tabled};

use hoopcast_app::race::TeamOutlook;
use hoopcast_basketball::outlook::gauge_band;
use hoopcast_basketball::players::{Comparison, Distribution, PlayerLine, TeamSummary};
use hoopcast_basketball::scoreboard::Game;
use hoopcast_basketball::standings::RankedTeam;
use hoopcast_basketball::teams::Team;

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_table<T: Tabled>(rows: Vec<T>) {
    if rows.is_empty() {
        println!("  (no results)");
        return;
    }
    let table = Table::new(rows).to_string();
    for line in table.lines() {
        println!("  {}", line);
    }
}

pub fn section(title: &str) {
    println!();
    println!("  {}", title);
    println!();
}

fn pct(value: f64) -> String {
    format!("{:.1}%", value)
}

// ---------------------------------------------------------------------------
// Standings and race
// ---------------------------------------------------------------------------

#[derive(Tabled)]
pub struct StandingsLine {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Record")]
    record: String,
    #[tabled(rename = "Win%")]
    win_pct: String,
    #[tabled(rename = "L10")]
    last_ten: String,
    #[tabled(rename = "Tier")]
    tier: &'static str,
}

impl From<&RankedTeam> for StandingsLine {
    fn from(t: &RankedTeam) -> Self {
        Self {
            position: t.position,
            team: t.row.display_name(),
            record: t.row.record.to_string(),
            win_pct: format!("{:.3}", t.row.win_pct),
            last_ten: t.row.last_ten.clone(),
            tier: t.tier.label(),
        }
    }
}

#[derive(Tabled)]
pub struct OutlookLine {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Record")]
    record: String,
    #[tabled(rename = "Left")]
    remaining: u32,
    #[tabled(rename = "p(win)")]
    win_probability: String,
    #[tabled(rename = "Playoff odds")]
    odds: String,
    #[tabled(rename = "Outlook")]
    outlook: &'static str,
}

impl From<&TeamOutlook> for OutlookLine {
    fn from(o: &TeamOutlook) -> Self {
        Self {
            position: o.position,
            team: o.team.clone(),
            record: o.record.to_string(),
            remaining: o.remaining_games,
            win_probability: format!("{:.3}", o.win_probability),
            odds: pct(o.odds.probability_percent),
            outlook: o.outlook.label(),
        }
    }
}

/// Detail block for a single team's outlook.
pub fn print_outlook(o: &TeamOutlook, threshold: u32) {
    let band = gauge_band(o.odds.probability_percent);
    section(&format!("{} ({} seed, {})", o.team, ordinal(o.position), o.tier.label()));
    println!("  Record:           {}", o.record);
    println!("  Remaining games:  {}", o.remaining_games);
    println!("  Win probability:  {:.3}", o.win_probability);
    println!("  Wins needed:      {} (threshold {})", o.wins_needed(threshold), threshold);
    println!(
        "  Playoff odds:     {} [{}-{} band, {}]",
        pct(o.odds.probability_percent),
        band.low,
        band.high,
        band.color
    );
    println!("  Best case:        {}", o.odds.best_case_record);
    println!("  Worst case:       {}", o.odds.worst_case_record);
    println!("  Expected:         {}", o.odds.expected_record);
    if o.season_complete {
        println!("  Season complete.");
    }
    println!();
    println!("  {}", o.narrative());
    println!();
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Tabled)]
pub struct PlayerRow {
    #[tabled(rename = "Player")]
    name: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "GP")]
    games: u32,
    #[tabled(rename = "PPG")]
    ppg: String,
    #[tabled(rename = "RPG")]
    rpg: String,
    #[tabled(rename = "APG")]
    apg: String,
}

impl From<&PlayerLine> for PlayerRow {
    fn from(l: &PlayerLine) -> Self {
        Self {
            name: l.name.clone(),
            team: l.team.clone().unwrap_or_default(),
            games: l.games,
            ppg: format!("{:.1}", l.ppg),
            rpg: format!("{:.1}", l.rpg),
            apg: format!("{:.1}", l.apg),
        }
    }
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Stat")]
    stat: &'static str,
    left: String,
    right: String,
}

pub fn print_comparison(cmp: &Comparison) {
    section(&format!("{} vs {}", cmp.left.name, cmp.right.name));
    let rows: Vec<ComparisonRow> = cmp
        .rows()
        .into_iter()
        .map(|(stat, l, r)| ComparisonRow {
            stat: stat.label(),
            left: format!("{:.1}", l),
            right: format!("{:.1}", r),
        })
        .collect();
    print_table(rows);
}

#[derive(Tabled)]
struct BinRow {
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Players")]
    count: usize,
    #[tabled(rename = "")]
    bar: String,
}

pub fn print_distribution(d: &Distribution) {
    section(&format!("{} distribution ({} players)", d.stat, d.count));
    println!(
        "  min {:.1} | q1 {:.1} | median {:.1} | q3 {:.1} | max {:.1} | mean {:.1}",
        d.min, d.q1, d.median, d.q3, d.max, d.mean
    );
    println!();
    let rows: Vec<BinRow> = d
        .bins
        .iter()
        .map(|b| BinRow {
            range: format!("{:.1}-{:.1}", b.low, b.high),
            count: b.count,
            bar: "#".repeat(b.count),
        })
        .collect();
    print_table(rows);
}

pub fn print_team_summary(team: &str, s: &TeamSummary) {
    section(&format!("{} ({} players)", team, s.players));
    println!("  Avg PPG {:.1} (best {:.1})", s.ppg.average, s.ppg.max);
    println!("  Avg RPG {:.1} (best {:.1})", s.rpg.average, s.rpg.max);
    println!("  Avg APG {:.1} (best {:.1})", s.apg.average, s.apg.max);
}

// ---------------------------------------------------------------------------
// Scores and teams
// ---------------------------------------------------------------------------

#[derive(Tabled)]
pub struct GameRow {
    #[tabled(rename = "Away")]
    away: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Home")]
    home: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Leaders")]
    leaders: String,
}

impl From<&Game> for GameRow {
    fn from(g: &Game) -> Self {
        let score = if g.has_started() {
            format!("{} - {}", g.away_team.score, g.home_team.score)
        } else {
            "-".to_string()
        };
        let leaders = g
            .visible_leaders()
            .map(|l| {
                format!(
                    "{}: {} / {}: {}",
                    l.away_leaders.name,
                    l.away_leaders.stat_line(),
                    l.home_leaders.name,
                    l.home_leaders.stat_line()
                )
            })
            .unwrap_or_default();
        Self {
            away: format!("{} ({})", g.away_team.display_name(), g.away_team.record()),
            score,
            home: format!("{} ({})", g.home_team.display_name(), g.home_team.record()),
            status: g.clock_label(),
            leaders,
        }
    }
}

#[derive(Tabled)]
pub struct TeamRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Abbr")]
    abbreviation: &'static str,
    #[tabled(rename = "Team")]
    name: &'static str,
    #[tabled(rename = "City")]
    city: &'static str,
    #[tabled(rename = "State")]
    state: &'static str,
    #[tabled(rename = "Conference")]
    conference: &'static str,
}

impl From<&Team> for TeamRow {
    fn from(t: &Team) -> Self {
        Self {
            id: t.id,
            abbreviation: t.abbreviation,
            name: t.full_name,
            city: t.city,
            state: t.state,
            conference: t.conference.label(),
        }
    }
}
