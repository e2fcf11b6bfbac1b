// Basketball domain: records, playoff odds, standings, players, teams,
// and the live scoreboard model. Nothing in this crate performs I/O except
// the standings snapshot loader, which reads a caller-supplied CSV.

pub mod odds;
pub mod outlook;
pub mod players;
pub mod record;
pub mod scoreboard;
pub mod season;
pub mod standings;
pub mod teams;
