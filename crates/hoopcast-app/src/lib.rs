// Data-fetch layer and reports: the stats-site client, the `StatsSource`
// seam, TTL caching around it, and the playoff-race / player-explorer views
// assembled from fetched data.

pub mod cached;
pub mod client;
pub mod explorer;
pub mod race;
pub mod resultset;
pub mod source;
