// Static franchise table: identifiers used by the stats site, conference,
// and arena coordinates for the team map.

use serde::Serialize;
use serde_json::{json, Value};

use crate::standings::Conference;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Team {
    pub id: u32,
    pub full_name: &'static str,
    pub abbreviation: &'static str,
    pub nickname: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub conference: Conference,
    pub latitude: f64,
    pub longitude: f64,
}

const fn team(
    id: u32,
    full_name: &'static str,
    abbreviation: &'static str,
    nickname: &'static str,
    city: &'static str,
    state: &'static str,
    conference: Conference,
    latitude: f64,
    longitude: f64,
) -> Team {
    Team {
        id,
        full_name,
        abbreviation,
        nickname,
        city,
        state,
        conference,
        latitude,
        longitude,
    }
}

use Conference::{East, West};

/// All 30 franchises, ordered by stats-site team id.
pub const TEAMS: [Team; 30] = [
    team(1610612737, "Atlanta Hawks", "ATL", "Hawks", "Atlanta", "Georgia", East, 33.7573, -84.3963),
    team(1610612738, "Boston Celtics", "BOS", "Celtics", "Boston", "Massachusetts", East, 42.3662, -71.0621),
    team(1610612739, "Cleveland Cavaliers", "CLE", "Cavaliers", "Cleveland", "Ohio", East, 41.4965, -81.6882),
    team(1610612740, "New Orleans Pelicans", "NOP", "Pelicans", "New Orleans", "Louisiana", West, 29.9490, -90.0821),
    team(1610612741, "Chicago Bulls", "CHI", "Bulls", "Chicago", "Illinois", East, 41.8807, -87.6742),
    team(1610612742, "Dallas Mavericks", "DAL", "Mavericks", "Dallas", "Texas", West, 32.7905, -96.8103),
    team(1610612743, "Denver Nuggets", "DEN", "Nuggets", "Denver", "Colorado", West, 39.7487, -105.0077),
    team(1610612744, "Golden State Warriors", "GSW", "Warriors", "Golden State", "California", West, 37.7680, -122.3877),
    team(1610612745, "Houston Rockets", "HOU", "Rockets", "Houston", "Texas", West, 29.7508, -95.3621),
    team(1610612746, "LA Clippers", "LAC", "Clippers", "Los Angeles", "California", West, 33.9447, -118.3411),
    team(1610612747, "Los Angeles Lakers", "LAL", "Lakers", "Los Angeles", "California", West, 34.0430, -118.2673),
    team(1610612748, "Miami Heat", "MIA", "Heat", "Miami", "Florida", East, 25.7814, -80.1870),
    team(1610612749, "Milwaukee Bucks", "MIL", "Bucks", "Milwaukee", "Wisconsin", East, 43.0451, -87.9172),
    team(1610612750, "Minnesota Timberwolves", "MIN", "Timberwolves", "Minnesota", "Minnesota", West, 44.9795, -93.2761),
    team(1610612751, "Brooklyn Nets", "BKN", "Nets", "Brooklyn", "New York", East, 40.6826, -73.9754),
    team(1610612752, "New York Knicks", "NYK", "Knicks", "New York", "New York", East, 40.7505, -73.9934),
    team(1610612753, "Orlando Magic", "ORL", "Magic", "Orlando", "Florida", East, 28.5392, -81.3839),
    team(1610612754, "Indiana Pacers", "IND", "Pacers", "Indiana", "Indiana", East, 39.7640, -86.1555),
    team(1610612755, "Philadelphia 76ers", "PHI", "76ers", "Philadelphia", "Pennsylvania", East, 39.9012, -75.1720),
    team(1610612756, "Phoenix Suns", "PHX", "Suns", "Phoenix", "Arizona", West, 33.4457, -112.0712),
    team(1610612757, "Portland Trail Blazers", "POR", "Trail Blazers", "Portland", "Oregon", West, 45.5316, -122.6668),
    team(1610612758, "Sacramento Kings", "SAC", "Kings", "Sacramento", "California", West, 38.5802, -121.4997),
    team(1610612759, "San Antonio Spurs", "SAS", "Spurs", "San Antonio", "Texas", West, 29.4270, -98.4375),
    team(1610612760, "Oklahoma City Thunder", "OKC", "Thunder", "Oklahoma City", "Oklahoma", West, 35.4634, -97.5151),
    team(1610612761, "Toronto Raptors", "TOR", "Raptors", "Toronto", "Ontario", East, 43.6435, -79.3791),
    team(1610612762, "Utah Jazz", "UTA", "Jazz", "Utah", "Utah", West, 40.7683, -111.9011),
    team(1610612763, "Memphis Grizzlies", "MEM", "Grizzlies", "Memphis", "Tennessee", West, 35.1382, -90.0506),
    team(1610612764, "Washington Wizards", "WAS", "Wizards", "Washington", "District of Columbia", East, 38.8981, -77.0209),
    team(1610612765, "Detroit Pistons", "DET", "Pistons", "Detroit", "Michigan", East, 42.3410, -83.0550),
    team(1610612766, "Charlotte Hornets", "CHA", "Hornets", "Charlotte", "North Carolina", East, 35.2251, -80.8392),
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

pub fn by_id(id: u32) -> Option<&'static Team> {
    TEAMS.iter().find(|t| t.id == id)
}

pub fn by_abbreviation(abbreviation: &str) -> Option<&'static Team> {
    TEAMS
        .iter()
        .find(|t| t.abbreviation.eq_ignore_ascii_case(abbreviation.trim()))
}

/// Every team in a city. Los Angeles has two, so this never picks one.
pub fn by_city(city: &str) -> Vec<&'static Team> {
    let city = city.trim();
    TEAMS
        .iter()
        .filter(|t| t.city.eq_ignore_ascii_case(city))
        .collect()
}

/// Resolve free text: abbreviation, full name, or nickname.
pub fn search(query: &str) -> Option<&'static Team> {
    let query = query.trim();
    by_abbreviation(query).or_else(|| {
        TEAMS.iter().find(|t| {
            t.full_name.eq_ignore_ascii_case(query) || t.nickname.eq_ignore_ascii_case(query)
        })
    })
}

pub fn in_conference(conference: Conference) -> impl Iterator<Item = &'static Team> {
    TEAMS.iter().filter(move |t| t.conference == conference)
}

// ---------------------------------------------------------------------------
// Map export
// ---------------------------------------------------------------------------

/// GeoJSON `FeatureCollection` with one point marker per arena.
/// GeoJSON coordinates are `[longitude, latitude]`.
pub fn locations_geojson() -> Value {
    let features: Vec<Value> = TEAMS
        .iter()
        .map(|t| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [t.longitude, t.latitude],
                },
                "properties": {
                    "id": t.id,
                    "name": t.full_name,
                    "abbreviation": t.abbreviation,
                    "city": t.city,
                    "conference": t.conference.label(),
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_is_complete_and_unique() {
        let ids: HashSet<u32> = TEAMS.iter().map(|t| t.id).collect();
        let abbrs: HashSet<&str> = TEAMS.iter().map(|t| t.abbreviation).collect();
        assert_eq!(ids.len(), 30);
        assert_eq!(abbrs.len(), 30);
        assert_eq!(in_conference(Conference::East).count(), 15);
        assert_eq!(in_conference(Conference::West).count(), 15);
    }

    #[test]
    fn coordinates_are_in_north_america() {
        for t in &TEAMS {
            assert!((24.0..50.0).contains(&t.latitude), "{}", t.full_name);
            assert!((-125.0..-66.0).contains(&t.longitude), "{}", t.full_name);
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(by_id(1610612738).unwrap().abbreviation, "BOS");
        assert_eq!(by_abbreviation("gsw").unwrap().nickname, "Warriors");
        assert_eq!(search("Lakers").unwrap().id, 1610612747);
        assert_eq!(search("philadelphia 76ers").unwrap().abbreviation, "PHI");
        assert!(search("Seattle SuperSonics").is_none());
    }

    #[test]
    fn shared_city_returns_both_teams() {
        let la = by_city("Los Angeles");
        assert_eq!(la.len(), 2);
        assert!(la.iter().any(|t| t.abbreviation == "LAL"));
        assert!(la.iter().any(|t| t.abbreviation == "LAC"));
    }

    #[test]
    fn geojson_has_a_marker_per_team() {
        let doc = locations_geojson();
        assert_eq!(doc["type"], "FeatureCollection");
        let features = doc["features"].as_array().unwrap();
        assert_eq!(features.len(), 30);
        let celtics = features
            .iter()
            .find(|f| f["properties"]["abbreviation"] == "BOS")
            .unwrap();
        let coords = celtics["geometry"]["coordinates"].as_array().unwrap();
        assert!(coords[0].as_f64().unwrap() < 0.0, "longitude first");
        assert_eq!(celtics["properties"]["conference"], "East");
    }
}
