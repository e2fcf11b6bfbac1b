// Narrative bands for playoff odds, as shown next to the gauge.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outlook {
    Excellent,
    Likely,
    Bubble,
    UphillBattle,
}

impl Outlook {
    /// Classify a probability in percent (0..=100).
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 90.0 {
            Outlook::Excellent
        } else if percent >= 70.0 {
            Outlook::Likely
        } else if percent >= 40.0 {
            Outlook::Bubble
        } else {
            Outlook::UphillBattle
        }
    }

    /// One-line summary for a named team.
    pub fn narrative(&self, team: &str) -> String {
        match self {
            Outlook::Excellent => format!("{team} has an excellent chance of making the playoffs!"),
            Outlook::Likely => format!("{team} is likely to make the playoffs."),
            Outlook::Bubble => format!("{team} is in the playoff bubble - every game counts!"),
            Outlook::UphillBattle => format!("{team} faces an uphill battle to make the playoffs."),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outlook::Excellent => "excellent",
            Outlook::Likely => "likely",
            Outlook::Bubble => "bubble",
            Outlook::UphillBattle => "uphill",
        }
    }
}

impl fmt::Display for Outlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Gauge bands
// ---------------------------------------------------------------------------

/// Fixed 20-point bands a presenter colours the odds gauge with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GaugeBand {
    pub low: u8,
    pub high: u8,
    pub color: &'static str,
}

pub const GAUGE_BANDS: [GaugeBand; 5] = [
    GaugeBand { low: 0, high: 20, color: "#ff6b6b" },
    GaugeBand { low: 20, high: 40, color: "#ffd93d" },
    GaugeBand { low: 40, high: 60, color: "#6c5ce7" },
    GaugeBand { low: 60, high: 80, color: "#a8e6cf" },
    GaugeBand { low: 80, high: 100, color: "#00b894" },
];

/// Band containing `percent`; 100 falls in the top band.
pub fn gauge_band(percent: f64) -> GaugeBand {
    let clamped = percent.clamp(0.0, 100.0);
    GAUGE_BANDS
        .iter()
        .copied()
        .find(|band| clamped < f64::from(band.high))
        .unwrap_or(GAUGE_BANDS[GAUGE_BANDS.len() - 1])
}
