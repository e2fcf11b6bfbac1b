// Playoff odds: probability that a team reaches a win threshold over its
// remaining games, assuming an independent per-game win probability.

use serde::Serialize;
use std::fmt;

use crate::record::{RemainingSchedule, TeamRecord, NBA_REGULAR_SEASON_GAMES};

/// Wins historically sufficient for a playoff berth in an 82-game season.
pub const DEFAULT_PLAYOFF_THRESHOLD: u32 = 43;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OddsError {
    #[error("invalid argument `{field}`: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Expected final record. Components are real-valued; `truncated()` gives the
/// integer record shown to users (floor of each component).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedRecord {
    pub wins: f64,
    pub losses: f64,
}

impl ExpectedRecord {
    pub fn truncated(&self) -> TeamRecord {
        TeamRecord {
            wins: self.wins.floor() as u32,
            losses: self.losses.floor() as u32,
        }
    }
}

impl fmt::Display for ExpectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.truncated().fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OddsResult {
    /// Chance of finishing with at least the threshold wins, in `[0, 100]`.
    pub probability_percent: f64,
    pub best_case_record: TeamRecord,
    pub worst_case_record: TeamRecord,
    pub expected_record: ExpectedRecord,
}

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Estimate playoff odds for a team.
///
/// The final win total is `current_wins + k` where `k ~ Binomial(remaining_games,
/// win_probability)`. The probability of reaching `threshold` is the upper tail
/// of that distribution, summed over the `remaining_games + 1` possible win
/// counts rather than over every win/loss sequence.
///
/// Fails with [`OddsError::InvalidArgument`] if `win_probability` is NaN or
/// outside `[0, 1]`, or if `threshold` is zero.
pub fn estimate(
    current_wins: u32,
    current_losses: u32,
    remaining_games: u32,
    win_probability: f64,
    threshold: u32,
) -> Result<OddsResult, OddsError> {
    validate_probability(win_probability)?;
    if threshold == 0 {
        return Err(OddsError::InvalidArgument {
            field: "threshold",
            message: "must be greater than 0".into(),
        });
    }

    let probability =
        threshold_probability(current_wins, remaining_games, win_probability, threshold);

    let remaining = f64::from(remaining_games);
    Ok(OddsResult {
        probability_percent: (probability * 100.0).clamp(0.0, 100.0),
        best_case_record: TeamRecord {
            wins: current_wins.saturating_add(remaining_games),
            losses: current_losses,
        },
        worst_case_record: TeamRecord {
            wins: current_wins,
            losses: current_losses.saturating_add(remaining_games),
        },
        expected_record: ExpectedRecord {
            wins: f64::from(current_wins) + remaining * win_probability,
            losses: f64::from(current_losses) + remaining * (1.0 - win_probability),
        },
    })
}

fn validate_probability(win_probability: f64) -> Result<(), OddsError> {
    if !(0.0..=1.0).contains(&win_probability) {
        return Err(OddsError::InvalidArgument {
            field: "win_probability",
            message: format!("must be between 0.0 and 1.0 inclusive, got {win_probability}"),
        });
    }
    Ok(())
}

/// Probability (as a fraction) that `wins + Binomial(remaining, p) >= threshold`.
fn threshold_probability(wins: u32, remaining: u32, p: f64, threshold: u32) -> f64 {
    // Season over, or already clinched: no probability computation at all.
    if wins >= threshold {
        return 1.0;
    }
    if remaining == 0 {
        return 0.0;
    }
    let needed = threshold - wins;
    if needed > remaining {
        return 0.0;
    }
    binomial_upper_tail(remaining, needed, p)
}

/// `P(X >= k_min)` for `X ~ Binomial(n, p)`.
///
/// Terms are evaluated in log space with `ln C(n, k)` built incrementally, so
/// long schedules neither overflow the coefficient nor underflow `p^k` before
/// the product is formed. `p` must already be validated into `[0, 1]`.
fn binomial_upper_tail(n: u32, k_min: u32, p: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&p), "unvalidated probability {p}");
    if k_min == 0 {
        return 1.0;
    }
    if k_min > n || p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }

    let ln_p = p.ln();
    let ln_q = (-p).ln_1p();
    let mut ln_choose = 0.0_f64;
    let mut tail = 0.0_f64;

    for k in 0..=n {
        if k >= k_min {
            let losses = f64::from(n - k);
            tail += (ln_choose + f64::from(k) * ln_p + losses * ln_q).exp();
        }
        if k < n {
            // C(n, k+1) = C(n, k) * (n - k) / (k + 1)
            ln_choose += f64::from(n - k).ln() - f64::from(k + 1).ln();
        }
    }

    tail.clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// OddsEstimator
// ---------------------------------------------------------------------------

/// Season shape plus playoff threshold, so callers can estimate from a record
/// without repeating the season length everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OddsEstimator {
    total_season_games: u32,
    threshold: u32,
}

impl Default for OddsEstimator {
    fn default() -> Self {
        Self {
            total_season_games: NBA_REGULAR_SEASON_GAMES,
            threshold: DEFAULT_PLAYOFF_THRESHOLD,
        }
    }
}

impl OddsEstimator {
    pub fn new(total_season_games: u32, threshold: u32) -> Result<Self, OddsError> {
        if total_season_games == 0 {
            return Err(OddsError::InvalidArgument {
                field: "total_season_games",
                message: "must be greater than 0".into(),
            });
        }
        if threshold == 0 {
            return Err(OddsError::InvalidArgument {
                field: "threshold",
                message: "must be greater than 0".into(),
            });
        }
        Ok(Self {
            total_season_games,
            threshold,
        })
    }

    pub fn total_season_games(&self) -> u32 {
        self.total_season_games
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Same season, different threshold.
    pub fn with_threshold(self, threshold: u32) -> Result<Self, OddsError> {
        Self::new(self.total_season_games, threshold)
    }

    pub fn remaining_for(&self, record: TeamRecord) -> Result<RemainingSchedule, OddsError> {
        RemainingSchedule::from_record(record, self.total_season_games)
    }

    /// Estimate using the remaining games implied by `record`.
    pub fn estimate_for(
        &self,
        record: TeamRecord,
        win_probability: f64,
    ) -> Result<OddsResult, OddsError> {
        let schedule = self.remaining_for(record)?;
        self.estimate_with_remaining(record, schedule.remaining_games(), win_probability)
    }

    /// Estimate when the caller already knows the remaining game count
    /// (e.g. from a schedule feed rather than the record).
    pub fn estimate_with_remaining(
        &self,
        record: TeamRecord,
        remaining_games: u32,
        win_probability: f64,
    ) -> Result<OddsResult, OddsError> {
        estimate(
            record.wins,
            record.losses,
            remaining_games,
            win_probability,
            self.threshold,
        )
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    /// Reference: enumerate every win/loss sequence over `remaining` games.
    fn brute_force_percent(wins: u32, remaining: u32, p: f64, threshold: u32) -> f64 {
        let mut favorable = 0.0;
        for scenario in 0u64..(1u64 << remaining) {
            let extra = scenario.count_ones();
            let prob = p.powi(extra as i32) * (1.0 - p).powi((remaining - extra) as i32);
            if wins + extra >= threshold {
                favorable += prob;
            }
        }
        favorable * 100.0
    }

    fn percent(w: u32, l: u32, r: u32, p: f64, t: u32) -> f64 {
        estimate(w, l, r, p, t).unwrap().probability_percent
    }

    // ---- Concrete scenarios ----

    #[test]
    fn already_past_threshold_is_certain() {
        assert_eq!(percent(45, 20, 17, 0.5, 43), 100.0);
    }

    #[test]
    fn bubble_team_matches_enumeration() {
        let got = percent(30, 35, 17, 0.4, 43);
        let expected = brute_force_percent(30, 17, 0.4, 43);
        assert!(approx_eq(got, expected, 1e-9), "{got} vs {expected}");
        // 13+ wins out of 17 at 0.4 is a long shot but not impossible.
        assert!(got > 0.0 && got < 1.0, "got {got}");
    }

    #[test]
    fn unreachable_threshold_is_zero() {
        assert_eq!(percent(20, 50, 12, 0.9, 43), 0.0);
    }

    // ---- Edge-case policy ----

    #[test]
    fn season_over_is_deterministic() {
        for p in [0.0, 0.3, 0.5, 1.0] {
            assert_eq!(percent(43, 39, 0, p, 43), 100.0);
            assert_eq!(percent(42, 40, 0, p, 43), 0.0);
        }
    }

    #[test]
    fn zero_win_probability() {
        assert_eq!(percent(43, 20, 19, 0.0, 43), 100.0);
        assert_eq!(percent(42, 20, 20, 0.0, 43), 0.0);
    }

    #[test]
    fn certain_win_probability() {
        assert_eq!(percent(30, 30, 13, 1.0, 43), 100.0);
        assert_eq!(percent(30, 30, 12, 1.0, 43), 0.0);
    }

    #[test]
    fn threshold_at_or_below_wins_is_certain() {
        assert_eq!(percent(10, 60, 12, 0.01, 10), 100.0);
        assert_eq!(percent(10, 60, 12, 0.01, 1), 100.0);
    }

    #[test]
    fn threshold_above_ceiling_is_zero() {
        assert_eq!(percent(10, 10, 5, 0.99, 16), 0.0);
    }

    #[test]
    fn needing_every_remaining_game() {
        let got = percent(40, 39, 3, 0.5, 43);
        assert!(approx_eq(got, 12.5, 1e-9), "got {got}");
    }

    // ---- Properties ----

    #[test]
    fn agrees_with_enumeration_for_small_schedules() {
        for r in 0..=15u32 {
            for &p in &[0.05, 0.25, 0.5, 0.61, 0.9] {
                for t in [1u32, 30, 35, 38, 43, 50] {
                    let got = percent(30, 20, r, p, t);
                    let want = brute_force_percent(30, r, p, t);
                    assert!(
                        approx_eq(got, want, 1e-9),
                        "r={r} p={p} t={t}: {got} vs {want}"
                    );
                }
            }
        }
    }

    #[test]
    fn monotone_in_win_probability() {
        for t in [35u32, 43, 50] {
            let mut previous = 0.0;
            for step in 0..=20 {
                let p = f64::from(step) / 20.0;
                let got = percent(28, 26, 28, p, t);
                assert!(got + 1e-12 >= previous, "t={t} p={p}: {got} < {previous}");
                assert!((0.0..=100.0).contains(&got));
                previous = got;
            }
        }
    }

    #[test]
    fn full_season_stays_finite_and_bounded() {
        for &p in &[0.001, 0.2, 0.5, 0.8, 0.999] {
            let got = percent(0, 0, 82, p, 43);
            assert!(got.is_finite());
            assert!((0.0..=100.0).contains(&got));
        }
        // Symmetric coin over 82 games: P(X >= 41) is just over one half.
        let half = percent(0, 0, 82, 0.5, 41);
        assert!(half > 50.0 && half < 55.0, "got {half}");
    }

    #[test]
    fn long_schedules_do_not_overflow() {
        let got = binomial_upper_tail(10_000, 5_000, 0.5);
        assert!(got > 0.49 && got < 0.51, "got {got}");
        assert!(binomial_upper_tail(10_000, 9_000, 0.5) < 1e-100);
    }

    #[test]
    fn tail_handles_degenerate_bounds() {
        assert_eq!(binomial_upper_tail(10, 0, 0.3), 1.0);
        assert_eq!(binomial_upper_tail(10, 11, 0.3), 0.0);
        assert_eq!(binomial_upper_tail(10, 3, 0.0), 0.0);
        assert_eq!(binomial_upper_tail(10, 3, 1.0), 1.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unvalidated probability")]
    fn tail_refuses_nan_probability() {
        binomial_upper_tail(10, 3, f64::NAN);
    }

    // ---- Projections ----

    #[test]
    fn projections_bracket_the_record() {
        let result = estimate(30, 35, 17, 0.4, 43).unwrap();
        assert_eq!(result.best_case_record, TeamRecord::new(47, 35));
        assert_eq!(result.worst_case_record, TeamRecord::new(30, 52));
        assert!(approx_eq(result.expected_record.wins, 36.8, 1e-9));
        assert!(approx_eq(result.expected_record.losses, 45.2, 1e-9));
        assert_eq!(result.expected_record.truncated(), TeamRecord::new(36, 45));
        assert_eq!(result.expected_record.to_string(), "36-45");
    }

    #[test]
    fn projection_identities_hold_everywhere() {
        for (w, l, r) in [(0, 0, 82), (45, 20, 17), (41, 41, 0), (10, 3, 69)] {
            let result = estimate(w, l, r, 0.37, 43).unwrap();
            assert_eq!(result.worst_case_record.wins, w);
            assert_eq!(result.best_case_record.wins, w + r);
        }
    }

    // ---- Invalid arguments ----

    #[test]
    fn rejects_out_of_range_probability() {
        for p in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            match estimate(30, 30, 10, p, 43) {
                Err(OddsError::InvalidArgument { field, .. }) => {
                    assert_eq!(field, "win_probability")
                }
                other => panic!("expected InvalidArgument for p={p}, got {other:?}"),
            }
            let via_estimator = OddsEstimator::default().estimate_for(TeamRecord::new(30, 30), p);
            assert!(matches!(via_estimator, Err(OddsError::InvalidArgument { .. })));
        }
    }

    #[test]
    fn rejects_zero_threshold() {
        match estimate(30, 30, 10, 0.5, 0) {
            Err(OddsError::InvalidArgument { field, .. }) => assert_eq!(field, "threshold"),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    // ---- OddsEstimator ----

    #[test]
    fn estimator_derives_remaining_from_record() {
        let estimator = OddsEstimator::default();
        let via_record = estimator
            .estimate_for(TeamRecord::new(30, 35), 0.4)
            .unwrap();
        let direct = estimate(30, 35, 17, 0.4, 43).unwrap();
        assert_eq!(via_record, direct);
    }

    #[test]
    fn estimator_rejects_overplayed_record() {
        let estimator = OddsEstimator::new(82, 43).unwrap();
        assert!(estimator.estimate_for(TeamRecord::new(60, 30), 0.5).is_err());
    }

    #[test]
    fn estimator_threshold_is_configurable() {
        let estimator = OddsEstimator::default().with_threshold(48).unwrap();
        assert_eq!(estimator.threshold(), 48);
        let result = estimator.estimate_for(TeamRecord::new(45, 20), 0.5).unwrap();
        assert!(result.probability_percent < 100.0);
        assert!(OddsEstimator::new(0, 43).is_err());
        assert!(OddsEstimator::default().with_threshold(0).is_err());
    }
}
