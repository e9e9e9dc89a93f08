use crate::team_stats::TeamStats;

pub const PROB_FLOOR: f64 = 0.05;
pub const PROB_CEIL: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityEstimate {
    pub p_home: f64,
    pub p_away: f64,
}

impl ProbabilityEstimate {
    pub fn diff_pct(&self) -> f64 {
        (self.p_home - self.p_away).abs() * 100.0
    }
}

/// Relative-strength estimate from goals-per-match alone.
///
/// `p_home = r_home / (r_home + r_away)`, clamped to `[0.05, 0.95]`. Goals
/// against and home advantage are ignored on purpose; this mirrors the
/// scanner's established behaviour and is a known modelling weakness, not a
/// calibrated model. When both rates are zero the ratio is undefined and the
/// result is an even split.
pub fn compute_prob(home: &TeamStats, away: &TeamStats) -> ProbabilityEstimate {
    let r_home = home.goal_rate();
    let r_away = away.goal_rate();
    let total = r_home + r_away;
    let p_home = if total > 0.0 && total.is_finite() {
        clamp(r_home / total, PROB_FLOOR, PROB_CEIL)
    } else {
        0.5
    };
    ProbabilityEstimate {
        p_home,
        p_away: 1.0 - p_home,
    }
}

fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}
