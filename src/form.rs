use crate::error::PipelineError;
use crate::football_data::MatchRecord;

/// How many finished matches count towards form.
pub const FORM_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentForm {
    pub points: u32,
    pub avg_scored: f64,
    pub avg_conceded: f64,
    pub matches: usize,
}

impl RecentForm {
    pub fn is_partial(&self) -> bool {
        self.matches < FORM_WINDOW
    }
}

/// Aggregates the team's last `FORM_WINDOW` finished matches from `history`.
///
/// Rows that are unfinished, lack a full-time score, or do not involve the
/// team are ignored. The most recent matches win when more than the window
/// is supplied (kickoffs are ISO strings, so lexical order is time order).
pub fn recent_form(team_id: u32, history: &[MatchRecord]) -> Result<RecentForm, PipelineError> {
    let mut finished: Vec<&MatchRecord> = history
        .iter()
        .filter(|m| m.is_finished() && m.involves(team_id))
        .filter(|m| m.home_goals.is_some() && m.away_goals.is_some())
        .collect();
    finished.sort_by(|a, b| b.utc_date.cmp(&a.utc_date).then(b.id.cmp(&a.id)));
    finished.truncate(FORM_WINDOW);

    if finished.is_empty() {
        return Err(PipelineError::InsufficientFormHistory { team_id });
    }

    let mut points = 0u32;
    let mut scored = 0u32;
    let mut conceded = 0u32;
    for m in &finished {
        let home_goals = u32::from(m.home_goals.unwrap_or(0));
        let away_goals = u32::from(m.away_goals.unwrap_or(0));
        let (for_, against) = if m.home.id == team_id {
            (home_goals, away_goals)
        } else {
            (away_goals, home_goals)
        };
        points += match for_.cmp(&against) {
            std::cmp::Ordering::Greater => 3,
            std::cmp::Ordering::Equal => 1,
            std::cmp::Ordering::Less => 0,
        };
        scored += for_;
        conceded += against;
    }

    let n = finished.len() as f64;
    Ok(RecentForm {
        points,
        avg_scored: f64::from(scored) / n,
        avg_conceded: f64::from(conceded) / n,
        matches: finished.len(),
    })
}
