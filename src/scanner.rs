use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{info, warn};

use crate::competitions::Competition;
use crate::config::ScanConfig;
use crate::error::PipelineError;
use crate::football_data::{FootballDataClient, MatchRecord};
use crate::schedule::{KickoffWindow, parse_utc_kickoff};
use crate::team_stats::{TeamStatsTable, build_team_stats};
use crate::win_prob::{ProbabilityEstimate, compute_prob};

pub const KICKOFF_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    pub competition: &'static str,
    pub home: String,
    pub away: String,
    pub kickoff: DateTime<Utc>,
    pub estimate: ProbabilityEstimate,
}

impl ScoredMatch {
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home, self.away)
    }

    pub fn to_row(&self) -> ScanRow {
        ScanRow {
            competition: self.competition.to_string(),
            match_label: self.label(),
            p_home_pct: round1(self.estimate.p_home * 100.0),
            p_away_pct: round1(self.estimate.p_away * 100.0),
            diff_pct: round1(self.estimate.diff_pct()),
            kickoff: self.kickoff.format(KICKOFF_DISPLAY_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanRow {
    pub competition: String,
    pub match_label: String,
    pub p_home_pct: f64,
    pub p_away_pct: f64,
    pub diff_pct: f64,
    pub kickoff: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedMatch {
    pub competition: &'static str,
    pub match_label: String,
    pub reason: PipelineError,
}

#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub rows: Vec<ScanRow>,
    pub skipped: Vec<SkippedMatch>,
    pub failed_competitions: Vec<(&'static str, String)>,
}

impl ScanOutcome {
    pub fn merge(&mut self, other: ScanOutcome) {
        self.rows.extend(other.rows);
        self.skipped.extend(other.skipped);
        self.failed_competitions.extend(other.failed_competitions);
    }
}

/// Keeps entries whose home/away gap is at least `threshold_pct` points.
/// Input order is preserved.
pub fn filter_by_threshold(scored: Vec<ScoredMatch>, threshold_pct: f64) -> Vec<ScoredMatch> {
    scored
        .into_iter()
        .filter(|m| m.estimate.diff_pct() >= threshold_pct)
        .collect()
}

/// Windows, scores and thresholds one competition's scheduled matches.
///
/// Pure: all inputs are already fetched. A bad kickoff or a side missing from
/// the stats table skips that match only.
pub fn scan_competition(
    competition: &'static Competition,
    stats: &TeamStatsTable,
    matches: &[MatchRecord],
    now: DateTime<Utc>,
    cfg: &ScanConfig,
) -> ScanOutcome {
    let window = KickoffWindow::from_now(now, cfg.window_hours);
    let mut scored = Vec::new();
    let mut skipped = Vec::new();

    for m in matches {
        let kickoff = match parse_utc_kickoff(&m.utc_date) {
            Ok(t) => t,
            Err(reason) => {
                warn!(competition = competition.code, match_id = m.id, %reason, "skipping match");
                skipped.push(SkippedMatch {
                    competition: competition.name,
                    match_label: m.label(),
                    reason,
                });
                continue;
            }
        };
        if !window.contains(kickoff) {
            continue;
        }

        let pair = stats
            .get(&m.home.name)
            .and_then(|home| stats.get(&m.away.name).map(|away| (home, away)));
        let (home, away) = match pair {
            Ok(pair) => pair,
            Err(reason) => {
                warn!(competition = competition.code, match_id = m.id, %reason, "skipping match");
                skipped.push(SkippedMatch {
                    competition: competition.name,
                    match_label: m.label(),
                    reason,
                });
                continue;
            }
        };

        scored.push(ScoredMatch {
            competition: competition.name,
            home: m.home.name.clone(),
            away: m.away.name.clone(),
            kickoff,
            estimate: compute_prob(home, away),
        });
    }

    let rows = filter_by_threshold(scored, cfg.threshold_pct)
        .iter()
        .map(ScoredMatch::to_row)
        .collect();

    ScanOutcome {
        rows,
        skipped,
        failed_competitions: Vec::new(),
    }
}

/// Fetches teams and scheduled matches per competition, then scans each.
/// A failed fetch drops that competition and the run carries on.
pub fn run_scan<R: Rng>(
    client: &FootballDataClient,
    cfg: &ScanConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> ScanOutcome {
    let mut out = ScanOutcome::default();
    for &competition in &cfg.competitions {
        let teams = match client.fetch_teams(competition.code) {
            Ok(teams) => teams,
            Err(err) => {
                warn!(competition = competition.code, error = %format!("{err:#}"), "teams fetch failed");
                out.failed_competitions
                    .push((competition.name, format!("{err:#}")));
                continue;
            }
        };
        let stats = build_team_stats(&teams, rng);
        if stats.imputed_teams() > 0 {
            info!(
                competition = competition.code,
                imputed = stats.imputed_teams(),
                teams = stats.len(),
                "team stats contain placeholder values"
            );
        }

        let matches = match client.fetch_scheduled_matches(competition.code) {
            Ok(matches) => matches,
            Err(err) => {
                warn!(competition = competition.code, error = %format!("{err:#}"), "matches fetch failed");
                out.failed_competitions
                    .push((competition.name, format!("{err:#}")));
                continue;
            }
        };

        let scanned = scan_competition(competition, &stats, &matches, now, cfg);
        info!(
            competition = competition.code,
            scheduled = matches.len(),
            kept = scanned.rows.len(),
            skipped = scanned.skipped.len(),
            "competition scanned"
        );
        out.merge(scanned);
    }
    out
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
