use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use tracing::{info, warn};

use crate::classifier::{DEMO_MODEL_NOTICE, Outcome, OutcomeClassifier, OutcomeProbabilities};
use crate::competitions::Competition;
use crate::error::PipelineError;
use crate::features::{FeatureVector, build_features};
use crate::football_data::{FootballDataClient, MatchRecord};
use crate::form::{FORM_WINDOW, RecentForm, recent_form};
use crate::standings::Standings;

#[derive(Debug, Clone)]
pub struct MatchAnalysis {
    pub match_label: String,
    pub home_form: RecentForm,
    pub away_form: RecentForm,
    pub features: FeatureVector,
    pub probabilities: OutcomeProbabilities,
    pub recommendation: Outcome,
    pub caveats: Vec<String>,
}

impl MatchAnalysis {
    pub fn outcome_rows(&self) -> [(&'static str, f64); 3] {
        self.probabilities.pairs().map(|(o, p)| (o.label(), p))
    }

    pub fn recommendation_label(&self) -> &'static str {
        self.recommendation.label()
    }

    pub fn notice(&self) -> &'static str {
        DEMO_MODEL_NOTICE
    }
}

pub fn select_match(matches: &[MatchRecord], index: usize) -> Result<&MatchRecord, PipelineError> {
    matches
        .get(index)
        .ok_or(PipelineError::MatchIndexOutOfRange {
            index,
            len: matches.len(),
        })
}

/// Form, rank, features and classifier output for one selected match.
///
/// A side with no finished matches fails the analysis with
/// `InsufficientFormHistory`; an unranked side degrades to the sentinel rank
/// and adds a caveat.
pub fn analyze_match(
    selected: &MatchRecord,
    home_history: &[MatchRecord],
    away_history: &[MatchRecord],
    standings: &Standings,
    classifier: &OutcomeClassifier,
) -> Result<MatchAnalysis, PipelineError> {
    let home_form = recent_form(selected.home.id, home_history)?;
    let away_form = recent_form(selected.away.id, away_history)?;
    let home_rank = standings.rank_of(selected.home.id);
    let away_rank = standings.rank_of(selected.away.id);

    let features = build_features(&home_form, &away_form, home_rank, away_rank);
    let probabilities = classifier.predict_proba(&features);

    let mut caveats = features.rank_caveats();
    for (side, form) in [("home", &home_form), ("away", &away_form)] {
        if form.is_partial() {
            caveats.push(format!(
                "{side} form over {} of {FORM_WINDOW} matches",
                form.matches
            ));
        }
    }

    Ok(MatchAnalysis {
        match_label: selected.label(),
        home_form,
        away_form,
        features,
        recommendation: probabilities.recommended(),
        probabilities,
        caveats,
    })
}

pub fn fetch_upcoming(
    client: &FootballDataClient,
    competition: &Competition,
    today: NaiveDate,
    days_ahead: u32,
) -> Result<Vec<MatchRecord>> {
    let until = today
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .context("date range overflow")?;
    client.fetch_matches_between(competition.code, today, until)
}

pub fn run_analysis(
    client: &FootballDataClient,
    competition: &Competition,
    selected: &MatchRecord,
    classifier: &OutcomeClassifier,
) -> Result<MatchAnalysis> {
    let home_history = client
        .fetch_finished_matches(selected.home.id, FORM_WINDOW)
        .with_context(|| format!("recent matches for {}", selected.home.name))?;
    let away_history = client
        .fetch_finished_matches(selected.away.id, FORM_WINDOW)
        .with_context(|| format!("recent matches for {}", selected.away.name))?;

    let standings = match client.fetch_standings(competition.code) {
        Ok(rows) => Standings::new(competition.code, rows),
        Err(err) => {
            warn!(competition = competition.code, error = %format!("{err:#}"), "standings unavailable, ranks will use the sentinel");
            Standings::new(competition.code, Vec::new())
        }
    };

    let analysis = analyze_match(
        selected,
        &home_history,
        &away_history,
        &standings,
        classifier,
    )?;
    info!(
        fixture = %analysis.match_label,
        recommendation = analysis.recommendation_label(),
        caveats = analysis.caveats.len(),
        "match analysed"
    );
    Ok(analysis)
}
