use thiserror::Error;

/// Per-record failures inside the scan and analysis pipelines.
///
/// None of these abort a batch: the caller drops the offending match and
/// keeps going. Transport and JSON failures stay in `anyhow` land.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("no team stats for {team}")]
    MissingTeamStats { team: String },
    #[error("malformed kickoff timestamp {raw:?}")]
    MalformedTimestamp { raw: String },
    #[error("insufficient form history for team {team_id}: no finished matches")]
    InsufficientFormHistory { team_id: u32 },
    #[error("match index {index} out of range ({len} matches available)")]
    MatchIndexOutOfRange { index: usize, len: usize },
}

impl PipelineError {
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MissingTeamStats { .. } => "missing-stats",
            PipelineError::MalformedTimestamp { .. } => "bad-kickoff",
            PipelineError::InsufficientFormHistory { .. } => "no-form",
            PipelineError::MatchIndexOutOfRange { .. } => "bad-index",
        }
    }
}
