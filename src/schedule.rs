use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::error::PipelineError;

/// Kickoff format exactly as served upstream: ISO-8601 UTC, seconds, `Z`.
pub const KICKOFF_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn parse_utc_kickoff(raw: &str) -> Result<DateTime<Utc>, PipelineError> {
    NaiveDateTime::parse_from_str(raw, KICKOFF_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| PipelineError::MalformedTimestamp {
            raw: raw.to_string(),
        })
}

/// Closed interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KickoffWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl KickoffWindow {
    pub fn from_now(now: DateTime<Utc>, hours: u32) -> Self {
        Self {
            start: now,
            end: now + Duration::hours(i64::from(hours)),
        }
    }

    pub fn contains(&self, kickoff: DateTime<Utc>) -> bool {
        self.start <= kickoff && kickoff <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> DateTime<Utc> {
        parse_utc_kickoff(raw).unwrap()
    }

    #[test]
    fn parses_provider_format() {
        let t = at("2026-10-18T19:45:00Z");
        assert_eq!(t.format("%Y-%m-%d %H:%M").to_string(), "2026-10-18 19:45");
    }

    #[test]
    fn rejects_other_shapes() {
        for raw in [
            "",
            "2026-10-18",
            "2026-10-18T19:45Z",
            "2026-10-18T19:45:00",
            "2026-10-18T19:45:00.000Z",
            "2026-10-18 19:45:00Z",
            "2026-13-18T19:45:00Z",
        ] {
            assert!(
                matches!(
                    parse_utc_kickoff(raw),
                    Err(PipelineError::MalformedTimestamp { .. })
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let now = at("2026-10-18T12:00:00Z");
        let window = KickoffWindow::from_now(now, 72);
        let one = Duration::seconds(1);

        assert!(window.contains(now));
        assert!(window.contains(now + Duration::hours(72)));
        assert!(!window.contains(now - one));
        assert!(!window.contains(now + Duration::hours(72) + one));
    }
}
