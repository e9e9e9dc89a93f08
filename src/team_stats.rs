use std::collections::HashMap;

use rand::Rng;

use crate::error::PipelineError;
use crate::football_data::TeamRecord;

// Placeholder ranges used when the provider omits season totals. This is a
// stopgap, not an imputation model.
const GOALS_FOR_PLACEHOLDER: (f64, f64) = (10.0, 30.0);
const GOALS_AGAINST_PLACEHOLDER: (f64, f64) = (5.0, 25.0);
const MATCHES_PLAYED_PLACEHOLDER: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamStats {
    pub goals_for: f64,
    pub goals_against: f64,
    pub matches_played: u32,
}

impl TeamStats {
    /// Goals scored per match; zero played matches count as one.
    pub fn goal_rate(&self) -> f64 {
        self.goals_for / f64::from(self.matches_played.max(1))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Imputed {
    pub goals_for: bool,
    pub goals_against: bool,
    pub matches_played: bool,
}

impl Imputed {
    pub fn any(&self) -> bool {
        self.goals_for || self.goals_against || self.matches_played
    }
}

/// Team stats for one competition snapshot, keyed by team name (the scheduled
/// match feed identifies sides by name).
#[derive(Debug, Clone, Default)]
pub struct TeamStatsTable {
    by_name: HashMap<String, (TeamStats, Imputed)>,
}

impl TeamStatsTable {
    pub fn insert(&mut self, name: &str, stats: TeamStats, imputed: Imputed) {
        self.by_name.insert(name.to_string(), (stats, imputed));
    }

    pub fn get(&self, name: &str) -> Result<&TeamStats, PipelineError> {
        self.by_name
            .get(name)
            .map(|(s, _)| s)
            .ok_or_else(|| PipelineError::MissingTeamStats {
                team: name.to_string(),
            })
    }

    pub fn imputed(&self, name: &str) -> Option<Imputed> {
        self.by_name.get(name).map(|(_, i)| *i)
    }

    pub fn imputed_teams(&self) -> usize {
        self.by_name.values().filter(|(_, i)| i.any()).count()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

pub fn build_team_stats<R: Rng>(teams: &[TeamRecord], rng: &mut R) -> TeamStatsTable {
    let mut table = TeamStatsTable::default();
    for team in teams {
        let mut imputed = Imputed::default();
        let goals_for = team.goals_for.unwrap_or_else(|| {
            imputed.goals_for = true;
            rng.gen_range(GOALS_FOR_PLACEHOLDER.0..GOALS_FOR_PLACEHOLDER.1)
        });
        let goals_against = team.goals_against.unwrap_or_else(|| {
            imputed.goals_against = true;
            rng.gen_range(GOALS_AGAINST_PLACEHOLDER.0..GOALS_AGAINST_PLACEHOLDER.1)
        });
        let matches_played = team.played_games.unwrap_or_else(|| {
            imputed.matches_played = true;
            MATCHES_PLAYED_PLACEHOLDER
        });
        table.insert(
            &team.name,
            TeamStats {
                goals_for,
                goals_against,
                matches_played,
            },
            imputed,
        );
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn team(name: &str, gf: Option<f64>, ga: Option<f64>, played: Option<u32>) -> TeamRecord {
        TeamRecord {
            id: 1,
            name: name.to_string(),
            short_name: None,
            goals_for: gf,
            goals_against: ga,
            played_games: played,
        }
    }

    #[test]
    fn real_values_pass_through() {
        let mut rng = StdRng::seed_from_u64(7);
        let table = build_team_stats(&[team("A", Some(21.0), Some(9.0), Some(12))], &mut rng);
        let stats = table.get("A").unwrap();
        assert_eq!(stats.goals_for, 21.0);
        assert_eq!(stats.goals_against, 9.0);
        assert_eq!(stats.matches_played, 12);
        assert!(!table.imputed("A").unwrap().any());
    }

    #[test]
    fn missing_values_use_placeholder_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let table = build_team_stats(&[team("B", None, None, None)], &mut rng);
        let stats = table.get("B").unwrap();
        assert!((10.0..30.0).contains(&stats.goals_for));
        assert!((5.0..25.0).contains(&stats.goals_against));
        assert_eq!(stats.matches_played, 10);
        assert_eq!(table.imputed_teams(), 1);
    }

    #[test]
    fn unknown_team_is_missing_stats() {
        let table = TeamStatsTable::default();
        assert_eq!(
            table.get("Nobody"),
            Err(PipelineError::MissingTeamStats {
                team: "Nobody".to_string()
            })
        );
    }

    #[test]
    fn goal_rate_guards_zero_played() {
        let stats = TeamStats {
            goals_for: 4.0,
            goals_against: 0.0,
            matches_played: 0,
        };
        assert_eq!(stats.goal_rate(), 4.0);
    }
}
