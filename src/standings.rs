use crate::football_data::StandingRow;

/// Rank assumed for a team missing from the table: bottom of a 20-team league.
pub const UNKNOWN_RANK: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankLookup {
    pub rank: u32,
    /// False when `rank` is the `UNKNOWN_RANK` sentinel.
    pub known: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Standings {
    pub competition: String,
    pub rows: Vec<StandingRow>,
}

impl Standings {
    pub fn new(competition: &str, rows: Vec<StandingRow>) -> Self {
        Self {
            competition: competition.to_string(),
            rows,
        }
    }

    /// Never fails: an absent team degrades to the sentinel with `known = false`.
    pub fn rank_of(&self, team_id: u32) -> RankLookup {
        match self.rows.iter().find(|r| r.team_id == team_id) {
            Some(row) => RankLookup {
                rank: row.position,
                known: true,
            },
            None => RankLookup {
                rank: UNKNOWN_RANK,
                known: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Standings {
        Standings::new(
            "PL",
            vec![
                StandingRow {
                    position: 1,
                    team_id: 64,
                    team_name: "Liverpool FC".to_string(),
                },
                StandingRow {
                    position: 2,
                    team_id: 65,
                    team_name: "Manchester City FC".to_string(),
                },
            ],
        )
    }

    #[test]
    fn finds_position() {
        assert_eq!(
            table().rank_of(65),
            RankLookup {
                rank: 2,
                known: true
            }
        );
    }

    #[test]
    fn absent_team_gets_sentinel() {
        let lookup = table().rank_of(999);
        assert_eq!(lookup.rank, 20);
        assert!(!lookup.known);
        assert!(!Standings::default().rank_of(64).known);
    }
}
