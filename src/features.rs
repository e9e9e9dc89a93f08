use crate::form::RecentForm;
use crate::standings::RankLookup;

pub const FEATURE_COUNT: usize = 7;

/// Column order of `FeatureVector::as_array`. The classifier is fit with the
/// same order; reordering here silently corrupts predictions.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "home_form",
    "away_form",
    "home_avg_scored",
    "away_avg_scored",
    "home_avg_conceded",
    "away_avg_conceded",
    "rank_diff",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub home_form: f64,
    pub away_form: f64,
    pub home_avg_scored: f64,
    pub away_avg_scored: f64,
    pub home_avg_conceded: f64,
    pub away_avg_conceded: f64,
    /// `away_rank - home_rank`; positive means the home side sits higher.
    pub rank_diff: f64,
    pub home_rank_known: bool,
    pub away_rank_known: bool,
}

impl FeatureVector {
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.home_form,
            self.away_form,
            self.home_avg_scored,
            self.away_avg_scored,
            self.home_avg_conceded,
            self.away_avg_conceded,
            self.rank_diff,
        ]
    }

    pub fn rank_caveats(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.home_rank_known {
            out.push("home rank unknown, sentinel rank used".to_string());
        }
        if !self.away_rank_known {
            out.push("away rank unknown, sentinel rank used".to_string());
        }
        out
    }
}

pub fn build_features(
    home: &RecentForm,
    away: &RecentForm,
    home_rank: RankLookup,
    away_rank: RankLookup,
) -> FeatureVector {
    FeatureVector {
        home_form: f64::from(home.points),
        away_form: f64::from(away.points),
        home_avg_scored: home.avg_scored,
        away_avg_scored: away.avg_scored,
        home_avg_conceded: home.avg_conceded,
        away_avg_conceded: away.avg_conceded,
        rank_diff: f64::from(away_rank.rank) - f64::from(home_rank.rank),
        home_rank_known: home_rank.known,
        away_rank_known: away_rank.known,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(points: u32, scored: f64, conceded: f64) -> RecentForm {
        RecentForm {
            points,
            avg_scored: scored,
            avg_conceded: conceded,
            matches: 5,
        }
    }

    #[test]
    fn columns_land_in_published_order() {
        let fv = build_features(
            &form(11, 2.5, 0.5),
            &form(4, 0.75, 1.25),
            RankLookup {
                rank: 3,
                known: true,
            },
            RankLookup {
                rank: 17,
                known: true,
            },
        );
        let x = fv.as_array();
        let col = |name: &str| FEATURE_NAMES.iter().position(|n| *n == name).unwrap();

        assert_eq!(x[col("home_form")], 11.0);
        assert_eq!(x[col("away_form")], 4.0);
        assert_eq!(x[col("home_avg_scored")], 2.5);
        assert_eq!(x[col("away_avg_scored")], 0.75);
        assert_eq!(x[col("home_avg_conceded")], 0.5);
        assert_eq!(x[col("away_avg_conceded")], 1.25);
        assert_eq!(x[col("rank_diff")], 14.0);
        assert!(fv.rank_caveats().is_empty());
    }

    #[test]
    fn unknown_rank_is_flagged_but_sentinel_passes_through() {
        let fv = build_features(
            &form(7, 1.0, 1.0),
            &form(7, 1.0, 1.0),
            RankLookup {
                rank: 20,
                known: false,
            },
            RankLookup {
                rank: 6,
                known: true,
            },
        );
        assert_eq!(fv.rank_diff, -14.0);
        assert_eq!(fv.rank_caveats().len(), 1);
        assert!(fv.rank_caveats()[0].starts_with("home rank unknown"));
    }
}
