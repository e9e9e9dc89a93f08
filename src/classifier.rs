use once_cell::sync::Lazy;

use crate::features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector};

const CLASS_COUNT: usize = 3;
const LEARNING_RATE: f64 = 0.5;
const MAX_ITERS: usize = 2000;
const L2: f64 = 1e-3;

pub const DEMO_MODEL_NOTICE: &str =
    "demo classifier fit on six hand-written rows; not a production model";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl Outcome {
    pub const ALL: [Outcome; CLASS_COUNT] = [Outcome::HomeWin, Outcome::Draw, Outcome::AwayWin];

    pub fn index(self) -> usize {
        match self {
            Outcome::HomeWin => 0,
            Outcome::Draw => 1,
            Outcome::AwayWin => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::HomeWin => "Home win",
            Outcome::Draw => "Draw",
            Outcome::AwayWin => "Away win",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeProbabilities {
    pub p_home_win: f64,
    pub p_draw: f64,
    pub p_away_win: f64,
}

impl OutcomeProbabilities {
    pub fn uniform() -> Self {
        Self {
            p_home_win: 1.0 / 3.0,
            p_draw: 1.0 / 3.0,
            p_away_win: 1.0 / 3.0,
        }
    }

    pub fn get(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::HomeWin => self.p_home_win,
            Outcome::Draw => self.p_draw,
            Outcome::AwayWin => self.p_away_win,
        }
    }

    pub fn pairs(&self) -> [(Outcome, f64); CLASS_COUNT] {
        Outcome::ALL.map(|o| (o, self.get(o)))
    }

    /// Arg-max; ties resolve towards the earlier class.
    pub fn recommended(&self) -> Outcome {
        let mut best = Outcome::HomeWin;
        for o in Outcome::ALL {
            if self.get(o) > self.get(best) {
                best = o;
            }
        }
        best
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrainingRow {
    pub features: FeatureVector,
    pub outcome: Outcome,
}

fn row(x: [f64; FEATURE_COUNT], outcome: Outcome) -> TrainingRow {
    TrainingRow {
        features: FeatureVector {
            home_form: x[0],
            away_form: x[1],
            home_avg_scored: x[2],
            away_avg_scored: x[3],
            home_avg_conceded: x[4],
            away_avg_conceded: x[5],
            rank_diff: x[6],
            home_rank_known: true,
            away_rank_known: true,
        },
        outcome,
    }
}

/// Six illustrative rows, not drawn from real results.
/// Columns follow `FEATURE_NAMES`.
pub fn demo_training_set() -> Vec<TrainingRow> {
    vec![
        row([12.0, 4.0, 2.2, 0.8, 0.6, 1.8, 10.0], Outcome::HomeWin),
        row([7.0, 7.0, 1.2, 1.2, 1.1, 1.1, 0.0], Outcome::Draw),
        row([13.0, 3.0, 2.4, 0.6, 0.4, 2.0, 12.0], Outcome::HomeWin),
        row([3.0, 13.0, 0.7, 2.3, 1.9, 0.5, -11.0], Outcome::AwayWin),
        row([8.0, 6.0, 1.3, 1.1, 1.0, 1.2, 2.0], Outcome::Draw),
        row([4.0, 12.0, 0.9, 2.0, 1.7, 0.7, -9.0], Outcome::AwayWin),
    ]
}

/// Multinomial logistic regression over standardized features.
#[derive(Debug, Clone)]
pub struct OutcomeClassifier {
    columns: [&'static str; FEATURE_COUNT],
    means: [f64; FEATURE_COUNT],
    stds: [f64; FEATURE_COUNT],
    weights: [[f64; FEATURE_COUNT]; CLASS_COUNT],
    bias: [f64; CLASS_COUNT],
    train_samples: usize,
}

impl OutcomeClassifier {
    /// Full-batch gradient descent on softmax cross-entropy with a small L2
    /// penalty. Deterministic: zero init, fixed step, fixed iteration count.
    /// An empty training set yields the uniform predictor.
    pub fn fit(rows: &[TrainingRow]) -> Self {
        let xs: Vec<[f64; FEATURE_COUNT]> = rows.iter().map(|r| r.features.as_array()).collect();
        let (means, stds) = feature_norm_stats(&xs);
        let zs: Vec<[f64; FEATURE_COUNT]> = xs
            .iter()
            .map(|x| standardize(x, &means, &stds))
            .collect();

        let mut weights = [[0.0; FEATURE_COUNT]; CLASS_COUNT];
        let mut bias = [0.0; CLASS_COUNT];
        if rows.is_empty() {
            return Self {
                columns: FEATURE_NAMES,
                means,
                stds,
                weights,
                bias,
                train_samples: 0,
            };
        }

        let n = rows.len() as f64;
        for _ in 0..MAX_ITERS {
            let mut grad_w = [[0.0; FEATURE_COUNT]; CLASS_COUNT];
            let mut grad_b = [0.0; CLASS_COUNT];

            for (z, r) in zs.iter().zip(rows) {
                let p = softmax(&logits(&weights, &bias, z));
                for k in 0..CLASS_COUNT {
                    let y = if r.outcome.index() == k { 1.0 } else { 0.0 };
                    let dz = p[k] - y;
                    grad_b[k] += dz;
                    for j in 0..FEATURE_COUNT {
                        grad_w[k][j] += dz * z[j];
                    }
                }
            }

            for k in 0..CLASS_COUNT {
                bias[k] -= LEARNING_RATE * grad_b[k] / n;
                for j in 0..FEATURE_COUNT {
                    let g = grad_w[k][j] / n + L2 * weights[k][j];
                    weights[k][j] -= LEARNING_RATE * g;
                }
            }
        }

        Self {
            columns: FEATURE_NAMES,
            means,
            stds,
            weights,
            bias,
            train_samples: rows.len(),
        }
    }

    pub fn columns(&self) -> &[&'static str; FEATURE_COUNT] {
        &self.columns
    }

    pub fn train_samples(&self) -> usize {
        self.train_samples
    }

    pub fn predict_proba(&self, features: &FeatureVector) -> OutcomeProbabilities {
        let z = standardize(&features.as_array(), &self.means, &self.stds);
        let p = softmax(&logits(&self.weights, &self.bias, &z));
        if p.iter().any(|v| !v.is_finite()) {
            return OutcomeProbabilities::uniform();
        }
        OutcomeProbabilities {
            p_home_win: p[0],
            p_draw: p[1],
            p_away_win: p[2],
        }
    }

    pub fn log_loss(&self, rows: &[TrainingRow]) -> f64 {
        if rows.is_empty() {
            return f64::INFINITY;
        }
        let sum: f64 = rows
            .iter()
            .map(|r| {
                -self
                    .predict_proba(&r.features)
                    .get(r.outcome)
                    .max(1e-12)
                    .ln()
            })
            .sum();
        sum / rows.len() as f64
    }
}

/// The demo model, fit on first use and shared for the rest of the process.
/// Training data is constant, so refitting per request would give the same
/// weights.
pub fn demo_classifier() -> &'static OutcomeClassifier {
    static MODEL: Lazy<OutcomeClassifier> =
        Lazy::new(|| OutcomeClassifier::fit(&demo_training_set()));
    &MODEL
}

fn feature_norm_stats(xs: &[[f64; FEATURE_COUNT]]) -> ([f64; FEATURE_COUNT], [f64; FEATURE_COUNT]) {
    let mut mean = [0.0; FEATURE_COUNT];
    let mut std = [1.0; FEATURE_COUNT];
    if xs.is_empty() {
        return (mean, std);
    }
    let n = xs.len() as f64;
    for x in xs {
        for j in 0..FEATURE_COUNT {
            mean[j] += x[j] / n;
        }
    }
    for (j, s) in std.iter_mut().enumerate() {
        let var = xs.iter().map(|x| (x[j] - mean[j]).powi(2)).sum::<f64>() / n;
        *s = var.sqrt().max(1e-6);
    }
    (mean, std)
}

fn standardize(
    x: &[f64; FEATURE_COUNT],
    mean: &[f64; FEATURE_COUNT],
    std: &[f64; FEATURE_COUNT],
) -> [f64; FEATURE_COUNT] {
    let mut out = [0.0; FEATURE_COUNT];
    for j in 0..FEATURE_COUNT {
        out[j] = (x[j] - mean[j]) / std[j].max(1e-6);
    }
    out
}

fn logits(
    weights: &[[f64; FEATURE_COUNT]; CLASS_COUNT],
    bias: &[f64; CLASS_COUNT],
    z: &[f64; FEATURE_COUNT],
) -> [f64; CLASS_COUNT] {
    let mut out = *bias;
    for k in 0..CLASS_COUNT {
        for j in 0..FEATURE_COUNT {
            out[k] += weights[k][j] * z[j];
        }
    }
    out
}

fn softmax(l: &[f64; CLASS_COUNT]) -> [f64; CLASS_COUNT] {
    let mx = l.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let e = l.map(|v| (v - mx).exp());
    let den = e.iter().sum::<f64>().max(1e-12);
    e.map(|v| v / den)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(p: &OutcomeProbabilities) {
        let sum = p.p_home_win + p.p_draw + p.p_away_win;
        assert!((sum - 1.0).abs() < 1e-9, "sum was {sum}");
        for (_, v) in p.pairs() {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn columns_match_feature_builder() {
        assert_eq!(demo_classifier().columns(), &FEATURE_NAMES);
    }

    #[test]
    fn third_training_row_favours_home_win() {
        let rows = demo_training_set();
        let model = OutcomeClassifier::fit(&rows);
        let p = model.predict_proba(&rows[2].features);
        assert_valid(&p);
        assert_eq!(p.recommended(), Outcome::HomeWin);
        assert!(p.p_home_win > p.p_away_win);
    }

    #[test]
    fn away_heavy_row_favours_away_win() {
        let rows = demo_training_set();
        let p = demo_classifier().predict_proba(&rows[3].features);
        assert_valid(&p);
        assert_eq!(p.recommended(), Outcome::AwayWin);
    }

    #[test]
    fn fitting_beats_uniform_on_training_data() {
        let rows = demo_training_set();
        let model = OutcomeClassifier::fit(&rows);
        assert_eq!(model.train_samples(), 6);
        assert!(model.log_loss(&rows) < (3.0_f64).ln());
    }

    #[test]
    fn refit_is_deterministic() {
        let rows = demo_training_set();
        let a = OutcomeClassifier::fit(&rows).predict_proba(&rows[0].features);
        let b = demo_classifier().predict_proba(&rows[0].features);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_training_set_is_uniform() {
        let model = OutcomeClassifier::fit(&[]);
        let rows = demo_training_set();
        let p = model.predict_proba(&rows[0].features);
        assert_eq!(p, OutcomeProbabilities::uniform());
    }

    #[test]
    fn extreme_inputs_stay_bounded() {
        let mut fv = demo_training_set()[0].features;
        fv.home_form = 1e9;
        fv.rank_diff = -1e9;
        let p = demo_classifier().predict_proba(&fv);
        assert_valid(&p);
    }

    #[test]
    fn recommendation_ties_go_to_earlier_class() {
        assert_eq!(OutcomeProbabilities::uniform().recommended(), Outcome::HomeWin);
        let p = OutcomeProbabilities {
            p_home_win: 0.2,
            p_draw: 0.4,
            p_away_win: 0.4,
        };
        assert_eq!(p.recommended(), Outcome::Draw);
    }
}
