// ============================================================
// Layer 5 — Passive-Aggressive Classifier
// ============================================================
// Online linear classifier (PA-I, hinge loss) over sparse TF-IDF
// vectors. Fake is the positive class (+1), Real the negative (−1).
//
// Per example (x, y):
//   margin = y · (w·x + b)
//   loss   = max(0, 1 − margin)
//   if loss > 0:
//       τ = min(C, loss / ‖x‖²)
//       w ← w + τ·y·x
//       b ← b + τ·y
//
// Correct examples with margin ≥ 1 leave the weights untouched
// (passive); everything else moves the boundary just far enough to
// fix it, capped by C (aggressive).
//
// Epochs:
//   - samples are shuffled every epoch with a seeded RNG
//   - after each epoch, total loss L is compared with the best so far:
//       L > best − tol·n  → no improvement
//     training stops after `n_iter_no_change` epochs in a row
//     without improvement, or after `max_iter` epochs
//
// Reference: Crammer et al. (2006) Online Passive-Aggressive Algorithms

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::document::Label;
use crate::domain::error::{ClassifierError, ClassifierResult};
use crate::infra::metrics::EpochMetrics;
use crate::ml::vectorizer::SparseVector;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveAggressiveConfig {
    /// Maximum step size (aggressiveness)
    pub c: f64,

    /// Maximum number of passes over the training data
    pub max_iter: usize,

    /// Stopping tolerance; None runs all `max_iter` epochs
    pub tol: Option<f64>,

    /// Epochs without improvement before stopping
    pub n_iter_no_change: usize,

    /// Reshuffle examples every epoch
    pub shuffle: bool,

    /// Seed for the per-epoch shuffle
    pub seed: u64,

    /// Learn a bias term
    pub fit_intercept: bool,
}

impl Default for PassiveAggressiveConfig {
    fn default() -> Self {
        Self {
            c:                1.0,
            max_iter:         1000,
            tol:              Some(1e-3),
            n_iter_no_change: 5,
            shuffle:          true,
            seed:             42,
            fit_intercept:    true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveAggressiveClassifier {
    config:     PassiveAggressiveConfig,
    weights:    Vec<f64>,
    bias:       f64,
    epochs_run: usize,
    converged:  bool,
}

impl PassiveAggressiveClassifier {
    /// Fit on vectorized examples. Returns the model and one
    /// EpochMetrics row per pass over the data.
    pub fn fit(
        features:   &[SparseVector],
        labels:     &[Label],
        n_features: usize,
        config:     PassiveAggressiveConfig,
    ) -> ClassifierResult<(Self, Vec<EpochMetrics>)> {
        if features.is_empty() {
            return Err(ClassifierError::EmptyCorpus("no training examples"));
        }
        if features.len() != labels.len() {
            return Err(ClassifierError::LengthMismatch {
                texts:  features.len(),
                labels: labels.len(),
            });
        }
        if let Some(only) = single_class(labels) {
            return Err(ClassifierError::SingleClass(only));
        }

        let n = features.len();
        let mut weights = vec![0.0; n_features];
        let mut bias    = 0.0;
        let mut order: Vec<usize> = (0..n).collect();
        let mut rng     = StdRng::seed_from_u64(config.seed);

        let mut history        = Vec::new();
        let mut best_loss      = f64::INFINITY;
        let mut no_improvement = 0usize;
        let mut converged      = false;

        for epoch in 1..=config.max_iter {
            if config.shuffle {
                order.shuffle(&mut rng);
            }

            let mut total_loss = 0.0;
            let mut updates    = 0usize;

            for &i in &order {
                let x = &features[i];
                let y = labels[i].sign();

                let score = x.dot(&weights) + bias;
                let loss  = (1.0 - y * score).max(0.0);
                total_loss += loss;

                if loss <= 0.0 {
                    continue;
                }
                let sq_norm = x.squared_norm();
                if sq_norm == 0.0 {
                    continue;
                }

                let tau = config.c.min(loss / sq_norm);
                for (j, v) in x.iter() {
                    if let Some(w) = weights.get_mut(j) {
                        *w += tau * y * v;
                    }
                }
                if config.fit_intercept {
                    bias += tau * y;
                }
                updates += 1;
            }

            history.push(EpochMetrics::new(epoch, total_loss / n as f64, updates));

            if let Some(tol) = config.tol {
                if total_loss > best_loss - tol * n as f64 {
                    no_improvement += 1;
                } else {
                    no_improvement = 0;
                }
                if total_loss < best_loss {
                    best_loss = total_loss;
                }
                if no_improvement >= config.n_iter_no_change {
                    converged = true;
                    break;
                }
            }
        }

        let epochs_run = history.len();
        if config.tol.is_some() && !converged {
            tracing::warn!(
                "Passive-aggressive training hit max_iter={} without converging",
                config.max_iter
            );
        } else {
            tracing::debug!("Passive-aggressive training finished after {} epochs", epochs_run);
        }

        let model = Self {
            config,
            weights,
            bias,
            epochs_run,
            converged,
        };
        Ok((model, history))
    }

    /// Signed distance from the boundary, positive means Fake.
    pub fn decision_function(&self, x: &SparseVector) -> f64 {
        x.dot(&self.weights) + self.bias
    }

    pub fn predict(&self, x: &SparseVector) -> Label {
        Label::from_score(self.decision_function(x))
    }

    /// A deserialized model must have finite parameters.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.bias.is_finite() || !self.weights.iter().all(|w| w.is_finite()) {
            return Err("weights and bias must be finite");
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn epochs_run(&self) -> usize {
        self.epochs_run
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn config(&self) -> &PassiveAggressiveConfig {
        &self.config
    }
}

/// Some(label) if every label is the same.
fn single_class(labels: &[Label]) -> Option<Label> {
    let first = *labels.first()?;
    labels.iter().all(|&l| l == first).then_some(first)
}

/// Pseudo-probability of the positive class from the decision value:
/// the logistic function of the signed margin. A heuristic, not a
/// calibrated probability.
pub fn positive_probability(decision: f64) -> f64 {
    if decision >= 0.0 {
        1.0 / (1.0 + (-decision).exp())
    } else {
        let e = decision.exp();
        e / (1.0 + e)
    }
}

/// Confidence in percent for whichever class was predicted:
/// max(p, 1 − p) × 100, always within [50, 100].
pub fn confidence_percent(decision: f64) -> f64 {
    let p = positive_probability(decision);
    p.max(1.0 - p) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(usize, f64)]) -> SparseVector {
        SparseVector::from_sorted(entries.to_vec())
    }

    fn toy_problem() -> (Vec<SparseVector>, Vec<Label>) {
        // feature 0 ⇒ fake, feature 1 ⇒ real, feature 2 is noise
        let features = vec![
            vector(&[(0, 1.0)]),
            vector(&[(0, 0.8), (2, 0.6)]),
            vector(&[(1, 1.0)]),
            vector(&[(1, 0.8), (2, 0.6)]),
        ];
        let labels = vec![Label::Fake, Label::Fake, Label::Real, Label::Real];
        (features, labels)
    }

    #[test]
    fn test_separates_toy_problem() {
        let (x, y)     = toy_problem();
        let (model, _) = PassiveAggressiveClassifier::fit(&x, &y, 3, Default::default())
            .expect("fit");
        for (xi, yi) in x.iter().zip(&y) {
            assert_eq!(model.predict(xi), *yi);
        }
        assert!(model.converged());
    }

    #[test]
    fn test_stops_early_once_loss_plateaus() {
        let (x, y)           = toy_problem();
        let (model, history) = PassiveAggressiveClassifier::fit(&x, &y, 3, Default::default())
            .expect("fit");
        assert!(model.epochs_run() < 1000);
        assert_eq!(history.len(), model.epochs_run());
        // loss is zero once separated
        assert_eq!(history.last().map(|m| m.hinge_loss), Some(0.0));
    }

    #[test]
    fn test_without_tol_runs_every_epoch() {
        let (x, y) = toy_problem();
        let cfg    = PassiveAggressiveConfig {
            max_iter: 12,
            tol:      None,
            ..Default::default()
        };
        let (model, history) = PassiveAggressiveClassifier::fit(&x, &y, 3, cfg).expect("fit");
        assert_eq!(model.epochs_run(), 12);
        assert_eq!(history.len(), 12);
        assert!(!model.converged());
    }

    #[test]
    fn test_same_seed_same_model() {
        let (x, y) = toy_problem();
        let (a, _) = PassiveAggressiveClassifier::fit(&x, &y, 3, Default::default()).expect("fit");
        let (b, _) = PassiveAggressiveClassifier::fit(&x, &y, 3, Default::default()).expect("fit");
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_update_is_passive_aggressive_step() {
        // one fake example, C large: τ = loss / ‖x‖² = 1 / 1
        let x   = vec![vector(&[(0, 1.0)]), vector(&[(1, 1.0)])];
        let y   = vec![Label::Fake, Label::Real];
        let cfg = PassiveAggressiveConfig {
            max_iter: 1,
            tol:      None,
            shuffle:  false,
            c:        10.0,
            ..Default::default()
        };
        let (model, history) = PassiveAggressiveClassifier::fit(&x, &y, 2, cfg).expect("fit");
        // example 1: score 0 → loss 1, τ = 1 → w0 = 1, b = 1
        // example 2: score b = 1 → loss 2, τ = 2 → w1 = -2, b = -1
        assert_eq!(model.weights(), &[1.0, -2.0]);
        assert_eq!(model.bias(), -1.0);
        assert_eq!(history[0].updates, 2);
    }

    #[test]
    fn test_single_class_is_rejected() {
        let x   = vec![vector(&[(0, 1.0)]), vector(&[(1, 1.0)])];
        let y   = vec![Label::Fake, Label::Fake];
        let err = PassiveAggressiveClassifier::fit(&x, &y, 2, Default::default()).unwrap_err();
        assert!(matches!(err, ClassifierError::SingleClass(Label::Fake)));
    }

    #[test]
    fn test_empty_training_set_is_rejected() {
        let err = PassiveAggressiveClassifier::fit(&[], &[], 2, Default::default()).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyCorpus(_)));
    }

    #[test]
    fn test_validate_rejects_non_finite_parameters() {
        let (x, y)         = toy_problem();
        let (mut model, _) = PassiveAggressiveClassifier::fit(&x, &y, 3, Default::default())
            .expect("fit");
        assert!(model.validate().is_ok());

        model.weights[1] = f64::NAN;
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_confidence_bounds() {
        for d in [-1e6, -3.0, -0.1, 0.0, 0.1, 3.0, 1e6, f64::MAX, f64::MIN] {
            let c = confidence_percent(d);
            assert!((50.0..=100.0).contains(&c), "confidence {c} for {d}");
        }
        assert_eq!(confidence_percent(0.0), 50.0);
    }

    #[test]
    fn test_positive_probability_is_symmetric() {
        let p = positive_probability(1.5);
        let q = positive_probability(-1.5);
        assert!((p + q - 1.0).abs() < 1e-12);
    }
}
