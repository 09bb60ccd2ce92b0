// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Scores a fitted pipeline on held-out data.
//
// The test texts go through the ALREADY-FITTED vectorizer only;
// nothing here refits anything on test data.
//
// Outputs:
//   - accuracy         fraction of exact label matches
//   - confusion matrix 2×2 counts, rows = true label,
//                      columns = predicted label, order (Real, Fake)
//   - per-class report precision / recall / F1 / support
//
// Ratios with a zero denominator are reported as 0.

use serde::Serialize;

use crate::domain::document::Label;
use crate::domain::error::{ClassifierError, ClassifierResult};
use crate::ml::pipeline::FittedPipeline;

// ─── ConfusionMatrix ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    /// counts[true][predicted]
    counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Label, Label)>) -> Self {
        let mut counts = [[0usize; 2]; 2];
        for (truth, predicted) in pairs {
            counts[truth.index()][predicted.index()] += 1;
        }
        Self { counts }
    }

    pub fn get(&self, truth: Label, predicted: Label) -> usize {
        self.counts[truth.index()][predicted.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        Label::ALL.iter().map(|&l| self.get(l, l)).sum()
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.correct(), self.total())
    }

    /// Metrics for one class treated as the positive class.
    pub fn class_metrics(&self, label: Label) -> ClassMetrics {
        let tp               = self.get(label, label);
        let predicted: usize = Label::ALL.iter().map(|&t| self.get(t, label)).sum();
        let support: usize   = Label::ALL.iter().map(|&p| self.get(label, p)).sum();

        let precision = ratio(tp, predicted);
        let recall    = ratio(tp, support);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        ClassMetrics { label, precision, recall, f1, support }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

// ─── Reports ──────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label:     Label,
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
    pub support:   usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub accuracy:  f64,
    pub confusion: ConfusionMatrix,
    /// One entry per label, in Label::ALL order
    pub per_class: Vec<ClassMetrics>,
}

impl Evaluation {
    pub fn from_confusion(confusion: ConfusionMatrix) -> Self {
        Self {
            accuracy:  confusion.accuracy(),
            per_class: Label::ALL.iter().map(|&l| confusion.class_metrics(l)).collect(),
            confusion,
        }
    }
}

/// Evaluate `pipeline` on cleaned test texts and their true labels.
pub fn evaluate<S: AsRef<str>>(
    pipeline: &FittedPipeline,
    cleaned:  &[S],
    labels:   &[Label],
) -> ClassifierResult<Evaluation> {
    if cleaned.len() != labels.len() {
        return Err(ClassifierError::LengthMismatch {
            texts:  cleaned.len(),
            labels: labels.len(),
        });
    }
    if cleaned.is_empty() {
        return Err(ClassifierError::EmptyCorpus("no documents to evaluate on"));
    }

    let predicted  = pipeline.predict_cleaned(cleaned);
    let confusion  = ConfusionMatrix::from_pairs(labels.iter().copied().zip(predicted));
    let evaluation = Evaluation::from_confusion(confusion);

    tracing::info!(
        "Evaluated on {} documents: accuracy {:.2}%",
        confusion.total(),
        evaluation.accuracy * 100.0
    );
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Label::{Fake, Real};

    fn sample_matrix() -> ConfusionMatrix {
        // 3 real: 2 right, 1 called fake; 2 fake: 1 right, 1 called real
        ConfusionMatrix::from_pairs([
            (Real, Real),
            (Real, Real),
            (Real, Fake),
            (Fake, Fake),
            (Fake, Real),
        ])
    }

    #[test]
    fn test_confusion_counts() {
        let m = sample_matrix();
        assert_eq!(m.get(Real, Real), 2);
        assert_eq!(m.get(Real, Fake), 1);
        assert_eq!(m.get(Fake, Real), 1);
        assert_eq!(m.get(Fake, Fake), 1);
        assert_eq!(m.total(), 5);
        assert_eq!(m.correct(), 3);
        assert!((m.accuracy() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_class_metrics() {
        let fake = sample_matrix().class_metrics(Fake);
        assert!((fake.precision - 0.5).abs() < 1e-12);
        assert!((fake.recall - 0.5).abs() < 1e-12);
        assert!((fake.f1 - 0.5).abs() < 1e-12);
        assert_eq!(fake.support, 2);

        let real = sample_matrix().class_metrics(Real);
        assert!((real.precision - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(real.support, 3);
    }

    #[test]
    fn test_undefined_ratios_are_zero() {
        let m    = ConfusionMatrix::from_pairs([(Real, Real)]);
        let fake = m.class_metrics(Fake);
        assert_eq!(fake.precision, 0.0);
        assert_eq!(fake.recall, 0.0);
        assert_eq!(fake.f1, 0.0);
    }

    #[test]
    fn test_evaluation_report_order() {
        let e = Evaluation::from_confusion(sample_matrix());
        assert_eq!(e.per_class[0].label, Real);
        assert_eq!(e.per_class[1].label, Fake);
    }
}
