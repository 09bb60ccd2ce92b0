// ============================================================
// Layer 5 — Fitted Pipeline
// ============================================================
// The fitted vectorizer and classifier, held together as one value.
//
// Feature indices are vectorizer-specific, so the two halves are
// only ever created, replaced, saved and loaded as a pair. There is
// no way to swap one half on its own: construction checks that the
// classifier's weight vector matches the vocabulary size.

use crate::data::normalizer::Normalizer;
use crate::domain::document::Label;
use crate::domain::error::{ClassifierError, ClassifierResult};
use crate::domain::prediction::Prediction;
use crate::ml::classifier::{confidence_percent, PassiveAggressiveClassifier};
use crate::ml::vectorizer::TfidfVectorizer;

#[derive(Debug, Clone, PartialEq)]
pub struct FittedPipeline {
    vectorizer: TfidfVectorizer,
    classifier: PassiveAggressiveClassifier,
}

impl FittedPipeline {
    pub fn new(
        vectorizer: TfidfVectorizer,
        classifier: PassiveAggressiveClassifier,
    ) -> ClassifierResult<Self> {
        if vectorizer.vocabulary_size() != classifier.n_features() {
            return Err(ClassifierError::MismatchedArtifacts);
        }
        Ok(Self { vectorizer, classifier })
    }

    /// Decision value for text that has already been through the Normalizer.
    pub fn decision_for_cleaned(&self, cleaned: &str) -> f64 {
        let x = self.vectorizer.transform(cleaned);
        self.classifier.decision_function(&x)
    }

    /// Labels for a batch of cleaned texts.
    pub fn predict_cleaned<S: AsRef<str>>(&self, cleaned: &[S]) -> Vec<Label> {
        cleaned
            .iter()
            .map(|t| Label::from_score(self.decision_for_cleaned(t.as_ref())))
            .collect()
    }

    /// Clean, vectorize and classify one raw text.
    pub fn classify(&self, normalizer: &Normalizer<'_>, text: &str) -> Prediction {
        let cleaned  = normalizer.clean(text);
        let decision = self.decision_for_cleaned(&cleaned);

        tracing::debug!("decision={:.4} for {} cleaned chars", decision, cleaned.len());

        Prediction::new(
            Label::from_score(decision),
            confidence_percent(decision),
            text,
        )
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &PassiveAggressiveClassifier {
        &self.classifier
    }
}
