// ============================================================
// Layer 2 — Classifier Session
// ============================================================
// The one piece of mutable state in the program: the normalizer
// plus an optional fitted pipeline.
//
//   no pipeline ──train / load──► pipeline ──train / load──► new pipeline
//
// The pipeline is replaced in a single assignment, and only after
// the new one is complete. A failed train or load leaves the
// previous pipeline untouched. Predicting or evaluating with no
// pipeline is rejected with NotFitted.

use anyhow::Result;

use crate::application::train_use_case::{TrainConfig, TrainReport, TrainUseCase};
use crate::data::normalizer::Normalizer;
use crate::domain::document::Label;
use crate::domain::error::{ClassifierError, ClassifierResult};
use crate::domain::prediction::Prediction;
use crate::domain::traits::TextClassifier;
use crate::infra::artifacts::ArtifactStore;
use crate::ml::evaluator::{evaluate, Evaluation};
use crate::ml::pipeline::FittedPipeline;

/// Articles classified after a model is loaded, as a quick sanity check.
pub const SAMPLE_ARTICLES: &[&str] = &[
    "BREAKING: Scientists confirm that drinking bleach cures all known diseases, \
     doctors are furious and the government is hiding it!!!",
    "The Federal Reserve held interest rates steady on Wednesday, citing \
     continued moderation in inflation and a resilient labour market.",
    "SHOCKING: Celebrity reveals secret alien base under the White House, \
     insiders say the moon landing was staged there.",
    "The city council approved the new transit budget after a public hearing, \
     with construction expected to begin next spring.",
];

pub struct ClassifierSession<'r> {
    normalizer: Normalizer<'r>,
    pipeline:   Option<FittedPipeline>,
}

impl<'r> ClassifierSession<'r> {
    pub fn new(normalizer: Normalizer<'r>) -> Self {
        Self {
            normalizer,
            pipeline: None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn pipeline(&self) -> Option<&FittedPipeline> {
        self.pipeline.as_ref()
    }

    fn fitted(&self) -> ClassifierResult<&FittedPipeline> {
        self.pipeline.as_ref().ok_or(ClassifierError::NotFitted)
    }

    /// Train from scratch and adopt the result.
    pub fn train(&mut self, config: &TrainConfig) -> Result<TrainReport> {
        let outcome = TrainUseCase::new(config.clone(), self.normalizer).execute()?;
        self.pipeline = Some(outcome.pipeline);
        Ok(outcome.report)
    }

    pub fn save(&self, store: &ArtifactStore) -> ClassifierResult<()> {
        store.save(self.fitted()?)
    }

    /// Replace the current pipeline with a saved one.
    pub fn load(&mut self, store: &ArtifactStore) -> ClassifierResult<()> {
        let pipeline  = store.load()?;
        self.pipeline = Some(pipeline);
        Ok(())
    }

    pub fn predict(&self, text: &str) -> ClassifierResult<Prediction> {
        Ok(self.fitted()?.classify(&self.normalizer, text))
    }

    /// Evaluate on raw (uncleaned) texts.
    pub fn evaluate<S: AsRef<str>>(
        &self,
        texts:  &[S],
        labels: &[Label],
    ) -> ClassifierResult<Evaluation> {
        let pipeline = self.fitted()?;
        let cleaned: Vec<String> = texts
            .iter()
            .map(|t| self.normalizer.clean(t.as_ref()))
            .collect();
        evaluate(pipeline, &cleaned, labels)
    }

    pub fn predict_samples(&self) -> ClassifierResult<Vec<Prediction>> {
        SAMPLE_ARTICLES.iter().map(|text| self.predict(text)).collect()
    }
}

impl TextClassifier for ClassifierSession<'_> {
    fn classify(&self, text: &str) -> ClassifierResult<Prediction> {
        self.predict(text)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{synthetic_csv, synthetic_documents};

    fn session() -> ClassifierSession<'static> {
        ClassifierSession::new(Normalizer::english())
    }

    fn config_for(path: &std::path::Path) -> TrainConfig {
        TrainConfig {
            data_path: path.to_string_lossy().into_owned(),
            ..TrainConfig::default()
        }
    }

    fn trained_session(csv: &tempfile::NamedTempFile) -> ClassifierSession<'static> {
        let mut s = session();
        s.train(&config_for(csv.path())).expect("train");
        s
    }

    #[test]
    fn test_predict_before_training_is_rejected() {
        let s = session();
        assert!(matches!(s.predict("anything"), Err(ClassifierError::NotFitted)));
        assert!(matches!(s.classify("anything"), Err(ClassifierError::NotFitted)));
        assert!(matches!(
            s.evaluate(&["text"], &[Label::Real]),
            Err(ClassifierError::NotFitted)
        ));
        assert!(matches!(
            s.save(&ArtifactStore::default()),
            Err(ClassifierError::NotFitted)
        ));
    }

    #[test]
    fn test_prediction_is_well_formed() {
        let csv = synthetic_csv(20);
        let s   = trained_session(&csv);
        for text in SAMPLE_ARTICLES {
            let p = s.predict(text).expect("predict");
            assert!((0.0..=100.0).contains(&p.confidence));
            assert!(Label::ALL.contains(&p.label));
        }
        assert_eq!(s.predict_samples().expect("samples").len(), SAMPLE_ARTICLES.len());
    }

    #[test]
    fn test_evaluate_cleans_raw_text() {
        let csv   = synthetic_csv(20);
        let s     = trained_session(&csv);
        let docs  = synthetic_documents(5);
        let texts: Vec<&str>   = docs.iter().map(|d| d.text.as_str()).collect();
        let labels: Vec<Label> = docs.iter().map(|d| d.label).collect();
        let e = s.evaluate(&texts, &labels).expect("evaluate");
        assert_eq!(e.confusion.total(), 10);
        assert!(e.accuracy >= 0.8);
    }

    #[test]
    fn test_save_then_load_into_fresh_session() {
        let csv   = synthetic_csv(20);
        let dir   = tempfile::tempdir().expect("tempdir");
        let store = ArtifactStore::new(dir.path().join("m.json"), dir.path().join("v.json"));

        let trained = trained_session(&csv);
        trained.save(&store).expect("save");

        let mut fresh = session();
        fresh.load(&store).expect("load");
        for text in SAMPLE_ARTICLES {
            assert_eq!(trained.predict(text).ok(), fresh.predict(text).ok());
        }
    }

    #[test]
    fn test_failed_load_keeps_current_pipeline() {
        let csv    = synthetic_csv(20);
        let dir    = tempfile::tempdir().expect("tempdir");
        let mut s  = trained_session(&csv);
        let before = s.pipeline().cloned();

        let missing = ArtifactStore::new(dir.path().join("m.json"), dir.path().join("v.json"));
        assert!(s.load(&missing).is_err());
        assert_eq!(s.pipeline().cloned(), before);
    }

    #[test]
    fn test_failed_training_keeps_current_pipeline() {
        let csv    = synthetic_csv(20);
        let dir    = tempfile::tempdir().expect("tempdir");
        let mut s  = trained_session(&csv);
        let before = s.pipeline().cloned();

        assert!(s.train(&config_for(&dir.path().join("absent.csv"))).is_err());
        assert_eq!(s.pipeline().cloned(), before);
    }
}
