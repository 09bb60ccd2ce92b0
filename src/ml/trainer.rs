// ============================================================
// Layer 5 — Trainer
// ============================================================
// Fits the vectorizer and the classifier on the TRAINING split
// only, and returns them as one FittedPipeline.
//
//   cleaned training texts ──► TfidfVectorizer::fit
//                                   │
//                                   ▼
//                      transform_all (sparse rows)
//                                   │
//                                   ▼
//              PassiveAggressiveClassifier::fit (labels)
//                                   │
//                                   ▼
//                             FittedPipeline
//
// Reference: Crammer et al. (2006), Rust Book §13 (Iterators)

use crate::data::normalizer::NlpResources;
use crate::domain::document::{Document, Label};
use crate::domain::error::ClassifierResult;
use crate::infra::metrics::EpochMetrics;
use crate::ml::classifier::{PassiveAggressiveClassifier, PassiveAggressiveConfig};
use crate::ml::pipeline::FittedPipeline;
use crate::ml::vectorizer::{TfidfConfig, TfidfVectorizer};

/// Everything a fit produces.
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub pipeline:   FittedPipeline,
    /// One row per epoch of the classifier
    pub history:    Vec<EpochMetrics>,
    /// Number of vectorized training examples
    pub n_examples: usize,
}

pub fn fit_pipeline(
    train:     &[Document],
    tfidf:     TfidfConfig,
    pa:        PassiveAggressiveConfig,
    resources: &NlpResources,
) -> ClassifierResult<TrainingRun> {
    let texts: Vec<&str>   = train.iter().map(|d| d.cleaned_text.as_str()).collect();
    let labels: Vec<Label> = train.iter().map(|d| d.label).collect();

    // ── Step 1: TF-IDF over the training corpus ──────────────────────────────
    let vectorizer = TfidfVectorizer::fit(&texts, tfidf, resources)?;
    let features   = vectorizer.transform_all(&texts);
    tracing::info!(
        "Vectorized {} training documents over {} terms",
        features.len(),
        vectorizer.vocabulary_size()
    );

    // ── Step 2: passive-aggressive classifier ────────────────────────────────
    let (classifier, history) = PassiveAggressiveClassifier::fit(
        &features,
        &labels,
        vectorizer.vocabulary_size(),
        pa,
    )?;
    tracing::info!(
        "Classifier trained in {} epochs (converged: {})",
        classifier.epochs_run(),
        classifier.converged()
    );

    Ok(TrainingRun {
        pipeline:   FittedPipeline::new(vectorizer, classifier)?,
        history,
        n_examples: features.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalizer::Normalizer;
    use crate::domain::error::ClassifierError;
    use crate::test_support::synthetic_documents;

    fn run(docs: &[Document]) -> ClassifierResult<TrainingRun> {
        fit_pipeline(
            docs,
            TfidfConfig::default(),
            PassiveAggressiveConfig::default(),
            NlpResources::english(),
        )
    }

    #[test]
    fn test_fits_on_synthetic_corpus() {
        let docs = synthetic_documents(20);
        let run  = run(&docs).expect("fit");
        assert_eq!(run.n_examples, 40);
        assert_eq!(run.history.len(), run.pipeline.classifier().epochs_run());

        let predicted = run.pipeline.predict_cleaned(
            &docs.iter().map(|d| d.cleaned_text.as_str()).collect::<Vec<_>>(),
        );
        let correct = predicted.iter().zip(&docs).filter(|(p, d)| **p == d.label).count();
        assert!(correct >= 36, "only {correct}/40 training documents right");
    }

    #[test]
    fn test_term_in_every_document_is_pruned() {
        let run = run(&synthetic_documents(10)).expect("fit");
        // every synthetic article mentions "today"
        assert!(run.pipeline.vectorizer().idf("today").is_none());
    }

    #[test]
    fn test_classifies_typical_fake_headline() {
        let run  = run(&synthetic_documents(20)).expect("fit");
        let pred = run
            .pipeline
            .classify(&Normalizer::english(), "SHOCKING miracle HOAX!!!");
        assert_eq!(pred.label, Label::Fake);
        assert!((50.0..=100.0).contains(&pred.confidence));
    }

    #[test]
    fn test_single_class_training_set_is_rejected() {
        let docs: Vec<Document> = synthetic_documents(10)
            .into_iter()
            .filter(|d| d.label == Label::Real)
            .collect();
        let err = run(&docs).unwrap_err();
        assert!(matches!(err, ClassifierError::SingleClass(Label::Real)));
    }
}
