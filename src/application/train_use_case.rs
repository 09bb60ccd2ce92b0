// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one end-to-end training run in order:
//
//   Step 1: Load the CSV rows             (Layer 4 - data)
//   Step 2: Drop incomplete rows, clean   (Layer 4 - data)
//   Step 3: Seeded train/test split       (Layer 4 - data)
//   Step 4: Fit TF-IDF + classifier       (Layer 5 - ml)
//   Step 5: Evaluate on the test split    (Layer 5 - ml)
//   Step 6: Log per-epoch metrics         (Layer 6 - infra, optional)
//
// Nothing is saved here. The caller decides whether the new
// pipeline replaces the current one and whether it is written out.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{ClassDistribution, Dataset, MissingValueReport},
    loader::CsvLoader,
    normalizer::Normalizer,
    splitter::train_test_split,
};
use crate::domain::document::{Document, Label};
use crate::domain::traits::DatasetSource;
use crate::infra::{
    artifacts::{ArtifactStore, DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH},
    metrics::{EpochMetrics, MetricsLogger},
};
use crate::ml::{
    classifier::PassiveAggressiveConfig,
    evaluator::{evaluate, Evaluation},
    pipeline::FittedPipeline,
    trainer::fit_pipeline,
    vectorizer::TfidfConfig,
};

pub const DEFAULT_DATA_PATH: &str = "news_dataset.csv";

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything one run needs: where the data and artifacts live, the
// split, and the hyperparameters of both fitted halves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:        String,
    pub model_path:       String,
    pub vectorizer_path:  String,
    pub test_fraction:    f64,
    pub seed:             u64,
    pub max_df:           f64,
    pub min_df:           usize,
    pub c:                f64,
    pub max_iter:         usize,
    /// Stopping tolerance; zero or negative disables early stopping
    pub tol:              f64,
    pub n_iter_no_change: usize,
    /// Directory for metrics.csv; None skips metrics logging
    pub metrics_dir:      Option<String>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:        DEFAULT_DATA_PATH.to_string(),
            model_path:       DEFAULT_MODEL_PATH.to_string(),
            vectorizer_path:  DEFAULT_VECTORIZER_PATH.to_string(),
            test_fraction:    0.2,
            seed:             42,
            max_df:           0.7,
            min_df:           1,
            c:                1.0,
            max_iter:         1000,
            tol:              1e-3,
            n_iter_no_change: 5,
            metrics_dir:      None,
        }
    }
}

impl TrainConfig {
    pub fn tfidf(&self) -> TfidfConfig {
        TfidfConfig {
            max_df: self.max_df,
            min_df: self.min_df,
            ..TfidfConfig::default()
        }
    }

    /// The shuffle seed is shared with the train/test split.
    pub fn passive_aggressive(&self) -> PassiveAggressiveConfig {
        PassiveAggressiveConfig {
            c:                self.c,
            max_iter:         self.max_iter,
            tol:              (self.tol > 0.0).then_some(self.tol),
            n_iter_no_change: self.n_iter_no_change,
            seed:             self.seed,
            ..PassiveAggressiveConfig::default()
        }
    }

    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.model_path, &self.vectorizer_path)
    }
}

// ─── Outputs ──────────────────────────────────────────────────────────────────
/// What a run reports back to the presentation layer.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub missing:      MissingValueReport,
    pub distribution: ClassDistribution,
    pub train_size:   usize,
    pub test_size:    usize,
    /// None when the test split is empty
    pub evaluation:   Option<Evaluation>,
    pub history:      Vec<EpochMetrics>,
    pub converged:    bool,
}

impl TrainReport {
    pub fn epochs_run(&self) -> usize {
        self.history.len()
    }
}

#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub report:   TrainReport,
    pub pipeline: FittedPipeline,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase<'r> {
    config:     TrainConfig,
    normalizer: Normalizer<'r>,
}

impl<'r> TrainUseCase<'r> {
    pub fn new(config: TrainConfig, normalizer: Normalizer<'r>) -> Self {
        Self { config, normalizer }
    }

    /// Run the whole pipeline and hand back the fitted result.
    pub fn execute(&self) -> Result<TrainOutcome> {
        let cfg = &self.config;

        // ── Step 1: Load the dataset ─────────────────────────────────────────
        tracing::info!("Loading dataset from '{}'", cfg.data_path);
        let records = CsvLoader::new(&cfg.data_path)
            .load_records()
            .context("Loading the training dataset failed")?;

        // ── Step 2: Drop incomplete rows and clean the text ──────────────────
        let (dataset, missing) = Dataset::preprocess(records, &self.normalizer);
        let distribution       = dataset.class_distribution();
        tracing::info!(
            "Dataset ready: {} documents ({} real, {} fake)",
            dataset.len(),
            distribution.real,
            distribution.fake
        );

        // ── Step 3: Train/test split ─────────────────────────────────────────
        let (train, test) =
            train_test_split(dataset.into_documents(), cfg.test_fraction, cfg.seed);
        tracing::info!("Split: {} train, {} test", train.len(), test.len());

        // ── Step 4: Fit on the training split only ───────────────────────────
        let run = fit_pipeline(
            &train,
            cfg.tfidf(),
            cfg.passive_aggressive(),
            self.normalizer.resources(),
        )
        .context("Fitting the classifier failed")?;

        // ── Step 5: Evaluate on held-out data ────────────────────────────────
        let evaluation = if test.is_empty() {
            tracing::warn!("Test split is empty; skipping evaluation");
            None
        } else {
            let (texts, labels) = unzip_cleaned(&test);
            Some(evaluate(&run.pipeline, &texts, &labels)?)
        };

        // ── Step 6: Per-epoch metrics ────────────────────────────────────────
        if let Some(dir) = &cfg.metrics_dir {
            let logger = MetricsLogger::new(dir)?;
            logger.log_all(&run.history)?;
            tracing::info!("Metrics written to '{}'", logger.csv_path().display());
        }

        let report = TrainReport {
            missing,
            distribution,
            train_size: train.len(),
            test_size:  test.len(),
            evaluation,
            converged:  run.pipeline.classifier().converged(),
            history:    run.history,
        };
        Ok(TrainOutcome {
            report,
            pipeline: run.pipeline,
        })
    }
}

fn unzip_cleaned(docs: &[Document]) -> (Vec<&str>, Vec<Label>) {
    docs.iter()
        .map(|d| (d.cleaned_text.as_str(), d.label))
        .unzip()
}
