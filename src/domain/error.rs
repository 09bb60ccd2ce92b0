// ============================================================
// Layer 3 — Classifier Errors
// ============================================================
// Every failure the core layers can report. All of them are
// recoverable: the caller aborts the current action and decides
// what to do next (the menu simply re-prompts).
//
//   I/O failures            → DatasetUnavailable, MalformedCsv,
//                             MissingColumn, ArtifactUnavailable,
//                             CorruptArtifact, InconsistentArtifact,
//                             MismatchedArtifacts
//   Precondition failures   → NotFitted
//   Training input problems → EmptyCorpus, SingleClass,
//                             LengthMismatch
//
// Malformed rows are NOT errors; they are filtered out by
// data::dataset and only counted.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("cannot read dataset '{}': {source}", path.display())]
    DatasetUnavailable {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in '{}': {source}", path.display())]
    MalformedCsv {
        path:   PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("dataset '{}' has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("cannot access artifact '{}': {source}", path.display())]
    ArtifactUnavailable {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact '{}' is corrupt: {source}", path.display())]
    CorruptArtifact {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact '{}' is inconsistent: {reason}", path.display())]
    InconsistentArtifact { path: PathBuf, reason: &'static str },

    #[error("artifact '{}' has unsupported format version {found} (expected {expected})", path.display())]
    UnsupportedArtifact { path: PathBuf, found: u32, expected: u32 },

    #[error("model and vectorizer were not fitted together (vocabulary digest mismatch)")]
    MismatchedArtifacts,

    #[error("no model is available; train or load one first")]
    NotFitted,

    #[error("input mismatch: {texts} texts but {labels} labels")]
    LengthMismatch { texts: usize, labels: usize },

    #[error("cannot fit on an empty corpus: {0}")]
    EmptyCorpus(&'static str),

    #[error("training data contains only one class ({0})")]
    SingleClass(crate::domain::document::Label),
}

pub type ClassifierResult<T> = std::result::Result<T, ClassifierError>;
