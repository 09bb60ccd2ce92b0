// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between layers. The application layer talks to a
// DatasetSource and a TextClassifier; it never sees CSV readers
// or weight vectors directly.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use crate::domain::document::RawRecord;
use crate::domain::error::ClassifierResult;
use crate::domain::prediction::Prediction;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Anything that can produce the raw (text, label) rows of a dataset.
///
/// Implementations:
///   - CsvLoader → reads a CSV file with `text` and `label` columns
pub trait DatasetSource {
    /// Load every row. Either the whole table or an error, never a
    /// partial result.
    fn load_records(&self) -> ClassifierResult<Vec<RawRecord>>;
}

// ─── TextClassifier ───────────────────────────────────────────────────────────
/// Anything that can label a free-form text as real or fake.
///
/// Implementations:
///   - ClassifierSession → delegates to its fitted pipeline, or NotFitted
pub trait TextClassifier {
    fn classify(&self, text: &str) -> ClassifierResult<Prediction>;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// A fitted artifact whose state can be written to and restored
/// from a single file.
pub trait Persistable: Sized {
    fn save(&self, path: &Path) -> ClassifierResult<()>;

    fn load(path: &Path) -> ClassifierResult<Self>;
}
