// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from a CSV file on disk to clean, split documents.
//
//   dataset.csv
//       │
//       ▼
//   CsvLoader         → reads rows, missing cells become None
//       │
//       ▼
//   Dataset           → drops incomplete rows, counts what was missing
//       │
//       ▼
//   Normalizer        → lowercase, strip noise, tokenize, stopwords, lemmas
//       │
//       ▼
//   train_test_split  → seeded shuffle into train / test
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Reads (text, label) rows from CSV
pub mod loader;

/// Missing-value filtering and per-row cleaning
pub mod dataset;

/// Deterministic text cleaning + shared NLP resources
pub mod normalizer;

/// English stopword list
pub mod stopwords;

/// Noun-form lemmatizer
pub mod lemmatizer;

/// Seeded train/test split
pub mod splitter;
