// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All feature extraction and model code lives here.
//
//   vectorizer.rs — TF-IDF: vocabulary, idf weights, sparse rows
//
//   classifier.rs — Passive-aggressive (PA-I) linear classifier
//                   and the margin → confidence mapping
//
//   pipeline.rs   — The fitted vectorizer + classifier pair;
//                   the only thing that can make predictions
//
//   trainer.rs    — Fits both halves on the training split
//
//   evaluator.rs  — Accuracy, confusion matrix, per-class report
//
// Reference: Crammer et al. (2006) Online Passive-Aggressive Algorithms
//            Salton & Buckley (1988) Term-weighting approaches

/// TF-IDF vectorizer and sparse vectors
pub mod vectorizer;

/// Passive-aggressive classifier
pub mod classifier;

/// Vectorizer + classifier, fitted together
pub mod pipeline;

/// Training workflow for the pair
pub mod trainer;

/// Held-out evaluation
pub mod evaluator;
