// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by more than one layer:
//
//   artifacts.rs — Saving and loading the fitted pair
//                  Writes the vectorizer and the classifier as
//                  two versioned JSON files and refuses to load
//                  a model next to a vectorizer it was not
//                  trained with.
//
//   metrics.rs   — Training metrics logging
//                  Writes per-epoch hinge loss and update counts
//                  to a CSV file for later analysis.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling)

/// Artifact persistence for the fitted pipeline
pub mod artifacts;

/// Training metrics CSV logger
pub mod metrics;
