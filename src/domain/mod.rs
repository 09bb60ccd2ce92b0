// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// system works with: documents, labels, predictions, errors.
//
// Rules for this layer:
//   - NO file I/O
//   - NO ML code
//   - Only types and the traits other layers implement
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Labels, raw rows and preprocessed documents
pub mod document;

// Classification results
pub mod prediction;

// Error taxonomy shared by the core layers
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
