// ============================================================
// Layer 3 — Prediction Domain Type
// ============================================================
// The result of classifying one piece of text. Derived on demand,
// never persisted.

use serde::Serialize;

use crate::domain::document::Label;

/// Number of characters of the input echoed back in a Prediction.
pub const EXCERPT_CHARS: usize = 150;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Predicted class
    pub label: Label,

    /// Heuristic confidence in percent, always within [0, 100]
    pub confidence: f64,

    /// Display copy of the input, cut at EXCERPT_CHARS
    pub excerpt: String,
}

impl Prediction {
    pub fn new(label: Label, confidence: f64, source_text: &str) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 100.0),
            excerpt:    excerpt(source_text),
        }
    }
}

/// First EXCERPT_CHARS characters of `text`, with "..." appended when
/// anything was cut. Counts chars, not bytes, so multi-byte text never
/// splits inside a code point.
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
