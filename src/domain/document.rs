// ============================================================
// Layer 3 — Document Domain Types
// ============================================================
// A news article as the classifier sees it:
//   - the raw text exactly as read from the dataset
//   - its label (0 = real, 1 = fake)
//   - the cleaned derivative produced by the Normalizer
//
// RawRecord is the pre-filter shape straight out of the CSV.
// Either field may be missing; only complete records become
// Documents (see data::dataset).
//
// Reference: Rust Book §5 (Structs), §6 (Enums)

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two classes. The discriminants match the numeric labels
/// used in the input CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Real = 0,
    Fake = 1,
}

impl Label {
    /// Both labels in index order (Real, Fake).
    pub const ALL: [Label; 2] = [Label::Real, Label::Fake];

    /// Interpret one CSV cell as a label.
    ///
    /// Accepts `0` / `1`, their float spellings (`0.0`, `1.0`) and the
    /// words `real` / `fake` in any case. Anything else is treated as
    /// a missing label.
    pub fn from_cell(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if cell.eq_ignore_ascii_case("real") {
            return Some(Label::Real);
        }
        if cell.eq_ignore_ascii_case("fake") {
            return Some(Label::Fake);
        }

        match cell.parse::<f64>().ok()? {
            v if v == 0.0 => Some(Label::Real),
            v if v == 1.0 => Some(Label::Fake),
            _ => None,
        }
    }

    /// Row / column position in a confusion matrix.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Target value for the linear classifier: Fake is the positive class.
    pub fn sign(self) -> f64 {
        match self {
            Label::Real => -1.0,
            Label::Fake => 1.0,
        }
    }

    /// Label on the positive side of the decision boundary iff `score > 0`.
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 { Label::Fake } else { Label::Real }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Real => "Real",
            Label::Fake => "Fake",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One row as read from the dataset, before missing values are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub text:  Option<String>,
    pub label: Option<Label>,
}

impl RawRecord {
    pub fn new(text: Option<String>, label: Option<Label>) -> Self {
        Self { text, label }
    }
}

/// A complete, preprocessed article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Original text, untouched
    pub text: String,

    /// Ground-truth class
    pub label: Label,

    /// Output of the Normalizer for `text`
    pub cleaned_text: String,
}

impl Document {
    pub fn new(
        text:         impl Into<String>,
        label:        Label,
        cleaned_text: impl Into<String>,
    ) -> Self {
        Self {
            text:         text.into(),
            label,
            cleaned_text: cleaned_text.into(),
        }
    }
}
