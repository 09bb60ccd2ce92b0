// ============================================================
// Layer 4 — Dataset Preprocessing
// ============================================================
// Turns raw CSV rows into clean Documents:
//
//   1. Count missing values per column (informational)
//   2. Drop rows missing `text` or `label`
//   3. Run the Normalizer over every surviving row's text
//
// Incomplete rows are not errors; they are filtered out and only
// show up in the MissingValueReport.

use serde::Serialize;

use crate::data::normalizer::Normalizer;
use crate::domain::document::{Document, Label, RawRecord};

/// Per-column missing-value counts, taken before any row is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MissingValueReport {
    pub total_rows:    usize,
    pub missing_text:  usize,
    pub missing_label: usize,
    /// Rows removed because at least one required value was missing
    pub dropped_rows:  usize,
}

/// Number of documents per class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassDistribution {
    pub real: usize,
    pub fake: usize,
}

impl ClassDistribution {
    pub fn from_labels(labels: impl IntoIterator<Item = Label>) -> Self {
        labels.into_iter().fold(Self::default(), |mut acc, label| {
            match label {
                Label::Real => acc.real += 1,
                Label::Fake => acc.fake += 1,
            }
            acc
        })
    }

    pub fn count(&self, label: Label) -> usize {
        match label {
            Label::Real => self.real,
            Label::Fake => self.fake,
        }
    }

    pub fn total(&self) -> usize {
        self.real + self.fake
    }
}

/// An ordered collection of complete, cleaned documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    documents: Vec<Document>,
}

impl Dataset {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Drop incomplete rows and clean the rest.
    pub fn preprocess(
        records:    Vec<RawRecord>,
        normalizer: &Normalizer<'_>,
    ) -> (Self, MissingValueReport) {
        let mut report = MissingValueReport {
            total_rows: records.len(),
            ..Default::default()
        };
        for r in &records {
            report.missing_text  += usize::from(r.text.is_none());
            report.missing_label += usize::from(r.label.is_none());
        }

        tracing::info!(
            "Missing values: text={}, label={} (of {} rows)",
            report.missing_text,
            report.missing_label,
            report.total_rows
        );

        let documents: Vec<Document> = records
            .into_iter()
            .filter_map(|r| match (r.text, r.label) {
                (Some(text), Some(label)) => Some((text, label)),
                _ => None,
            })
            .map(|(text, label)| {
                let cleaned = normalizer.clean(&text);
                Document::new(text, label, cleaned)
            })
            .collect();

        report.dropped_rows = report.total_rows - documents.len();
        if report.dropped_rows > 0 {
            tracing::warn!("Dropped {} incomplete rows", report.dropped_rows);
        }

        (Self { documents }, report)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    pub fn class_distribution(&self) -> ClassDistribution {
        ClassDistribution::from_labels(self.documents.iter().map(|d| d.label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: Option<&str>, label: Option<Label>) -> RawRecord {
        RawRecord::new(text.map(str::to_string), label)
    }

    #[test]
    fn test_row_missing_label_is_dropped() {
        let records = vec![
            record(Some("Senate approves budget"), Some(Label::Real)),
            record(Some("Aliens run the senate"), None),
            record(Some("Moon landing staged, insider says"), Some(Label::Fake)),
        ];
        let before = records.len();
        let (ds, report) = Dataset::preprocess(records, &Normalizer::english());

        assert_eq!(ds.len(), before - 1);
        assert_eq!(report.missing_label, 1);
        assert_eq!(report.missing_text, 0);
        assert_eq!(report.dropped_rows, 1);
    }

    #[test]
    fn test_cleaned_text_is_filled_in() {
        let records = vec![record(Some("The Votes were COUNTED!"), Some(Label::Real))];
        let (ds, _) = Dataset::preprocess(records, &Normalizer::english());
        assert_eq!(ds.documents()[0].cleaned_text, "vote counted");
        assert_eq!(ds.documents()[0].text, "The Votes were COUNTED!");
    }

    #[test]
    fn test_rows_missing_both_values_counted_once_as_dropped() {
        let records = vec![record(None, None), record(Some("ok"), Some(Label::Fake))];
        let (ds, report) = Dataset::preprocess(records, &Normalizer::english());
        assert_eq!(ds.len(), 1);
        assert_eq!(report.missing_text, 1);
        assert_eq!(report.missing_label, 1);
        assert_eq!(report.dropped_rows, 1);
    }

    #[test]
    fn test_text_cleaning_to_empty_is_kept() {
        let records = vec![record(Some("!!! 123"), Some(Label::Fake))];
        let (ds, report) = Dataset::preprocess(records, &Normalizer::english());
        assert_eq!(ds.len(), 1);
        assert_eq!(report.dropped_rows, 0);
        assert!(ds.documents()[0].cleaned_text.is_empty());
    }

    #[test]
    fn test_class_distribution() {
        let dist = ClassDistribution::from_labels([Label::Fake, Label::Real, Label::Fake]);
        assert_eq!(dist.count(Label::Fake), 2);
        assert_eq!(dist.count(Label::Real), 1);
        assert_eq!(dist.total(), 3);
    }
}
