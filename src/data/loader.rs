// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Reads a CSV file of news articles using the csv crate.
//
// Expected layout:
//   - a header row naming the columns
//   - a `text` column (the article body)
//   - a `label` column (0 = real, 1 = fake)
//   - any number of extra columns, in any order, which are ignored
//
// Missing cells are represented as None in the RawRecord rather
// than rejected here: dropping incomplete rows is a dataset-level
// decision (see data::dataset), and the loader's job is only to
// report what the file contains.
//
// Failures (file missing, unreadable, broken CSV, required column
// absent) return an error and no rows at all.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use csv::{ReaderBuilder, StringRecord};
use std::{
    fs::File,
    path::{Path, PathBuf},
};

use crate::domain::document::{Label, RawRecord};
use crate::domain::error::{ClassifierError, ClassifierResult};
use crate::domain::traits::DatasetSource;

pub const TEXT_COLUMN:  &str = "text";
pub const LABEL_COLUMN: &str = "label";

/// Loads (text, label) rows from a CSV file.
/// Implements the DatasetSource trait from Layer 3.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, source: csv::Error) -> ClassifierError {
        ClassifierError::MalformedCsv {
            path: self.path.clone(),
            source,
        }
    }

    fn column_index(
        &self,
        headers: &StringRecord,
        column:  &'static str,
    ) -> ClassifierResult<usize> {
        headers
            .iter()
            .position(|h| {
                h.trim_start_matches('\u{feff}')
                    .trim()
                    .eq_ignore_ascii_case(column)
            })
            .ok_or_else(|| ClassifierError::MissingColumn {
                path: self.path.clone(),
                column,
            })
    }
}

impl DatasetSource for CsvLoader {
    fn load_records(&self) -> ClassifierResult<Vec<RawRecord>> {
        let file = File::open(&self.path).map_err(|source| {
            ClassifierError::DatasetUnavailable {
                path: self.path.clone(),
                source,
            }
        })?;

        // flexible: short rows are allowed, their absent cells count as missing
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);

        let headers   = reader.headers().map_err(|e| self.malformed(e))?.clone();
        let text_idx  = self.column_index(&headers, TEXT_COLUMN)?;
        let label_idx = self.column_index(&headers, LABEL_COLUMN)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| self.malformed(e))?;

            let text = row
                .get(text_idx)
                .filter(|t| !t.trim().is_empty())
                .map(str::to_string);
            let label = row.get(label_idx).and_then(Label::from_cell);

            records.push(RawRecord::new(text, label));
        }

        tracing::info!(
            "Loaded {} rows from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}
