// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records per-epoch training metrics of the passive-aggressive
// classifier to a CSV file.
//
// Metrics recorded per epoch:
//   - epoch:      the epoch number (1, 2, 3, ...)
//   - hinge_loss: mean hinge loss over the training set, measured
//                 before each example's update
//   - updates:    how many examples moved the weights this epoch
//
// Output file: <dir>/metrics.csv
//
// Example CSV output:
//   epoch,hinge_loss,updates
//   1,0.913402,811
//   2,0.204117,377
//   ...
//
// How to read the metrics:
//   - hinge_loss should fall towards 0 as the data gets separated
//   - updates dropping to 0 means every example now clears the margin
//
// Reference: csv crate documentation (Writer + serde)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

/// One row of metrics for a single pass over the training data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Epoch number (starts at 1)
    pub epoch: usize,

    /// Mean hinge loss, max(0, 1 − y·f(x)), over the epoch
    pub hinge_loss: f64,

    /// Number of examples that triggered a weight update
    pub updates: usize,
}

impl EpochMetrics {
    pub fn new(epoch: usize, hinge_loss: f64, updates: usize) -> Self {
        Self { epoch, hinge_loss, updates }
    }
}

/// Appends epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the directory if needed. The header is written with the
    /// first row only when the file does not exist yet, so repeated runs
    /// append to one log.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        Ok(Self {
            csv_path: dir.join("metrics.csv"),
        })
    }

    /// Append every row of `history` in one write.
    pub fn log_all(&self, history: &[EpochMetrics]) -> Result<()> {
        let is_new = !self.csv_path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        for m in history {
            writer.serialize(m)?;
        }
        writer.flush()?;

        tracing::debug!(
            "Logged {} epochs of metrics to '{}'",
            history.len(),
            self.csv_path.display()
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
