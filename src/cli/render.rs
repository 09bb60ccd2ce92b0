// ============================================================
// Layer 1 — Text Rendering
// ============================================================
// Plain-text charts and tables for stdout:
//
//   Class distribution        Confusion matrix
//   Real  ██████████  512     rows = true label,
//   Fake  ████████    431     columns = predicted label
//
// Every function writes to any io::Write so the menu tests can
// capture the output in memory.

use std::io::{self, Write};

use crate::application::train_use_case::TrainReport;
use crate::data::dataset::{ClassDistribution, MissingValueReport};
use crate::domain::document::Label;
use crate::domain::prediction::Prediction;
use crate::ml::evaluator::{ConfusionMatrix, Evaluation};

const BAR_WIDTH: usize = 40;

pub fn missing_values<W: Write>(out: &mut W, m: &MissingValueReport) -> io::Result<()> {
    writeln!(out, "Missing values ({} rows):", m.total_rows)?;
    writeln!(out, "  text   {:>8}", m.missing_text)?;
    writeln!(out, "  label  {:>8}", m.missing_label)?;
    writeln!(out, "  dropped rows: {}", m.dropped_rows)
}

pub fn class_distribution<W: Write>(out: &mut W, dist: &ClassDistribution) -> io::Result<()> {
    writeln!(out, "Class distribution:")?;
    let largest = Label::ALL.iter().map(|&l| dist.count(l)).max().unwrap_or(0);
    for label in Label::ALL {
        let count = dist.count(label);
        let len   = if largest == 0 { 0 } else { count * BAR_WIDTH / largest };
        writeln!(out, "  {:<5} {:<width$} {}", label, "█".repeat(len), count, width = BAR_WIDTH)?;
    }
    Ok(())
}

pub fn confusion_matrix<W: Write>(out: &mut W, m: &ConfusionMatrix) -> io::Result<()> {
    writeln!(out, "Confusion matrix (rows = actual, columns = predicted):")?;
    writeln!(out, "  {:<8}{:>8}{:>8}", "", Label::Real, Label::Fake)?;
    for truth in Label::ALL {
        writeln!(
            out,
            "  {:<8}{:>8}{:>8}",
            truth,
            m.get(truth, Label::Real),
            m.get(truth, Label::Fake)
        )?;
    }
    Ok(())
}

pub fn classification_report<W: Write>(out: &mut W, e: &Evaluation) -> io::Result<()> {
    writeln!(out, "{:<8}{:>11}{:>9}{:>10}{:>9}", "", "precision", "recall", "f1-score", "support")?;
    for c in &e.per_class {
        writeln!(
            out,
            "{:<8}{:>11.2}{:>9.2}{:>10.2}{:>9}",
            c.label, c.precision, c.recall, c.f1, c.support
        )?;
    }
    Ok(())
}

pub fn evaluation<W: Write>(out: &mut W, e: &Evaluation) -> io::Result<()> {
    writeln!(out, "Accuracy: {:.2}%", e.accuracy * 100.0)?;
    confusion_matrix(out, &e.confusion)?;
    classification_report(out, e)
}

pub fn train_report<W: Write>(out: &mut W, r: &TrainReport) -> io::Result<()> {
    missing_values(out, &r.missing)?;
    class_distribution(out, &r.distribution)?;
    writeln!(out, "Split: {} train / {} test", r.train_size, r.test_size)?;
    writeln!(
        out,
        "Classifier: {} epochs ({})",
        r.epochs_run(),
        if r.converged { "converged" } else { "did not converge" }
    )?;
    match &r.evaluation {
        Some(e) => evaluation(out, e),
        None => writeln!(out, "No test data; evaluation skipped."),
    }
}

pub fn prediction<W: Write>(out: &mut W, p: &Prediction) -> io::Result<()> {
    writeln!(out, "Text: {}", p.excerpt)?;
    writeln!(out, "Prediction: {} (confidence {:.2}%)", p.label, p.confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn test_distribution_bars_scale_to_largest_class() {
        let text = render(|o| class_distribution(o, &ClassDistribution { real: 10, fake: 5 }));
        let real = text.lines().find(|l| l.contains("Real")).expect("real row");
        let fake = text.lines().find(|l| l.contains("Fake")).expect("fake row");
        assert_eq!(real.matches('█').count(), BAR_WIDTH);
        assert_eq!(fake.matches('█').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_empty_distribution_has_no_bars() {
        let text = render(|o| class_distribution(o, &ClassDistribution::default()));
        assert!(!text.contains('█'));
    }

    #[test]
    fn test_confusion_matrix_layout() {
        let m    = ConfusionMatrix::from_pairs([(Label::Real, Label::Fake), (Label::Fake, Label::Fake)]);
        let text = render(|o| confusion_matrix(o, &m));
        let rows: Vec<Vec<&str>> = text
            .lines()
            .skip(2)
            .map(|l| l.split_whitespace().collect())
            .collect();
        assert_eq!(rows[0], ["Real", "0", "1"]);
        assert_eq!(rows[1], ["Fake", "0", "1"]);
    }

    #[test]
    fn test_prediction_line() {
        let p    = Prediction::new(Label::Fake, 87.5, "aliens again");
        let text = render(|o| prediction(o, &p));
        assert!(text.contains("Prediction: Fake (confidence 87.50%)"));
        assert!(text.contains("Text: aliens again"));
    }
}
