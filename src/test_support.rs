// Shared fixtures for unit tests.

use std::io::Write;
use tempfile::NamedTempFile;

use crate::data::normalizer::Normalizer;
use crate::domain::document::{Document, Label};

const FAKE_WORDS: [&str; 10] = [
    "shocking", "miracle", "secret", "hoax", "alien",
    "conspiracy", "exposed", "celebrity", "cure", "bombshell",
];

const REAL_WORDS: [&str; 10] = [
    "parliament", "budget", "committee", "economy", "minister",
    "report", "election", "senate", "court", "policy",
];

/// Raw article text for the i-th synthetic document of a class.
/// Each article uses three of its class's ten words plus "today",
/// which appears in every article.
pub fn synthetic_text(label: Label, i: usize) -> String {
    let words = match label {
        Label::Fake => &FAKE_WORDS,
        Label::Real => &REAL_WORDS,
    };
    format!(
        "{} {} {} today! #{}",
        words[i % 10].to_uppercase(),
        words[(i + 1) % 10],
        words[(i + 3) % 10],
        i
    )
}

/// `per_class` fake and `per_class` real articles, interleaved.
pub fn synthetic_documents(per_class: usize) -> Vec<Document> {
    let normalizer = Normalizer::english();
    (0..per_class)
        .flat_map(|i| [Label::Fake, Label::Real].map(|l| (l, i)))
        .map(|(label, i)| {
            let text    = synthetic_text(label, i);
            let cleaned = normalizer.clean(&text);
            Document::new(text, label, cleaned)
        })
        .collect()
}

/// The same corpus as `synthetic_documents`, written as a CSV file
/// with an extra `title` column.
pub fn synthetic_csv(per_class: usize) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("temp file");
    writeln!(f, "title,text,label").expect("write header");
    for doc in synthetic_documents(per_class) {
        writeln!(f, "headline,\"{}\",{}", doc.text, doc.label as u8).expect("write row");
    }
    f.flush().expect("flush");
    f
}
