// ============================================================
// Layer 5 — TF-IDF Vectorizer
// ============================================================
// Learns a vocabulary and inverse-document-frequency weights from
// the cleaned training corpus, then maps any text to a sparse,
// L2-normalised vector over that vocabulary.
//
// Fitting:
//   1. Extract terms: lowercase words of 2+ word characters
//   2. Drop stopwords (when configured)
//   3. Count in how many documents each term appears (df)
//   4. Drop terms with df > max_df * n_docs or df < min_df
//   5. Assign feature indices in sorted term order
//   6. idf(t) = ln((1 + n) / (1 + df(t))) + 1
//
// Transforming:
//   weight(t) = count(t in text) * idf(t), then divide the whole
//   row by its L2 norm. Unknown terms are ignored; a text with no
//   known terms becomes the empty (all-zero) vector.
//
// Once fitted, the vocabulary and weights never change. Feature
// indices only mean something to this exact vectorizer, which is
// why the model artifact records its digest (see infra::artifacts).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::data::normalizer::NlpResources;
use crate::domain::error::{ClassifierError, ClassifierResult};

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("token pattern is a valid regex"));

// ─── SparseVector ─────────────────────────────────────────────────────────────
/// (feature index, value) pairs in strictly increasing index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from entries that are already sorted by index.
    pub(crate) fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product with a dense weight vector. Indices past the end of
    /// `dense` contribute nothing.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(i, v)| dense.get(i).map(|w| w * v))
            .sum()
    }

    pub fn squared_norm(&self) -> f64 {
        self.entries.iter().map(|&(_, v)| v * v).sum()
    }
}

// ─── Configuration ────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfConfig {
    /// Ignore terms that appear in more than this fraction of documents
    pub max_df: f64,

    /// Ignore terms that appear in fewer than this many documents
    pub min_df: usize,

    /// Exclude the stopword set at the vectorizer level as well
    pub remove_stopwords: bool,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_df:           0.7,
            min_df:           1,
            remove_stopwords: true,
        }
    }
}

// ─── TfidfVectorizer ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    config:      TfidfConfig,
    vocabulary:  BTreeMap<String, usize>,
    idf:         Vec<f64>,
    n_documents: usize,
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf weights from `corpus`.
    pub fn fit<S: AsRef<str>>(
        corpus:    &[S],
        config:    TfidfConfig,
        resources: &NlpResources,
    ) -> ClassifierResult<Self> {
        if corpus.is_empty() {
            return Err(ClassifierError::EmptyCorpus("no documents to fit the vectorizer on"));
        }
        let n_docs = corpus.len();

        // ── Document frequencies ─────────────────────────────────────────────
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in corpus {
            let lowered = doc.as_ref().to_lowercase();
            let unique: HashSet<&str> = extract_terms(&lowered)
                .filter(|t| !config.remove_stopwords || !resources.is_stopword(t))
                .collect();
            for term in unique {
                *doc_freq.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        // ── Prune by document frequency ──────────────────────────────────────
        let max_doc_count = config.max_df * n_docs as f64;
        let kept: BTreeMap<String, usize> = doc_freq
            .into_iter()
            .filter(|(_, df)| (*df as f64) <= max_doc_count && *df >= config.min_df)
            .collect();

        if kept.is_empty() {
            return Err(ClassifierError::EmptyCorpus(
                "no terms remain after document-frequency pruning",
            ));
        }

        // ── Indices in sorted term order, smoothed idf ───────────────────────
        let mut vocabulary = BTreeMap::new();
        let mut idf        = Vec::with_capacity(kept.len());
        for (index, (term, df)) in kept.into_iter().enumerate() {
            idf.push(((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        tracing::debug!(
            "TF-IDF fitted: {} documents, {} terms (max_df={})",
            n_docs,
            vocabulary.len(),
            config.max_df
        );

        Ok(Self {
            config,
            vocabulary,
            idf,
            n_documents: n_docs,
        })
    }

    /// Map one text onto the fitted vocabulary.
    pub fn transform(&self, text: &str) -> SparseVector {
        let lowered = text.to_lowercase();

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in extract_terms(&lowered) {
            if let Some(&index) = self.vocabulary.get(term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();

        let norm = entries.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut entries {
                *v /= norm;
            }
        }

        SparseVector::from_sorted(entries)
    }

    pub fn transform_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<SparseVector> {
        texts.iter().map(|t| self.transform(t.as_ref())).collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&i| self.idf[i])
    }

    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Check the invariants `fit` establishes. A deserialized vectorizer
    /// has bypassed `fit`, so it must pass this before use.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.vocabulary.is_empty() {
            return Err("empty vocabulary");
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err("idf length differs from vocabulary size");
        }
        // sorted term order must give indices 0, 1, 2, ...
        if !self.vocabulary.values().copied().eq(0..self.vocabulary.len()) {
            return Err("vocabulary indices are not 0..n in term order");
        }
        if !self.idf.iter().all(|w| w.is_finite() && *w > 0.0) {
            return Err("idf weights must be finite and positive");
        }
        Ok(())
    }

    /// Hex SHA-256 over the vocabulary in index order. Two vectorizers
    /// with equal digests produce the same feature indices.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (term, index) in &self.vocabulary {
            hasher.update(index.to_le_bytes());
            hasher.update(term.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

fn extract_terms(lowered: &str) -> impl Iterator<Item = &str> {
    TOKEN_PATTERN.find_iter(lowered).map(|m| m.as_str())
}
