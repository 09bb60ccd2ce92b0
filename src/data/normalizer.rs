// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Turns one raw article into the cleaned string the vectorizer
// is fitted on. Pure and deterministic: the only shared state is
// the read-only NlpResources passed in by reference.
//
// Cleaning steps (applied in order):
//   1. Lowercase the whole string
//   2. Remove URLs ("http" followed by non-whitespace)
//   3. Remove punctuation (Unicode P* categories plus ASCII symbols)
//   4. Remove digits
//   5. Split into words (Unicode word boundaries, UAX #29)
//   6. Drop stopwords
//   7. Lemmatize each survivor; drop it if the lemma is a stopword
//   8. Rejoin with single spaces
//
// Step 7's second stopword check keeps clean() idempotent: a lemma
// that happens to be a stopword would otherwise survive the first
// pass and be removed by the second.
//
// Reference: Rust Book §8 (Strings in Rust)
//            unicode-segmentation crate documentation

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::data::lemmatizer::Lemmatizer;
use crate::data::stopwords::ENGLISH_STOPWORDS;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+").expect("URL pattern is a valid regex"));

// \p{P} covers typographic quotes and dashes; [:punct:] adds the
// ASCII symbols ($ + < = > ^ ` | ~) that Unicode files under S*
static PUNCT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{P}[:punct:]]+").expect("punctuation pattern is a valid regex"));

// \d is Unicode-aware: matches every decimal digit, not just 0-9
static DIGIT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("digit pattern is a valid regex"));

static ENGLISH: Lazy<NlpResources> = Lazy::new(NlpResources::english_owned);

// ─── NlpResources ─────────────────────────────────────────────────────────────
/// Read-only language resources shared by the normalizer and the
/// vectorizer: a stopword set and a lemmatizer.
#[derive(Debug, Clone)]
pub struct NlpResources {
    stopwords:  HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl NlpResources {
    pub fn new<I, S>(stopwords: I, lemmatizer: Lemmatizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stopwords: stopwords.into_iter().map(Into::into).collect(),
            lemmatizer,
        }
    }

    /// The process-wide English resources, built on first use.
    pub fn english() -> &'static NlpResources {
        &ENGLISH
    }

    fn english_owned() -> Self {
        Self::new(ENGLISH_STOPWORDS.iter().copied(), Lemmatizer::english())
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn lemmatize(&self, word: &str) -> String {
        self.lemmatizer.lemmatize(word)
    }

    pub fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }
}

// ─── Normalizer ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'r> {
    resources: &'r NlpResources,
}

impl<'r> Normalizer<'r> {
    pub fn new(resources: &'r NlpResources) -> Self {
        Self { resources }
    }

    /// Normalizer over the shared English resources.
    pub fn english() -> Normalizer<'static> {
        Normalizer::new(NlpResources::english())
    }

    pub fn resources(&self) -> &'r NlpResources {
        self.resources
    }

    /// Clean one raw text. Never fails; text with no surviving
    /// tokens yields an empty string.
    pub fn clean(&self, text: &str) -> String {
        // ── Steps 1-2: lowercase, then strip URLs ────────────────────────────
        let lowered = text.to_lowercase();
        let no_urls = URL_PATTERN.replace_all(&lowered, "");

        // ── Steps 3-4: strip punctuation and digits ──────────────────────────
        let no_punct  = PUNCT_PATTERN.replace_all(&no_urls, "");
        let no_digits = DIGIT_PATTERN.replace_all(&no_punct, "");

        // ── Steps 5-8: tokenize, filter, lemmatize, rejoin ───────────────────
        let tokens: Vec<String> = no_digits
            .unicode_words()
            .filter(|word| !self.resources.is_stopword(word))
            .map(|word| self.resources.lemmatize(word))
            .filter(|lemma| !lemma.is_empty() && !self.resources.is_stopword(lemma))
            .collect();

        tokens.join(" ")
    }
}

impl Default for Normalizer<'static> {
    fn default() -> Self {
        Normalizer::english()
    }
}
