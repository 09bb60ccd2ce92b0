// ============================================================
// Layer 4 — Lemmatizer
// ============================================================
// Reduces a word to its dictionary base form using noun-form
// defaults (the same default a part-of-speech-agnostic lemmatizer
// applies when no tag is given): plural nouns become singular,
// every other word passes through unchanged.
//
// Lookup order:
//   1. Invariant words ("news", "series", ...) are returned as-is
//   2. Irregular plurals come from a fixed table ("men" → "man")
//   3. Regular suffix rules, tried longest first:
//        -sses → -ss     classes  → class
//        -ies  → -y      stories  → story
//        -xes / -ches / -shes → drop "es"
//        -s    → drop "s" (not after s, u or i: "glass", "bus", "crisis")
//   4. The rule output is looked up in the irregular table once more
//
// Every output is a fixed point: lemmatize(lemmatize(w)) == lemmatize(w).
// A rule never produces a word ending in a strippable "s", and no
// irregular lemma is itself an irregular plural.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

use std::collections::{HashMap, HashSet};

/// Words shorter than this are never touched ("gas", "bus", "was").
const MIN_RULE_CHARS: usize = 4;

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("oxen", "ox"),
    ("wolves", "wolf"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("loaves", "loaf"),
    ("calves", "calf"),
    ("selves", "self"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("data", "datum"),
    ("media", "medium"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("nuclei", "nucleus"),
    ("radii", "radius"),
    ("alumni", "alumnus"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("heroes", "hero"),
    ("echoes", "echo"),
    ("vetoes", "veto"),
    // -ses plurals of -s / -us nouns; the plain -s rule would leave "buse"
    ("buses", "bus"),
    ("gases", "gas"),
    ("bonuses", "bonus"),
    ("viruses", "virus"),
    ("campuses", "campus"),
    ("statuses", "status"),
    ("quizzes", "quiz"),
    // -ies plurals of -ie nouns; the -ies rule would give "movy"
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("zombies", "zombie"),
    ("rookies", "rookie"),
    ("calories", "calorie"),
    ("selfies", "selfie"),
];

const INVARIANT_WORDS: &[&str] = &[
    "news", "series", "species", "always", "perhaps", "whereas",
    "various", "means", "physics", "politics", "economics", "ethics",
    "mathematics", "statistics", "athletics", "christmas", "texas",
    "kansas", "arkansas", "vegas", "paris", "mars", "chaos", "lens",
    "atlas", "canvas", "bias", "alias", "sometimes", "besides",
    "nevertheless", "headquarters", "sales", "olympics",
];

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular:   HashMap<&'static str, &'static str>,
    invariant:   HashSet<&'static str>,
    apply_rules: bool,
}

impl Lemmatizer {
    /// English lemmatizer with the built-in irregular and invariant tables.
    pub fn english() -> Self {
        Self {
            irregular:   IRREGULAR_PLURALS.iter().copied().collect(),
            invariant:   INVARIANT_WORDS.iter().copied().collect(),
            apply_rules: true,
        }
    }

    /// Lemmatizer that returns every word unchanged.
    pub fn identity() -> Self {
        Self {
            irregular:   HashMap::new(),
            invariant:   HashSet::new(),
            apply_rules: false,
        }
    }

    /// Base form of a lowercase word.
    pub fn lemmatize(&self, word: &str) -> String {
        if self.invariant.contains(word) {
            return word.to_string();
        }
        if let Some(lemma) = self.irregular.get(word) {
            return (*lemma).to_string();
        }
        if !self.apply_rules {
            return word.to_string();
        }

        let stem = apply_suffix_rules(word);
        match self.irregular.get(stem.as_str()) {
            Some(lemma) => (*lemma).to_string(),
            None => stem,
        }
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

fn apply_suffix_rules(word: &str) -> String {
    if word.chars().count() < MIN_RULE_CHARS {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    if let Some(stem) = word.strip_suffix("ies") {
        // "ties", "lies" are too short to be "-y" plurals
        if stem.chars().count() >= 2 {
            return format!("{stem}y");
        }
    }
    for suffix in ["xes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let l = Lemmatizer::english();
        assert_eq!(l.lemmatize("articles"), "article");
        assert_eq!(l.lemmatize("stories"), "story");
        assert_eq!(l.lemmatize("classes"), "class");
        assert_eq!(l.lemmatize("boxes"), "box");
        assert_eq!(l.lemmatize("churches"), "church");
    }

    #[test]
    fn test_irregular_plurals() {
        let l = Lemmatizer::english();
        assert_eq!(l.lemmatize("women"), "woman");
        assert_eq!(l.lemmatize("wolves"), "wolf");
        assert_eq!(l.lemmatize("crises"), "crisis");
        assert_eq!(l.lemmatize("buses"), "bus");
        assert_eq!(l.lemmatize("viruses"), "virus");
        assert_eq!(l.lemmatize("movies"), "movie");
        assert_eq!(l.lemmatize("cookies"), "cookie");
    }

    #[test]
    fn test_words_that_are_not_plurals() {
        let l = Lemmatizer::english();
        assert_eq!(l.lemmatize("glass"), "glass");
        assert_eq!(l.lemmatize("virus"), "virus");
        assert_eq!(l.lemmatize("analysis"), "analysis");
        assert_eq!(l.lemmatize("news"), "news");
        assert_eq!(l.lemmatize("gas"), "gas");
        assert_eq!(l.lemmatize("election"), "election");
    }

    #[test]
    fn test_lemmas_are_fixed_points() {
        let l = Lemmatizer::english();
        let words = [
            "articles", "stories", "classes", "boxes", "women", "mens",
            "wolves", "crises", "buses", "ties", "politics", "series",
            "scientists", "claims", "hoaxes", "wishes", "movies",
            "viruses", "bonuses", "quizzes", "selfies",
        ];
        for w in words {
            let once  = l.lemmatize(w);
            let twice = l.lemmatize(&once);
            assert_eq!(once, twice, "'{w}' is not stable");
        }
    }

    #[test]
    fn test_identity_lemmatizer() {
        let l = Lemmatizer::identity();
        assert_eq!(l.lemmatize("articles"), "articles");
    }

    #[test]
    fn test_short_and_non_ascii_words() {
        let l = Lemmatizer::english();
        assert_eq!(l.lemmatize("ties"), "tie");
        assert_eq!(l.lemmatize("cafés"), "café");
        assert_eq!(l.lemmatize(""), "");
    }
}
