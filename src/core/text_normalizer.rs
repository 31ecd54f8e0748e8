//! Text Normalization
//!
//! Maps free text (titles, authors, descriptions, queries) to the canonical
//! token sequence used for matching.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Normalized words of one text field or query, in original word order
pub type TokenSequence = Vec<String>;

/// Lookup tables driving the normalizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Non-ASCII character -> ASCII replacement. Unlisted non-ASCII is dropped.
    pub accents: HashMap<char, String>,
    /// Characters deleted outright (no whitespace inserted)
    pub punctuation: Vec<char>,
    /// Words removed after splitting
    pub stop_words: HashSet<String>,
    /// Whole-word replacements applied last
    pub numerals: HashMap<String, String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        let mut accents = HashMap::new();

        // Uppercasing is ASCII-only, so lowercase accented letters arrive here
        // untouched and need their own entries.
        for (from, to) in [
            ('Ö', "O"),
            ('Ü', "U"),
            ('Ä', "A"),
            ('É', "E"),
            ('Ñ', "N"),
            ('Ç', "C"),
            ('ß', "SS"),
            ('À', "A"),
            ('Ô', "O"),
            ('ö', "O"),
            ('ü', "U"),
            ('ä', "A"),
            ('é', "E"),
            ('ñ', "N"),
            ('ç', "C"),
            ('à', "A"),
            ('ô', "O"),
        ] {
            accents.insert(from, to.to_string());
        }

        let punctuation = vec![',', '.', '@', '%', '!', '?', '&', '(', ')', ':', '\'', '-'];

        let stop_words = ["THE", "OF", "AND", "A", "TO", "IN", "ON", "FOR", "WITH"]
            .iter()
            .map(|w| w.to_string())
            .collect();

        let numerals = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"]
            .iter()
            .enumerate()
            .map(|(i, roman)| (roman.to_string(), (i + 1).to_string()))
            .collect();

        Self {
            accents,
            punctuation,
            stop_words,
            numerals,
        }
    }
}

/// Turns raw text into a [`TokenSequence`]
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Create a new text normalizer
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize text into tokens
    ///
    /// Uppercase (ASCII), transliterate, strip punctuation, split on
    /// whitespace, drop stop-words, then replace Roman numerals. Never fails;
    /// empty or all-stop-word input yields an empty sequence.
    pub fn normalize(&self, text: &str) -> TokenSequence {
        let upper = text.to_ascii_uppercase();

        let mut folded = String::with_capacity(upper.len());
        for c in upper.chars() {
            if c.is_ascii() {
                folded.push(c);
            } else if let Some(replacement) = self.config.accents.get(&c) {
                folded.push_str(replacement);
            }
        }

        let stripped: String = folded
            .chars()
            .filter(|c| !self.config.punctuation.contains(c))
            .collect();

        stripped
            .split_whitespace()
            .filter(|word| !word.is_empty())
            .filter(|word| !self.config.stop_words.contains(*word))
            .map(|word| match self.config.numerals.get(word) {
                Some(number) => number.clone(),
                None => word.to_string(),
            })
            .collect()
    }
}
