//! Keyword extraction
//!
//! Frequency ranking over stopword-filtered words from the title and body.
//! Deterministic: ties rank by first occurrence in the text.

use std::collections::{HashMap, HashSet};

/// Maximum keywords attached to a document
const MAX_KEYWORDS: usize = 10;

/// Minimum keyword length in characters
const MIN_KEYWORD_LEN: usize = 3;

/// Common English function words excluded from ranking
const STOP_WORDS: &[&str] = &[
    "the", "and", "but", "for", "with", "from", "was", "are", "were", "been", "have", "has",
    "had", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
    "this", "that", "these", "those", "you", "she", "they", "what", "which", "who", "when",
    "where", "why", "how", "all", "each", "every", "some", "any", "not", "more", "most", "its",
    "his", "her", "their", "our", "your", "one", "two", "also", "than", "then", "there", "here",
    "into", "over", "under", "about", "after", "before", "between", "out", "off", "very",
];

/// Stopword-frequency keyword extractor
pub struct KeywordExtractor {
    stop_words: HashSet<&'static str>,
    max_keywords: usize,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            max_keywords: MAX_KEYWORDS,
        }
    }

    /// Extracts up to [`MAX_KEYWORDS`] ranked keywords from title and body
    ///
    /// Returns an empty list when there is not enough text to rank.
    pub fn extract(&self, title: &str, body_text: &str) -> Vec<String> {
        let mut text = String::with_capacity(title.len() + body_text.len() + 1);
        if !title.is_empty() {
            text.push_str(title);
            text.push(' ');
        }
        text.push_str(body_text);

        if text.trim().len() < 10 {
            return Vec::new();
        }

        // Frequency count with first-seen position for stable ordering
        let mut frequency: HashMap<String, (usize, usize)> = HashMap::new();
        let mut position = 0usize;

        for raw in text.to_lowercase().split_whitespace() {
            let word: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == '-')
                .collect();
            let word = word.trim_matches('-').to_string();

            if word.chars().count() < MIN_KEYWORD_LEN {
                continue;
            }
            if word.chars().all(|c| c.is_numeric()) {
                continue;
            }
            if self.stop_words.contains(word.as_str()) {
                continue;
            }

            let entry = frequency.entry(word).or_insert((0, position));
            entry.0 += 1;
            position += 1;
        }

        let mut ranked: Vec<(String, (usize, usize))> = frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

        ranked
            .into_iter()
            .take(self.max_keywords)
            .map(|(word, _)| word)
            .collect()
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}
