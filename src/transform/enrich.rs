//! Document metadata enrichment
//!
//! Derives counts, reading time, a content-type classification, a coarse
//! language guess, and code-presence signals from extracted text. All
//! heuristic tables are compiled at construction.

use chrono::{SecondsFormat, Utc};
use regex::RegexSet;
use std::collections::HashSet;
use url::Url;

/// Average reading speed used for the reading-time estimate
const WORDS_PER_MINUTE: f64 = 200.0;

/// Code-like patterns; any hit flags the document as containing code
const CODE_INDICATORS: &[&str] = &[
    r"(?i)def\s+\w+\s*\(",
    r"(?i)function\s+\w+\s*\(",
    r"(?i)class\s+\w+",
    r"(?i)import\s+\w+",
    r"(?i)from\s+\w+\s+import",
    r"(?i)fn\s+\w+\s*\(",
    r"(?i)<\?php",
    r"(?i)console\.log",
    r"(?i)public\s+static",
];

/// High-frequency function words per language, for the stopword-overlap
/// language guess
const LANGUAGE_STOPWORDS: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "the", "and", "of", "to", "in", "is", "that", "for", "with", "was", "are", "this",
        ],
    ),
    (
        "es",
        &[
            "el", "la", "de", "que", "y", "los", "las", "una", "para", "por", "con", "del",
        ],
    ),
    (
        "fr",
        &[
            "le", "la", "les", "des", "est", "dans", "pour", "que", "une", "sur", "avec", "du",
        ],
    ),
    (
        "de",
        &[
            "der", "die", "das", "und", "ist", "nicht", "ein", "eine", "mit", "für", "von", "auf",
        ],
    ),
];

/// Minimum distinct stopword hits before a language guess is trusted
const LANGUAGE_MIN_HITS: usize = 2;

/// Enrichment output attached to a document
#[derive(Debug)]
pub struct Enrichment {
    pub word_count: usize,
    pub char_count: usize,
    pub language: String,
    pub content_type: String,
    pub fetched_at: String,
    pub reading_time_minutes: f64,
    pub has_code: bool,
    pub has_images: bool,
}

/// Metadata enricher with precompiled heuristic tables
pub struct Enricher {
    code_patterns: RegexSet,
    language_tables: Vec<(&'static str, HashSet<&'static str>)>,
}

impl Enricher {
    pub fn new() -> Result<Self, String> {
        let code_patterns =
            RegexSet::new(CODE_INDICATORS).map_err(|e| format!("code indicator table: {e}"))?;

        let language_tables = LANGUAGE_STOPWORDS
            .iter()
            .map(|(lang, words)| (*lang, words.iter().copied().collect()))
            .collect();

        Ok(Self {
            code_patterns,
            language_tables,
        })
    }

    /// Enriches one document from its title, body, URL, and image list
    pub fn enrich(&self, title: &str, body_text: &str, url: &str, images: &[String]) -> Enrichment {
        let mut full_text = String::with_capacity(title.len() + body_text.len() + 1);
        if !title.is_empty() {
            full_text.push_str(title);
            full_text.push(' ');
        }
        full_text.push_str(body_text);

        let word_count = full_text.split_whitespace().count();
        let char_count = full_text.chars().count();

        let reading_time_minutes = if word_count > 0 {
            ((word_count as f64 / WORDS_PER_MINUTE) * 100.0).round() / 100.0
        } else {
            0.0
        };

        Enrichment {
            word_count,
            char_count,
            language: self.detect_language(&full_text),
            content_type: classify_content_type(url, body_text),
            fetched_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            reading_time_minutes,
            has_code: self.code_patterns.is_match(body_text),
            has_images: !images.is_empty(),
        }
    }

    /// Coarse language guess by counting distinct function-word hits per
    /// language table; `unknown` when no table clears the threshold
    fn detect_language(&self, text: &str) -> String {
        if text.trim().len() < 10 {
            return "unknown".to_string();
        }

        let words: HashSet<String> = text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect();

        let best = self
            .language_tables
            .iter()
            .map(|(lang, table)| {
                let hits = words.iter().filter(|w| table.contains(w.as_str())).count();
                (hits, *lang)
            })
            .max_by_key(|(hits, _)| *hits);

        match best {
            Some((hits, lang)) if hits >= LANGUAGE_MIN_HITS => lang.to_string(),
            _ => "unknown".to_string(),
        }
    }
}

/// Classifies a document by its URL path, falling back to text volume
fn classify_content_type(url: &str, body_text: &str) -> String {
    let path = Url::parse(url)
        .map(|u| u.path().to_lowercase())
        .unwrap_or_default();

    let classification = if path.contains("/books/")
        || path.contains("/book/")
        || path.contains("/product/")
    {
        "product_page"
    } else if path.contains("/docs/") || path.contains("/documentation/") || path.contains("/guide/")
    {
        "doc_page"
    } else if path.contains("/blog/")
        || path.contains("/article/")
        || path.contains("/post/")
        || path.contains("/news/")
    {
        "article"
    } else if path.is_empty() || path == "/" {
        "homepage"
    } else if path.contains("/category/") || path.contains("/tag/") || path.contains("/archive/") {
        "listing_page"
    } else if body_text.split_whitespace().count() > 100 {
        "article"
    } else {
        "other"
    };

    classification.to_string()
}
