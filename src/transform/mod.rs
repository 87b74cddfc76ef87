//! Transform pipeline: HTML body → structured document
//!
//! Turns one successfully fetched page into a [`Document`] in three steps:
//! content extraction, metadata enrichment, and keyword extraction. The
//! pipeline is constructed once, up front, and construction is fallible —
//! every selector and regex it needs is compiled during [`TransformPipeline::new`]
//! so that a bad table fails the run at init instead of surfacing per-page.
//!
//! The rest of the pipeline treats this module as a single capability:
//! `transform(url, html) -> Option<Document>`. A page that yields no body
//! text yields no document.

mod enrich;
mod extract;
mod keywords;

pub use enrich::Enricher;
pub use extract::Extractor;
pub use keywords::KeywordExtractor;

use crate::{Result, ScribeError};
use serde::Serialize;

/// A normalized output document, one JSONL line in the sink
///
/// Immutable once handed to the writer. Only `url` participates in
/// idempotency; everything else is payload.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub title: String,
    pub url: String,
    pub body_text: String,
    pub keywords: Vec<String>,
    pub word_count: usize,
    pub char_count: usize,
    pub language: String,
    pub content_type: String,
    pub fetched_at: String,
    pub reading_time_minutes: f64,
    pub has_code: bool,
    pub has_images: bool,
    pub images: Vec<String>,
}

impl Document {
    /// Serializes into the JSON object the writer appends to the sink
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// The extraction → enrichment → keywords pipeline
pub struct TransformPipeline {
    extractor: Extractor,
    enricher: Enricher,
    keywords: KeywordExtractor,
}

impl TransformPipeline {
    /// Compiles all selectors and regexes the pipeline needs
    ///
    /// # Returns
    ///
    /// * `Ok(TransformPipeline)` - Ready pipeline handle
    /// * `Err(ScribeError::TransformInit)` - A selector or regex table
    ///   failed to compile
    pub fn new() -> Result<Self> {
        Ok(Self {
            extractor: Extractor::new().map_err(ScribeError::TransformInit)?,
            enricher: Enricher::new().map_err(ScribeError::TransformInit)?,
            keywords: KeywordExtractor::new(),
        })
    }

    /// Transforms one fetched page into a document
    ///
    /// Returns `None` when no body text can be extracted — the caller
    /// counts that as a failed URL and moves on.
    pub fn transform(&self, url: &str, html: &str) -> Option<Document> {
        let extracted = self.extractor.extract(html, url);

        if extracted.body_text.is_empty() {
            tracing::debug!("No content extracted from {}", url);
            return None;
        }

        let keywords = self
            .keywords
            .extract(&extracted.title, &extracted.body_text);
        let meta = self
            .enricher
            .enrich(&extracted.title, &extracted.body_text, url, &extracted.images);

        Some(Document {
            title: extracted.title,
            url: url.to_string(),
            body_text: extracted.body_text,
            keywords,
            word_count: meta.word_count,
            char_count: meta.char_count,
            language: meta.language,
            content_type: meta.content_type,
            fetched_at: meta.fetched_at,
            reading_time_minutes: meta.reading_time_minutes,
            has_code: meta.has_code,
            has_images: meta.has_images,
            images: extracted.images,
        })
    }
}
