//! Sitescribe: a single-domain site-to-JSONL scraper
//!
//! This crate crawls one web domain in two phases — a sequential link
//! discovery pass followed by a bounded-parallel content retrieval pass —
//! and emits normalized documents to a resumable, append-only JSONL sink
//! with at-most-once-per-URL write semantics.

pub mod config;
pub mod fetch;
pub mod frontier;
pub mod output;
pub mod parse;
pub mod pipeline;
pub mod transform;
pub mod url;

use thiserror::Error;

/// Main error type for sitescribe operations
///
/// Only initialization can surface one of these: per-URL fetch, transform,
/// and write failures degrade to counted non-results instead.
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Transform pipeline init error: {0}")]
    TransformInit(String),

    #[error("Output sink error for {path}: {source}")]
    Sink {
        path: String,
        source: std::io::Error,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid start URL: {0}")]
    InvalidStartUrl(String),

    #[error("Invalid URL pattern: {0}")]
    InvalidPattern(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for sitescribe operations
pub type Result<T> = std::result::Result<T, ScribeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use frontier::Frontier;
pub use output::JsonlWriter;
pub use pipeline::{run_pipeline, CrawlReport};
pub use transform::{Document, TransformPipeline};
pub use url::{is_same_domain, normalize_url, should_skip};
