//! Crawl configuration and validation
//!
//! Configuration is flag-driven: the CLI maps its arguments one-to-one
//! onto [`CrawlConfig`], and [`CrawlConfig::validate`] is the gate for the
//! only run-fatal errors besides an unwritable sink — a bad start URL, an
//! empty budget, or a pattern that does not compile.

use crate::{ConfigError, ConfigResult};
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Full configuration for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Starting URL; defines the crawl's domain
    pub start_url: String,

    /// Maximum number of pages to collect in phase 1
    pub max_pages: usize,

    /// Maximum crawl depth from the start URL
    pub max_depth: u32,

    /// Path of the JSONL sink
    pub output_path: PathBuf,

    /// Delay between requests, in seconds
    pub delay: f64,

    /// Optional regex filter; matched anywhere in a candidate URL
    pub url_pattern: Option<String>,

    /// Skip URLs already present in the sink
    pub resume: bool,

    /// Maximum concurrent requests in phase 2
    pub max_concurrent: usize,

    /// Append a timestamp hash to the sink filename
    pub timestamp: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_url: String::new(),
            max_pages: 100,
            max_depth: 3,
            output_path: PathBuf::from("output.jsonl"),
            delay: 0.1,
            url_pattern: None,
            resume: false,
            max_concurrent: 10,
            timestamp: false,
        }
    }
}

impl CrawlConfig {
    /// Validates the configuration, returning the first violation found
    pub fn validate(&self) -> ConfigResult<()> {
        let url = Url::parse(&self.start_url)
            .map_err(|e| ConfigError::InvalidStartUrl(format!("{}: {}", self.start_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidStartUrl(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                self.start_url
            )));
        }

        if self.max_pages == 0 {
            return Err(ConfigError::Validation(
                "max-pages must be positive".to_string(),
            ));
        }
        if self.max_concurrent == 0 {
            return Err(ConfigError::Validation(
                "max-concurrent must be positive".to_string(),
            ));
        }
        if self.delay < 0.0 || !self.delay.is_finite() {
            return Err(ConfigError::Validation(
                "delay must be a non-negative number of seconds".to_string(),
            ));
        }

        self.compiled_pattern()?;

        Ok(())
    }

    /// Compiles the optional URL pattern
    pub fn compiled_pattern(&self) -> ConfigResult<Option<Regex>> {
        match &self.url_pattern {
            Some(pattern) => Regex::new(pattern)
                .map(Some)
                .map_err(|e| ConfigError::InvalidPattern(format!("{}: {}", pattern, e))),
            None => Ok(None),
        }
    }

    /// The request delay as a [`Duration`]
    pub fn delay_duration(&self) -> Duration {
        Duration::from_secs_f64(self.delay.max(0.0))
    }

    /// The sink path, with the timestamp hash applied when requested
    pub fn effective_output_path(&self) -> PathBuf {
        if self.timestamp {
            crate::output::timestamped_path(&self.output_path)
        } else {
            self.output_path.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> CrawlConfig {
        CrawlConfig {
            start_url: "http://example.com".to_string(),
            ..CrawlConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_start_url() {
        let config = CrawlConfig {
            start_url: "not a url".to_string(),
            ..CrawlConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStartUrl(_))
        ));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = CrawlConfig {
            start_url: "ftp://example.com".to_string(),
            ..CrawlConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStartUrl(_))
        ));
    }

    #[test]
    fn test_rejects_zero_budget() {
        let config = CrawlConfig {
            max_pages: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let config = CrawlConfig {
            max_concurrent: 0,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_delay() {
        let config = CrawlConfig {
            delay: -0.5,
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_pattern() {
        let config = CrawlConfig {
            url_pattern: Some("[unclosed".to_string()),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_pattern_compiles() {
        let config = CrawlConfig {
            url_pattern: Some("/books/".to_string()),
            ..valid_config()
        };
        let pattern = config.compiled_pattern().unwrap().unwrap();
        assert!(pattern.is_match("http://example.com/books/book1"));
    }

    #[test]
    fn test_effective_output_path_plain() {
        let config = valid_config();
        assert_eq!(config.effective_output_path(), PathBuf::from("output.jsonl"));
    }

    #[test]
    fn test_effective_output_path_timestamped() {
        let config = CrawlConfig {
            timestamp: true,
            ..valid_config()
        };
        let path = config.effective_output_path();
        assert_ne!(path, PathBuf::from("output.jsonl"));
        assert!(path.to_str().unwrap().starts_with("output_"));
    }
}
