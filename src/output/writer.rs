use crate::{Result, ScribeError};
use chrono::Utc;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Append-only JSONL writer with at-most-once-per-URL semantics
///
/// When resuming, the existing sink is scanned once at construction and
/// every parseable line's `url` lands in the dedup set; the set then grows
/// with each successful write for the lifetime of this instance.
pub struct JsonlWriter {
    output_path: PathBuf,
    resume: bool,
    existing_urls: HashSet<String>,
}

impl JsonlWriter {
    /// Creates a writer for the given sink path
    ///
    /// An uncreatable parent directory is the one fatal error here; a sink
    /// that exists but cannot be scanned degrades to an empty dedup set
    /// with a warning, per the never-abort-initialization rule for
    /// malformed persisted records.
    pub fn new(output_path: impl Into<PathBuf>, resume: bool) -> Result<Self> {
        let output_path = output_path.into();

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ScribeError::Sink {
                    path: output_path.display().to_string(),
                    source: e,
                })?;
            }
        }

        let mut existing_urls = HashSet::new();
        if resume && output_path.exists() {
            existing_urls = load_existing_urls(&output_path);
            tracing::info!(
                "Loaded {} existing URLs for resume mode",
                existing_urls.len()
            );
        }

        Ok(Self {
            output_path,
            resume,
            existing_urls,
        })
    }

    /// Whether a URL was already written, either by a prior run or earlier
    /// in this one; always `false` outside resume mode
    pub fn should_skip(&self, url: &str) -> bool {
        self.resume && self.existing_urls.contains(url)
    }

    /// Appends one document as a single JSONL line
    ///
    /// Fails (`false`) when the document has no `url` field, when the URL
    /// is already written under resume mode, or when the append itself
    /// fails. Never raises — a failed write is a counted, non-fatal event.
    pub fn write(&mut self, document: &Value) -> bool {
        let Some(url) = document.get("url").and_then(|v| v.as_str()) else {
            tracing::error!("Document missing 'url' field");
            return false;
        };
        let url = url.to_string();

        if self.should_skip(&url) {
            tracing::debug!("Skipping already processed URL: {}", url);
            return false;
        }

        let line = match serde_json::to_string(document) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Error serializing document for {}: {}", url, e);
                return false;
            }
        };

        let appended = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)
            .and_then(|mut file| writeln!(file, "{}", line));

        match appended {
            Ok(()) => {
                if self.resume {
                    self.existing_urls.insert(url);
                }
                true
            }
            Err(e) => {
                tracing::error!("Error writing document: {}", e);
                false
            }
        }
    }

    /// Counts non-empty lines currently in the sink, by reading it
    ///
    /// Reporting only — intentionally recomputed rather than cached so it
    /// reflects whatever is actually on disk.
    pub fn written_count(&self) -> usize {
        let file = match File::open(&self.output_path) {
            Ok(f) => f,
            Err(_) => return 0,
        };

        BufReader::new(file)
            .lines()
            .filter_map(|line| line.ok())
            .filter(|line| !line.trim().is_empty())
            .count()
    }

    /// The sink path this writer appends to
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

/// Scans an existing sink and collects the `url` of every parseable line
///
/// Malformed lines are skipped with a warning; empty lines are ignored.
fn load_existing_urls(path: &Path) -> HashSet<String> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("Error loading existing URLs from {}: {}", path.display(), e);
            return HashSet::new();
        }
    };

    let mut urls = HashSet::new();
    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!("Error reading {}: {}", path.display(), e);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(doc) => {
                if let Some(url) = doc.get("url").and_then(|v| v.as_str()) {
                    urls.insert(url.to_string());
                }
            }
            Err(_) => {
                tracing::warn!("Could not parse line in {}", path.display());
            }
        }
    }

    urls
}

/// Derives a unique sink path by appending a short timestamp hash to the
/// file stem, e.g. `output.jsonl` → `output_3fb0a2c1.jsonl`
pub fn timestamped_path(base: &Path) -> PathBuf {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let digest = Sha256::digest(timestamp.as_bytes());
    let tag = &hex::encode(digest)[..8];

    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = base
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("jsonl");

    base.with_file_name(format!("{}_{}.{}", stem, tag, extension))
}
