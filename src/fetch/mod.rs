//! HTTP fetch executor
//!
//! This module handles all HTTP retrieval for the pipeline:
//! - Building the pooled HTTP client with a fixed user agent
//! - Classifying responses and transport errors into [`FetchOutcome`]
//! - The shared retry/backoff core used by both fetch modes
//! - [`Fetcher`]: strictly sequential, throttled (phase 1 link discovery)
//! - [`BatchFetcher`]: bounded-parallel under a semaphore (phase 2 retrieval)
//!
//! Fetch failures are never fatal — the `Option<String>` body returned to
//! the caller is the complete contract.

mod client;
mod concurrent;
mod outcome;
mod retry;
mod sequential;

pub use client::build_http_client;
pub use concurrent::BatchFetcher;
pub use outcome::{classify_error, classify_status, FetchOutcome, StatusClass};
pub use sequential::Fetcher;

pub(crate) use retry::fetch_with_retry;

/// Retry attempts per URL before degrading to "no content"
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Per-request timeout for phase 1 discovery fetches
pub const DISCOVERY_TIMEOUT_SECS: u64 = 15;

/// Per-request timeout for phase 2 retrieval fetches
pub const RETRIEVAL_TIMEOUT_SECS: u64 = 30;
