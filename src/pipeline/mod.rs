//! Two-phase pipeline orchestration
//!
//! Phase 1 (discovery) walks the frontier sequentially and produces an
//! ordered URL list. Phase 2 (retrieval) fetches that list under the
//! concurrency limit, pushes each body through the transform pipeline, and
//! hands documents to the idempotent writer. There is no transition back:
//! links discovered during phase 2 never touch the frontier.
//!
//! The orchestrator owns no persistent state — only the transient counters
//! that become the final [`CrawlReport`].

mod collector;

pub use collector::UrlCollector;

use crate::config::CrawlConfig;
use crate::fetch::{BatchFetcher, DEFAULT_MAX_RETRIES, RETRIEVAL_TIMEOUT_SECS};
use crate::output::JsonlWriter;
use crate::transform::TransformPipeline;
use crate::Result;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// Per-run summary: the minimum observable completion contract
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Resolved sink path (timestamp hash applied, if requested)
    pub output_path: PathBuf,

    /// URLs collected by phase 1
    pub collected: usize,

    /// Documents fetched, transformed, and written in phase 2
    pub successful: usize,

    /// URLs that failed to fetch, transform, or write
    pub failed: usize,

    /// URLs skipped up front because the sink already had them
    pub skipped: usize,

    /// Non-empty lines in the sink after the run
    pub total_written: usize,
}

/// Runs the full two-phase crawl
///
/// Only initialization can fail here — invalid configuration, an
/// unwritable sink, or a transform table that does not compile. Per-URL
/// fetch, transform, and write failures are counted, never propagated.
/// When the shutdown flag is raised mid-run the phases wind down without
/// issuing new fetches and the report still reflects everything done so
/// far.
pub async fn run_pipeline(
    config: &CrawlConfig,
    shutdown: Arc<AtomicBool>,
) -> Result<CrawlReport> {
    config.validate()?;
    let url_pattern = config.compiled_pattern().map_err(crate::ScribeError::Config)?;

    // Resolved once per run; the timestamp variant hashes the current time
    let output_path = config.effective_output_path();

    // Phase 1: collect URLs
    let mut collector = UrlCollector::new(config, url_pattern, shutdown.clone())?;
    let urls = collector.collect_all_urls().await;

    if urls.is_empty() {
        tracing::warn!("No URLs collected!");
        return Ok(CrawlReport {
            output_path,
            ..CrawlReport::default()
        });
    }
    tracing::info!("Collected {} URLs for processing", urls.len());

    let pipeline = TransformPipeline::new()?;
    let mut writer = JsonlWriter::new(&output_path, config.resume)?;
    tracing::info!("Output file: {}", output_path.display());

    // Phase 2: fetch, transform, write
    let (successful, failed, skipped) =
        process_urls(&urls, &pipeline, &mut writer, config, shutdown).await?;

    Ok(CrawlReport {
        output_path,
        collected: urls.len(),
        successful,
        failed,
        skipped,
        total_written: writer.written_count(),
    })
}

/// Phase 2 body: returns (successful, failed, skipped)
///
/// URLs the writer already holds are filtered out before any fetch is
/// issued — they cost nothing. The rest go through the batch fetcher; the
/// result loop is the single consumer in front of the writer, so no lock
/// is needed around its state.
async fn process_urls(
    urls: &[String],
    pipeline: &TransformPipeline,
    writer: &mut JsonlWriter,
    config: &CrawlConfig,
    shutdown: Arc<AtomicBool>,
) -> Result<(usize, usize, usize)> {
    let to_process: Vec<String> = urls
        .iter()
        .filter(|url| !writer.should_skip(url))
        .cloned()
        .collect();
    let skipped = urls.len() - to_process.len();

    if to_process.is_empty() {
        return Ok((0, 0, skipped));
    }

    tracing::info!(
        "Phase 2: Processing {} URLs with {} concurrent workers...",
        to_process.len(),
        config.max_concurrent
    );

    let fetcher = BatchFetcher::new(
        config.max_concurrent,
        config.delay_duration(),
        Duration::from_secs(RETRIEVAL_TIMEOUT_SECS),
        DEFAULT_MAX_RETRIES,
        shutdown,
    )?;

    let results = fetcher.fetch_batch(to_process).await;

    let mut successful = 0usize;
    let mut failed = 0usize;

    for (url, body) in results {
        let Some(body) = body else {
            failed += 1;
            continue;
        };

        match pipeline.transform(&url, &body) {
            Some(document) => {
                if writer.write(&document.to_value()) {
                    successful += 1;
                } else {
                    failed += 1;
                }
            }
            None => {
                failed += 1;
            }
        }
    }

    Ok((successful, failed, skipped))
}
