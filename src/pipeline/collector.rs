use crate::config::CrawlConfig;
use crate::fetch::{Fetcher, DEFAULT_MAX_RETRIES, DISCOVERY_TIMEOUT_SECS};
use crate::frontier::Frontier;
use crate::parse;
use crate::Result;
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Phase 1 driver: collects URLs without extracting content
///
/// Runs the frontier and the sequential fetcher in lock-step — dequeue,
/// fetch, extract links, enqueue — until the frontier is exhausted or the
/// page budget is reached. Pages are fetched here only to discover links;
/// their bodies are discarded. The sequential cycle is what keeps depth
/// bookkeeping and budget charging deterministic.
pub struct UrlCollector {
    frontier: Frontier,
    fetcher: Fetcher,
    shutdown: Arc<AtomicBool>,
}

impl UrlCollector {
    /// Creates a collector for the configured crawl
    pub fn new(
        config: &CrawlConfig,
        url_pattern: Option<Regex>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<Self> {
        let frontier = Frontier::new(
            &config.start_url,
            config.max_pages,
            config.max_depth,
            url_pattern,
        );
        let fetcher = Fetcher::new(
            config.delay_duration(),
            Duration::from_secs(DISCOVERY_TIMEOUT_SECS),
            DEFAULT_MAX_RETRIES,
        )?;

        Ok(Self {
            frontier,
            fetcher,
            shutdown,
        })
    }

    /// Crawls breadth-first and returns every accepted URL, in dequeue order
    ///
    /// A URL whose discovery fetch fails stays in the collected list — its
    /// content gets a second chance in phase 2 — but contributes no links.
    pub async fn collect_all_urls(&mut self) -> Vec<String> {
        tracing::info!("Phase 1: Collecting URLs...");

        let mut collected: Vec<String> = Vec::new();
        let mut discovered = 0usize;
        let mut failed = 0usize;

        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                tracing::info!("URL collection interrupted");
                break;
            }

            let Some((url, depth)) = self.frontier.next() else {
                break;
            };
            collected.push(url.clone());

            match self.fetcher.fetch(&url).await {
                Some(body) => {
                    let page = parse::parse_page(&body);
                    tracing::trace!(
                        "Discovered {} ({}): {} links",
                        url,
                        page.title.as_deref().unwrap_or("untitled"),
                        page.links.len()
                    );
                    self.frontier.add_links(&url, &page.links, depth);
                    discovered += 1;

                    if discovered % 10 == 0 {
                        tracing::info!(
                            "Collected {} URLs, queue size: {}, failed: {}",
                            discovered,
                            self.frontier.queue_len(),
                            failed
                        );
                    }
                }
                None => {
                    failed += 1;
                    tracing::debug!("Failed to fetch {} for link discovery", url);
                }
            }
        }

        tracing::info!(
            "Phase 1 complete: Collected {} URLs (successful: {}, failed: {})",
            collected.len(),
            discovered,
            failed
        );

        collected
    }
}
