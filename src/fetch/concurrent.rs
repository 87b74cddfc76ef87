use crate::fetch::{build_http_client, fetch_with_retry};
use futures::future::join_all;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Bounded-parallel fetcher for phase 2 content retrieval
///
/// Up to `max_concurrent` requests are in flight simultaneously, gated by a
/// counting semaphore. Each task independently sleeps a small pacing delay
/// after acquiring its permit — rate-limit smoothing, not a global
/// throttle. A shared shutdown flag stops permits from turning into new
/// requests once an interrupt lands; in-flight requests run to completion.
pub struct BatchFetcher {
    client: Client,
    semaphore: Arc<Semaphore>,
    delay: Duration,
    max_retries: u32,
    shutdown: Arc<AtomicBool>,
}

impl BatchFetcher {
    /// Creates a bounded-parallel fetcher
    ///
    /// # Arguments
    ///
    /// * `max_concurrent` - Maximum simultaneous in-flight requests
    /// * `delay` - Pacing delay each worker applies before its request
    /// * `timeout` - Per-request timeout
    /// * `max_retries` - Retry budget for transient failures
    /// * `shutdown` - Interrupt flag; set to stop issuing new fetches
    pub fn new(
        max_concurrent: usize,
        delay: Duration,
        timeout: Duration,
        max_retries: u32,
        shutdown: Arc<AtomicBool>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(timeout)?,
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            delay,
            max_retries,
            shutdown,
        })
    }

    /// Fetches one URL under the concurrency limit
    ///
    /// Always yields one `(url, body)` pair; the body is `None` on any
    /// failure or when shutdown was requested before the permit was used.
    pub async fn fetch(&self, url: String) -> (String, Option<String>) {
        let permit = match self.semaphore.clone().acquire_owned().await {
            Ok(p) => p,
            Err(_) => return (url, None),
        };

        if self.shutdown.load(Ordering::Relaxed) {
            return (url, None);
        }

        tokio::time::sleep(self.delay).await;
        let body = fetch_with_retry(&self.client, &url, self.max_retries).await;
        drop(permit);

        (url, body)
    }

    /// Fetches all URLs concurrently and collects one result per input
    ///
    /// Results arrive in input order because `join_all` preserves it, but
    /// callers must not rely on any cross-URL ordering guarantee.
    pub async fn fetch_batch(&self, urls: Vec<String>) -> Vec<(String, Option<String>)> {
        let tasks = urls.into_iter().map(|url| self.fetch(url));
        join_all(tasks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_fetcher(max_concurrent: usize, shutdown: Arc<AtomicBool>) -> BatchFetcher {
        BatchFetcher::new(
            max_concurrent,
            Duration::ZERO,
            Duration::from_secs(1),
            1,
            shutdown,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_shutdown_suppresses_new_fetches() {
        let shutdown = Arc::new(AtomicBool::new(true));
        let fetcher = batch_fetcher(2, shutdown);

        // Shutdown already requested: no request is issued at all
        let (url, body) = fetcher.fetch("http://192.0.2.1/page".to_string()).await;
        assert_eq!(url, "http://192.0.2.1/page");
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn test_batch_returns_one_result_per_input() {
        let shutdown = Arc::new(AtomicBool::new(true));
        let fetcher = batch_fetcher(4, shutdown);

        let urls: Vec<String> = (0..7).map(|i| format!("http://192.0.2.1/p{}", i)).collect();
        let results = fetcher.fetch_batch(urls.clone()).await;

        assert_eq!(results.len(), urls.len());
        for (input, (output, _)) in urls.iter().zip(&results) {
            assert_eq!(input, output);
        }
    }
}
