use crate::fetch::{build_http_client, fetch_with_retry};
use reqwest::Client;
use std::time::{Duration, Instant};

/// Sequential fetcher for phase 1 link discovery
///
/// One request is in flight at a time, and a minimum delay is enforced
/// between the *completion* of one request and the start of the next. The
/// strict ordering matters: BFS level bookkeeping and deterministic budget
/// charging both depend on a sequential dequeue/fetch/enqueue cycle.
pub struct Fetcher {
    client: Client,
    delay: Duration,
    max_retries: u32,
    last_completed: Option<Instant>,
}

impl Fetcher {
    /// Creates a sequential fetcher with its own pooled client
    ///
    /// # Arguments
    ///
    /// * `delay` - Minimum pause between consecutive requests
    /// * `timeout` - Per-request timeout
    /// * `max_retries` - Retry budget for transient failures
    pub fn new(
        delay: Duration,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(timeout)?,
            delay,
            max_retries,
            last_completed: None,
        })
    }

    /// Fetches one URL, throttling against the previous request
    ///
    /// Returns the response body, or `None` for any failure after the
    /// retry budget is spent.
    pub async fn fetch(&mut self, url: &str) -> Option<String> {
        self.throttle().await;
        let body = fetch_with_retry(&self.client, url, self.max_retries).await;
        self.last_completed = Some(Instant::now());
        body
    }

    /// Sleeps out the remainder of the delay window since the last request
    /// completed
    async fn throttle(&self) {
        if let Some(last) = self.last_completed {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                tokio::time::sleep(self.delay - elapsed).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_fetch_not_throttled() {
        let fetcher = Fetcher::new(
            Duration::from_secs(5),
            Duration::from_secs(1),
            1,
        )
        .unwrap();

        // No prior request: throttle must return immediately
        let start = Instant::now();
        fetcher.throttle().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_throttle_waits_out_delay_window() {
        let mut fetcher = Fetcher::new(
            Duration::from_millis(50),
            Duration::from_secs(1),
            1,
        )
        .unwrap();
        fetcher.last_completed = Some(Instant::now());

        let start = Instant::now();
        fetcher.throttle().await;
        assert!(start.elapsed() >= Duration::from_millis(45));
    }
}
