use crate::fetch::outcome::{classify_error, classify_status, FetchOutcome, StatusClass};
use reqwest::Client;
use std::time::Duration;

/// Performs one GET attempt and classifies the result
async fn attempt_fetch(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => return classify_error(&e),
    };

    let status = response.status().as_u16();
    match classify_status(status) {
        StatusClass::Success => match response.text().await {
            Ok(body) => FetchOutcome::Success(body),
            Err(e) => classify_error(&e),
        },
        StatusClass::ClientError => FetchOutcome::ClientError(status),
        StatusClass::ServerError => FetchOutcome::ServerError(status),
    }
}

/// Exponential backoff: 1s, 2s, 4s, ... for attempts 0, 1, 2, ...
fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt)
}

/// Fetches a URL with bounded retries, shared by both fetch modes
///
/// Transient outcomes (5xx, timeout) are retried with exponential backoff
/// up to `max_retries` attempts total. Terminal outcomes (4xx, network
/// errors) return `None` after exactly one attempt. Exhausting the retry
/// budget also degrades to `None` — never an error.
pub(crate) async fn fetch_with_retry(
    client: &Client,
    url: &str,
    max_retries: u32,
) -> Option<String> {
    for attempt in 0..max_retries {
        match attempt_fetch(client, url).await {
            FetchOutcome::Success(body) => {
                tracing::debug!("Successfully fetched {}", url);
                return Some(body);
            }
            FetchOutcome::ClientError(status) => {
                tracing::warn!("Client error {} for {}", status, url);
                return None;
            }
            FetchOutcome::ServerError(status) => {
                if attempt + 1 < max_retries {
                    let wait = backoff(attempt);
                    tracing::warn!(
                        "Server error {} for {}, retrying in {:?} (attempt {}/{})",
                        status,
                        url,
                        wait,
                        attempt + 1,
                        max_retries
                    );
                    tokio::time::sleep(wait).await;
                }
            }
            FetchOutcome::Timeout => {
                if attempt + 1 < max_retries {
                    let wait = backoff(attempt);
                    tracing::warn!(
                        "Timeout for {}, retrying in {:?} (attempt {}/{})",
                        url,
                        wait,
                        attempt + 1,
                        max_retries
                    );
                    tokio::time::sleep(wait).await;
                } else {
                    tracing::warn!("Timeout after {} attempts for {}", max_retries, url);
                }
            }
            FetchOutcome::NetworkError(error) => {
                tracing::warn!("Request error for {}: {}", url, error);
                return None;
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff(0), Duration::from_secs(1));
        assert_eq!(backoff(1), Duration::from_secs(2));
        assert_eq!(backoff(2), Duration::from_secs(4));
    }
}
