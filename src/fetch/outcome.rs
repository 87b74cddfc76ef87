//! Fetch outcome classification
//!
//! Status-code bucketing lives here, in one place, independent of any
//! specific network library's error taxonomy. The retry core decides what
//! to do with each class; nothing else in the crate inspects status codes.

/// Classification of a single fetch attempt
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx (after redirects resolved); carries the response body
    Success(String),

    /// 4xx — terminal, never retried
    ClientError(u16),

    /// 5xx — transient, retried with backoff
    ServerError(u16),

    /// Request or body read timed out — transient, retried with backoff
    Timeout,

    /// Connection refused, DNS failure, TLS error — terminal
    NetworkError(String),
}

/// Coarse status-code class used by [`classify_status`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    ClientError,
    ServerError,
}

/// Buckets an HTTP status code
///
/// Redirects are resolved by the client before a status reaches this
/// function, so anything below 400 counts as success.
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        s if s >= 500 => StatusClass::ServerError,
        s if s >= 400 => StatusClass::ClientError,
        _ => StatusClass::Success,
    }
}

/// Maps a transport-level error onto a [`FetchOutcome`]
pub fn classify_error(error: &reqwest::Error) -> FetchOutcome {
    if error.is_timeout() {
        FetchOutcome::Timeout
    } else {
        FetchOutcome::NetworkError(error.to_string())
    }
}
