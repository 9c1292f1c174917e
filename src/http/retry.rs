//! Rate-limit retry policy
//!
//! Only rate-limit failures are retried. The wait comes from the server's
//! `Retry-After` header and each logical call gets its own retry budget.

use crate::error::Error;
use std::time::Duration;

/// Wait used when `Retry-After` is absent or not an integer
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Client-wide retry settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retry rate-limited requests at all
    pub enabled: bool,
    /// Retries allowed per logical call (attempts = retries + 1)
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 3,
        }
    }
}

impl RetryPolicy {
    pub fn new(enabled: bool, max_retries: u32) -> Self {
        Self {
            enabled,
            max_retries,
        }
    }

    /// How long to wait before retrying `error`, or `None` to surface it
    ///
    /// `retry_count` is the number of retries already performed for the
    /// current logical call.
    pub fn backoff(&self, retry_count: u32, error: &Error) -> Option<Duration> {
        if !self.enabled || retry_count >= self.max_retries {
            return None;
        }
        error.retry_after().map(Duration::from_secs)
    }
}

/// Parse a `Retry-After` header value as integer seconds
pub fn parse_retry_after(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}
