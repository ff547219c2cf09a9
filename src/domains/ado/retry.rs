//! Retry budget and exponential backoff for the request executor.

use std::time::Duration;

/// Additional attempts permitted after the first for 5xx and transport failures.
pub const MAX_RETRIES: u32 = 3;

/// Base delay of the exponential backoff.
pub const RETRY_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Upper bound on the backoff exponent.
///
/// Rate-limit retries may be unbounded, so the attempt counter can grow past
/// `MAX_RETRIES`; clamping keeps `2^n` within `u32`.
const MAX_BACKOFF_EXPONENT: u32 = 16;

/// Fixed retry policy of an executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed for server errors and transport failures.
    pub max_retries: u32,

    /// Base of the `base * 2^n` backoff.
    pub backoff_base: Duration,

    /// Optional cap on retries for 429 responses. `None` keeps retrying for
    /// as long as the service keeps rate limiting.
    pub max_rate_limit_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            backoff_base: RETRY_BACKOFF_BASE,
            max_rate_limit_retries: None,
        }
    }
}

impl RetryPolicy {
    /// Backoff before retrying after attempt `attempt` (0-indexed).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let multiplier = 2_u32.pow(attempt.min(MAX_BACKOFF_EXPONENT));
        self.backoff_base.saturating_mul(multiplier)
    }

    /// Whether another retry is allowed for a 5xx or transport failure.
    pub fn allows_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Whether another retry is allowed for a 429 response.
    pub fn allows_rate_limit_retry(&self, attempt: u32) -> bool {
        self.max_rate_limit_retries.is_none_or(|limit| attempt < limit)
    }

    /// Delay for a rate-limited attempt: the server's `Retry-After` if
    /// given, the computed backoff otherwise.
    pub fn rate_limit_delay(&self, attempt: u32, retry_after: Option<u64>) -> Duration {
        retry_after
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.backoff(attempt))
    }
}
