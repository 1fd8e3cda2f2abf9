//! Retry policy for HTTP asset requests.

use crate::error::FetchError;
use std::time::Duration;

/// Bounded retry policy used by `DefaultFetcher`.
#[derive(Clone, Copy, Debug)]
pub(super) struct RetryPolicy {
    /// Upper bound on total attempts, including the initial request.
    pub(super) max_attempts: u32,
    /// Base delay used for exponential backoff.
    pub(super) initial_backoff: Duration,
    /// Maximum allowed delay between retry attempts.
    pub(super) max_backoff: Duration,
}

impl RetryPolicy {
    pub(super) fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(8),
        }
    }

    /// Decide whether another attempt should be scheduled.
    ///
    /// Only transient failures retry: timeouts, refused connections,
    /// rate limiting and server errors. Missing assets fail immediately.
    pub(super) fn should_retry(&self, err: &FetchError, attempt: u32) -> bool {
        if attempt.saturating_add(1) >= self.max_attempts {
            return false;
        }
        match err {
            FetchError::Http(inner) => inner.is_timeout() || inner.is_connect(),
            FetchError::Status(code) => *code == 429 || (500..=599).contains(code),
            FetchError::Io(_) | FetchError::UnsupportedScheme(_) => false,
        }
    }

    /// Exponential backoff delay for the given zero-based attempt.
    pub(super) fn retry_delay_for(&self, attempt: u32) -> Duration {
        let pow = 2u32.saturating_pow(attempt);
        let millis = self
            .initial_backoff
            .as_millis()
            .saturating_mul(pow as u128)
            .min(self.max_backoff.as_millis());
        Duration::from_millis(millis as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retries_server_errors_until_attempts_run_out() {
        let policy = RetryPolicy::with_max_attempts(3);
        assert!(policy.should_retry(&FetchError::Status(503), 0));
        assert!(policy.should_retry(&FetchError::Status(429), 1));
        assert!(!policy.should_retry(&FetchError::Status(503), 2));
    }

    #[test]
    fn missing_assets_are_not_retried() {
        let policy = RetryPolicy::with_max_attempts(5);
        assert!(!policy.should_retry(&FetchError::Status(404), 0));
        assert!(!policy.should_retry(
            &FetchError::UnsupportedScheme("ftp".into()),
            0
        ));
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::with_max_attempts(3);
        assert_eq!(policy.retry_delay_for(0), Duration::from_millis(250));
        assert_eq!(policy.retry_delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.retry_delay_for(10), Duration::from_secs(8));
    }
}
