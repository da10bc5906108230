//! Retry policy.
//!
//! [`RetryPolicy::decide`] turns a classification and an attempt number into
//! a decision. It does no I/O; the client performs the sleep.

use std::time::Duration;

use crate::clients::errors::ErrorKind;
use crate::config::{StoreConfig, MAX_TRIES};

/// Outcome of [`RetryPolicy::decide`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait `delay`, then make another attempt.
    Retry {
        /// Backoff before the next attempt.
        delay: Duration,
    },
    /// Surface the error.
    Stop,
}

/// Exponential backoff policy for transient failures.
///
/// ```rust
/// use storefront_api::clients::{ErrorKind, RetryDecision, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3, Duration::from_millis(100));
/// assert_eq!(
///     policy.decide(ErrorKind::Server, 1),
///     RetryDecision::Retry { delay: Duration::from_millis(100) }
/// );
/// assert_eq!(
///     policy.decide(ErrorKind::Server, 2),
///     RetryDecision::Retry { delay: Duration::from_millis(200) }
/// );
/// assert_eq!(policy.decide(ErrorKind::Server, 3), RetryDecision::Stop);
/// assert_eq!(policy.decide(ErrorKind::Client, 1), RetryDecision::Stop);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_tries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy. `max_tries` is clamped to `1..=MAX_TRIES`.
    #[must_use]
    pub fn new(max_tries: u32, base_delay: Duration) -> Self {
        Self {
            max_tries: max_tries.clamp(1, MAX_TRIES),
            base_delay,
        }
    }

    /// Creates the policy described by a [`StoreConfig`].
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.max_tries(), config.retry_base_delay())
    }

    /// Returns a copy with a per-request attempt override applied.
    #[must_use]
    pub fn with_tries(self, tries: Option<u32>) -> Self {
        tries.map_or(self, |tries| Self::new(tries, self.base_delay))
    }

    /// Returns the total number of attempts allowed.
    #[must_use]
    pub const fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Returns the base backoff delay.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Returns `true` for classifications worth another attempt.
    #[must_use]
    pub const fn is_transient(kind: ErrorKind) -> bool {
        matches!(
            kind,
            ErrorKind::Network | ErrorKind::Timeout | ErrorKind::Server
        )
    }

    /// Decides what to do after `attempt` (1-based) failed with `kind`.
    #[must_use]
    pub fn decide(&self, kind: ErrorKind, attempt: u32) -> RetryDecision {
        if !Self::is_transient(kind) || attempt >= self.max_tries {
            return RetryDecision::Stop;
        }
        RetryDecision::Retry {
            delay: self.delay_for(attempt),
        }
    }

    /// Backoff before the attempt following `attempt`: `base * 2^(attempt - 1)`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1_u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_TRIES, crate::config::DEFAULT_RETRY_BASE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transient_kinds_retry() {
        let policy = RetryPolicy::default();
        for kind in [ErrorKind::Network, ErrorKind::Timeout, ErrorKind::Server] {
            assert!(matches!(policy.decide(kind, 1), RetryDecision::Retry { .. }));
        }
        for kind in [
            ErrorKind::Authentication,
            ErrorKind::Client,
            ErrorKind::Parse,
            ErrorKind::Unknown,
        ] {
            assert_eq!(policy.decide(kind, 1), RetryDecision::Stop);
        }
    }

    #[test]
    fn test_delays_double() {
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
    }

    #[test]
    fn test_tries_are_clamped() {
        assert_eq!(RetryPolicy::new(9, Duration::ZERO).max_tries(), 3);
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_tries(), 1);
    }

    #[test]
    fn test_single_try_never_retries() {
        let policy = RetryPolicy::new(1, Duration::ZERO);
        assert_eq!(policy.decide(ErrorKind::Server, 1), RetryDecision::Stop);
    }

    #[test]
    fn test_request_override_is_still_clamped() {
        let policy = RetryPolicy::new(2, Duration::from_millis(10));
        assert_eq!(policy.with_tries(Some(10)).max_tries(), 3);
        assert_eq!(policy.with_tries(Some(1)).max_tries(), 1);
        assert_eq!(policy.with_tries(None).max_tries(), 2);
        assert_eq!(policy.with_tries(Some(3)).base_delay(), Duration::from_millis(10));
    }
}
