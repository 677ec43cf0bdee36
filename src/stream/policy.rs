//! Retry Policy
//!
//! Table of how a session reacts to failed deliveries.

use std::time::Duration;

use crate::config::Config;
use crate::stream::TransportCode;

/// Consecutive retries allowed for one reading before the session fails.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Fixed wait between delivery attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Codes the consumer side may report that are worth retrying shortly after.
pub const DEFAULT_RETRYABLE: [TransportCode; 3] = [
    TransportCode::Internal,
    TransportCode::ResourceExhausted,
    TransportCode::Unavailable,
];

// == Retry Policy ==
/// Bounded, fixed-delay retry policy for delivery failures.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries allowed after the first failed attempt
    pub max_retries: u32,
    /// Delay before each retry
    pub delay: Duration,
    /// Codes eligible for retry; anything else fails the session immediately
    pub retryable: Vec<TransportCode>,
}

impl RetryPolicy {
    /// Builds the policy from startup configuration, keeping the default retryable set.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.stream_max_retries,
            delay: Duration::from_millis(config.stream_retry_delay_ms),
            ..Self::default()
        }
    }

    pub fn is_retryable(&self, code: TransportCode) -> bool {
        self.retryable.contains(&code)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
            retryable: DEFAULT_RETRYABLE.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.delay, Duration::from_secs(1));
    }

    #[test]
    fn test_retryable_classification() {
        let policy = RetryPolicy::default();

        assert!(policy.is_retryable(TransportCode::Internal));
        assert!(policy.is_retryable(TransportCode::ResourceExhausted));
        assert!(policy.is_retryable(TransportCode::Unavailable));

        assert!(!policy.is_retryable(TransportCode::Cancelled));
        assert!(!policy.is_retryable(TransportCode::InvalidArgument));
        assert!(!policy.is_retryable(TransportCode::DeadlineExceeded));
        assert!(!policy.is_retryable(TransportCode::Unknown));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            stream_max_retries: 2,
            stream_retry_delay_ms: 250,
            ..Config::default()
        };

        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.delay, Duration::from_millis(250));
        assert_eq!(policy.retryable, DEFAULT_RETRYABLE.to_vec());
    }
}
