//! Bounded linear-backoff retry policy for stream reads.
//!
//! A read failure does not fail the session immediately: the read loop
//! resumes from the same still-open stream handle after a delay that
//! grows linearly with the attempt number. Retries never re-upload the
//! file. If the handle is unusable the retries degenerate to immediate
//! failures until the budget is exhausted; that is accepted, bounded
//! behavior.

use std::time::Duration;

use crate::config::ClientConfig;

/// Tunable parameters for the stream-read retry strategy.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts before the failure propagates.
    pub max_attempts: u32,
    /// Attempt `n` waits `n` times this unit.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_attempts: config.max_stream_retries,
            backoff_unit: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Delay before resuming after the given failed attempt (1-based).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff_unit * attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_linearly() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(4));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(6));
    }

    #[test]
    fn default_bound_is_three_attempts() {
        assert_eq!(RetryPolicy::default().max_attempts, 3);
    }

    #[test]
    fn policy_follows_config() {
        let config = ClientConfig {
            max_stream_retries: 5,
            retry_backoff_ms: 100,
            ..Default::default()
        };
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(200));
    }
}
