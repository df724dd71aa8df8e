//! Bounded lookup retry with linear backoff.
//!
//! Stateless policy in the same shape as the rest of the core: all logic in
//! methods that take the attempt number as a parameter. The reconciler owns
//! the actual sleeping; this module only answers "again?" and "how long?".

use std::time::Duration;

/// Retry policy for remote lookups.
///
/// Lookups are attempted up to `max_attempts` times. After attempt `k`
/// (1-based) the caller waits `k x backoff_unit` before the next attempt.
/// Exhausting all attempts with not-found is not a failure -- it means the
/// object does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_unit,
        }
    }

    /// Whether another attempt follows attempt number `attempt` (1-based).
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Backoff delay after attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_unit * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff_unit: Duration::from_secs(2),
        }
    }
}
