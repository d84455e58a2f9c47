//! Retry policies for automatic reconnection
//!
//! A retry policy decides how long the underlying connection should wait
//! before its next reconnect attempt, or whether to give up. hublink never
//! drives the reconnect loop itself: the policy is handed to the external
//! connection builder, which consults it after each dropped connection.
//!
//! # Built-in Policies
//!
//! - **DelayTable**: fixed lookup table indexed by attempt number (default)
//! - **ExponentialBackoff**: exponentially increasing delays
//! - **NoRetry**: give up immediately
//!
//! Policies are pure: the delay is computed from the attempt number alone,
//! so a single policy instance can be shared across connections.
//!
//! # Examples
//!
//! ```rust
//! use hublink_core::{DelayTable, RetryPolicy};
//! use std::time::Duration;
//!
//! // Default: 0ms, 2s, 10s, 30s, then stop
//! let table = DelayTable::default();
//! assert_eq!(table.next_delay(1), Some(Duration::from_secs(2)));
//! assert_eq!(table.next_delay(4), None);
//!
//! // Custom delays, with the trailing stop implied
//! let custom = DelayTable::from(vec![Duration::from_secs(1), Duration::from_secs(5)]);
//! assert_eq!(custom.next_delay(0), Some(Duration::from_secs(1)));
//! assert_eq!(custom.next_delay(2), None);
//! ```

use std::time::Duration;

/// Trait for reconnect pacing policies
///
/// Implementations map an attempt number to the delay before that attempt.
///
/// # Arguments
///
/// * `attempt` - The number of reconnect attempts already made (0-indexed)
///
/// # Returns
///
/// - `Some(duration)`: wait this long before the next attempt
/// - `None`: stop retrying
pub trait RetryPolicy: Send + Sync {
    /// Returns the delay before the next reconnect attempt, or `None` to stop
    fn next_delay(&self, attempt: u32) -> Option<Duration>;
}

/// Fixed delay table indexed by attempt number
///
/// The table holds the concrete delays; every attempt number past the end
/// of the table yields the stop sentinel. The default table is
/// `[0ms, 2s, 10s, 30s]` followed by stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayTable {
    delays: Vec<Duration>,
}

impl DelayTable {
    /// Create a table from an ordered sequence of delays
    ///
    /// The trailing stop entry is implicit: attempts beyond the sequence
    /// are answered with `None`.
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }
}

impl Default for DelayTable {
    fn default() -> Self {
        Self::new(vec![
            Duration::ZERO,
            Duration::from_millis(2000),
            Duration::from_millis(10_000),
            Duration::from_millis(30_000),
        ])
    }
}

impl From<Vec<Duration>> for DelayTable {
    fn from(delays: Vec<Duration>) -> Self {
        Self::new(delays)
    }
}

impl RetryPolicy for DelayTable {
    fn next_delay(&self, attempt: u32) -> Option<Duration> {
        self.delays.get(attempt as usize).copied()
    }
}

/// Exponential backoff policy with optional jitter
///
/// The delay grows as `min_delay * 2^attempt`, capped at `max_delay`.
pub struct ExponentialBackoff {
    min_delay: Duration,
    max_delay: Duration,
    max_attempts: Option<u32>,
    jitter: bool,
}

impl ExponentialBackoff {
    /// Create a new exponential backoff policy
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay,
            max_delay,
            max_attempts: None,
            jitter: false,
        }
    }

    /// Set the maximum number of attempts before giving up
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Enable jitter to prevent thundering herd
    pub fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_secs(30))
            .with_max_attempts(10)
            .with_jitter()
    }
}

impl RetryPolicy for ExponentialBackoff {
    fn next_delay(&self, attempt: u32) -> Option<Duration> {
        if let Some(max) = self.max_attempts {
            if attempt >= max {
                return None;
            }
        }

        let base = self.min_delay.as_millis() as u64;
        let scaled = base.saturating_mul(2u64.saturating_pow(attempt));
        let delay = std::cmp::min(scaled, self.max_delay.as_millis() as u64);

        let mut final_delay = Duration::from_millis(delay);

        // Random 0-25% of the delay
        if self.jitter {
            use rand::Rng;
            let jitter_ms = rand::thread_rng().gen_range(0..=(delay / 4));
            final_delay = Duration::from_millis(delay + jitter_ms);
        }

        Some(final_delay)
    }
}

/// Policy that never retries
pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn next_delay(&self, _attempt: u32) -> Option<Duration> {
        None
    }
}
