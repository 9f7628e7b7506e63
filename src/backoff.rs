//! Reconnect backoff policy.
//!
//! Pure delay calculation for the connection manager's reconnection loop:
//! exponential backoff with a deterministic jitter and a hard cap, plus the
//! retry cutoff. No side effects; the connection task owns all timers.

use crate::models::ConnectionOptions;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// Pure reconnect delay/termination policy.
///
/// `next_delay(attempt)` grows as `base_delay * 2^attempt` with up to +25%
/// jitter, capped at `max_delay`. The jitter is additive (never subtractive)
/// and the cap is applied after jittering, so delays are monotonically
/// non-decreasing in `attempt` and never exceed the cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    base_delay: Duration,
    max_delay: Duration,
    max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30000),
            max_attempts: 5,
        }
    }
}

impl ReconnectPolicy {
    /// Create a policy with explicit timing parameters.
    pub fn new(base_delay: Duration, max_delay: Duration, max_attempts: u32) -> Self {
        Self {
            base_delay,
            max_delay,
            max_attempts,
        }
    }

    /// Build the policy from connection options.
    pub fn from_options(options: &ConnectionOptions) -> Self {
        Self {
            base_delay: Duration::from_millis(options.reconnect_delay_ms),
            max_delay: Duration::from_millis(options.max_reconnect_delay_ms),
            max_attempts: options.max_reconnect_attempts,
        }
    }

    /// Whether another reconnection attempt is permitted.
    ///
    /// `attempt` counts completed (failed) attempts, so the first retry asks
    /// with `attempt = 0`. Returns false once `attempt >= max_attempts`.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay to wait before reconnection attempt number `attempt`.
    pub fn next_delay(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as u64;
        let max_ms = self.max_delay.as_millis() as u64;

        let exp = base_ms.saturating_mul(2u64.saturating_pow(attempt));
        let jittered = exp.saturating_add(jitter_ms(exp, attempt));
        Duration::from_millis(jittered.min(max_ms))
    }

    /// Configured attempt cap.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

/// Deterministic jitter in `[0, delay_ms / 4]`, keyed on the attempt number.
///
/// Hash-derived rather than random so tests can reason about exact delays,
/// the same trick the client uses elsewhere for keepalive spreading.
fn jitter_ms(delay_ms: u64, attempt: u32) -> u64 {
    let span = delay_ms / 4;
    if span == 0 {
        return 0;
    }
    let mut hasher = DefaultHasher::new();
    attempt.hash(&mut hasher);
    hasher.finish() % (span + 1)
}
