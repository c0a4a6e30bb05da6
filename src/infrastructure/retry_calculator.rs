//! Retry policy for failed page fetches
//!
//! The default policy makes one attempt per page, so a failed page is
//! skipped rather than retried.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::constants::harvest::DEFAULT_MAX_ATTEMPTS;

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts per page, including the first
    pub max_attempts: u32,
    /// Delay before the first retry (milliseconds)
    pub base_delay_ms: u64,
    /// Upper bound on any retry delay (milliseconds)
    pub max_delay_ms: u64,
    /// Growth factor between consecutive retries
    pub backoff_multiplier: f64,
    /// Scale each delay by a random factor in 0.5..1.5
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries a failed page
    pub fn skip_on_failure() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Whether another attempt follows after `attempt` failed (1-based)
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay before retrying after the given failed attempt (1-based).
    ///
    /// Exponential backoff capped at `max_delay_ms`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let exponential_delay =
            (self.base_delay_ms as f64 * self.backoff_multiplier.powi(exponent)) as u64;

        let capped_delay = exponential_delay.min(self.max_delay_ms);

        if self.jitter {
            // 50%-150%
            let jitter_factor = 0.5 + fastrand::f64();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let jittered = (capped_delay as f64 * jitter_factor) as u64;
            Duration::from_millis(jittered)
        } else {
            Duration::from_millis(capped_delay)
        }
    }
}
