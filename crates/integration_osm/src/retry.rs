//! Retry policy with exponential backoff
//!
//! Governs how many full passes over the endpoint list a fetch may make and
//! how long it waits between passes: `delay = base_delay * multiplier^attempt`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for retry behavior with exponential backoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay after the first failed attempt in milliseconds (default: 1000ms)
    #[serde(default = "default_base_delay")]
    pub base_delay_ms: u64,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_base_delay() -> u64 {
    1000
}

const fn default_multiplier() -> f64 {
    2.0
}

/// Upper bound for a single backoff sleep
const MAX_DELAY_MS: f64 = 300_000.0;

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay(),
            multiplier: default_multiplier(),
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with custom parameters
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay_ms: u64, multiplier: f64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
            multiplier,
        }
    }

    /// A policy that retries without waiting (for tests)
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, 0, 1.0)
    }

    /// Number of attempts to make; never less than one
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Calculate the delay after a failed attempt (0-indexed)
    ///
    /// Multipliers below one are treated as one.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(64) as i32;
        let delay = (self.base_delay_ms as f64) * self.multiplier.max(1.0).powi(exponent);
        // Safe: clamped to a non-negative finite range before the cast
        Duration::from_millis(delay.clamp(0.0, MAX_DELAY_MS) as u64)
    }

    /// Validate the policy
    ///
    /// # Errors
    ///
    /// Returns an error if the policy is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }

        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err("multiplier must be a finite number >= 1.0".to_string());
        }

        Ok(())
    }
}
