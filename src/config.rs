//! Configuration for sharedlog
//!
//! Retry policy for acquiring the advisory file lock. The defaults give
//! 24 attempts, linear waits of 0, 1 and 2 ms for the first three, then a
//! random wait in `[0, 64)` ms for the rest.

use std::time::Duration;

use crate::error::{LoggerError, Result};

/// Longest single wait a retry policy may produce
pub const MAX_BACKOFF_DELAY: Duration = Duration::from_secs(60);

/// Lock retry configuration for an AppendLogger
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    // -------------------------------------------------------------------------
    // Lock Retry Configuration
    // -------------------------------------------------------------------------
    /// Total number of lock attempts before a write gives up
    pub max_lock_attempts: u32,

    /// Attempts `0..linear_attempts` wait `attempt` time units
    pub linear_attempts: u32,

    /// Later attempts wait a random number of units in `[0, max_jitter_units)`
    pub max_jitter_units: u32,

    /// Length of one backoff time unit
    pub time_unit: Duration,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_lock_attempts: 24,
            linear_attempts: 3,
            max_jitter_units: 64,
            time_unit: Duration::from_millis(1),
        }
    }
}

impl LoggerConfig {
    /// Create a new config builder
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::default()
    }

    /// Reject policies that could never acquire the lock, or whose single
    /// wait could exceed `MAX_BACKOFF_DELAY`
    pub fn validate(&self) -> Result<()> {
        if self.max_lock_attempts == 0 {
            return Err(LoggerError::Config(
                "max_lock_attempts must be at least 1".to_string(),
            ));
        }

        // Every wait is below time_unit * max(linear_attempts, max_jitter_units)
        let widest = self.linear_attempts.max(self.max_jitter_units);
        match self.time_unit.checked_mul(widest) {
            Some(longest) if longest <= MAX_BACKOFF_DELAY => Ok(()),
            _ => Err(LoggerError::Config(format!(
                "backoff of {} x {:?} exceeds {:?}",
                widest, self.time_unit, MAX_BACKOFF_DELAY
            ))),
        }
    }
}

/// Builder for LoggerConfig
#[derive(Default)]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    /// Set the total number of lock attempts
    pub fn max_lock_attempts(mut self, attempts: u32) -> Self {
        self.config.max_lock_attempts = attempts;
        self
    }

    /// Set how many leading attempts use linear backoff
    pub fn linear_attempts(mut self, attempts: u32) -> Self {
        self.config.linear_attempts = attempts;
        self
    }

    /// Set the exclusive upper bound of the random backoff (in units)
    pub fn max_jitter_units(mut self, units: u32) -> Self {
        self.config.max_jitter_units = units;
        self
    }

    /// Set the backoff time unit
    pub fn time_unit(mut self, unit: Duration) -> Self {
        self.config.time_unit = unit;
        self
    }

    pub fn build(self) -> LoggerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let config = LoggerConfig::default();
        assert_eq!(config.max_lock_attempts, 24);
        assert_eq!(config.linear_attempts, 3);
        assert_eq!(config.max_jitter_units, 64);
        assert_eq!(config.time_unit, Duration::from_millis(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = LoggerConfig::builder().max_lock_attempts(0).build();
        assert!(matches!(config.validate(), Err(LoggerError::Config(_))));
    }

    #[test]
    fn test_huge_time_unit_rejected() {
        let config = LoggerConfig::builder()
            .linear_attempts(0)
            .time_unit(Duration::MAX)
            .build();
        assert!(matches!(config.validate(), Err(LoggerError::Config(_))));
    }

    #[test]
    fn test_huge_jitter_rejected() {
        let config = LoggerConfig::builder()
            .max_lock_attempts(200_000)
            .max_jitter_units(100_000)
            .build();
        assert!(matches!(config.validate(), Err(LoggerError::Config(_))));
    }

    #[test]
    fn test_long_linear_ramp_rejected() {
        let config = LoggerConfig::builder()
            .linear_attempts(u32::MAX)
            .max_jitter_units(0)
            .build();
        assert!(matches!(config.validate(), Err(LoggerError::Config(_))));
    }

    #[test]
    fn test_backoff_at_limit_accepted() {
        let config = LoggerConfig::builder()
            .max_jitter_units(60)
            .time_unit(Duration::from_secs(1))
            .build();
        assert!(config.validate().is_ok());
    }
}
