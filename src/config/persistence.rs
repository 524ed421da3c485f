//! Durable-write retry configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::RetryPolicy;

/// Retry configuration for durable writes
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    /// Total attempts per write, including the first
    #[serde(default = "default_write_attempts")]
    pub write_attempts: u32,

    /// Base backoff between attempts in milliseconds
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Per-attempt timeout in milliseconds
    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,
}

impl PersistenceConfig {
    /// Builds the retry policy applied to every durable write.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.write_attempts,
            backoff: Duration::from_millis(self.backoff_ms),
            timeout: Duration::from_millis(self.write_timeout_ms),
        }
    }

    /// Validate persistence configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.write_attempts == 0 || self.write_attempts > 10 {
            return Err(ValidationError::InvalidRetryAttempts);
        }
        Ok(())
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            write_attempts: default_write_attempts(),
            backoff_ms: default_backoff_ms(),
            write_timeout_ms: default_write_timeout_ms(),
        }
    }
}

fn default_write_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    200
}

fn default_write_timeout_ms() -> u64 {
    3000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_retry_policy_defaults() {
        let policy = PersistenceConfig::default().retry_policy();
        let default_policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, default_policy.max_attempts);
        assert_eq!(policy.backoff, default_policy.backoff);
        assert_eq!(policy.timeout, default_policy.timeout);
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let config = PersistenceConfig {
            write_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
