//! Bounded retry with backoff for durable writes.
//!
//! Every remote write runs under a timeout so no operation blocks forever;
//! a timed-out attempt counts as failed, not pending. Exhausted retries
//! surface as a recoverable persistence failure to the caller.

use std::future::Future;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Retry policy applied to durable writes.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Base delay between attempts; grows linearly per attempt.
    pub backoff: Duration,
    /// Per-attempt timeout.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(200),
            timeout: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Runs `operation` under the policy.
    ///
    /// # Errors
    ///
    /// The last attempt's error once the budget is exhausted;
    /// `WriteTimeout` when the final attempt timed out.
    pub async fn run<T, F, Fut>(&self, name: &str, mut operation: F) -> Result<T, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut last_error = DomainError::persistence(format!("'{}' was never attempted", name));

        for attempt in 1..=attempts {
            match tokio::time::timeout(self.timeout, operation()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(err)) => {
                    tracing::warn!(
                        operation = name,
                        attempt,
                        max_attempts = attempts,
                        error = %err,
                        "durable write failed"
                    );
                    last_error = err;
                }
                Err(_) => {
                    tracing::warn!(
                        operation = name,
                        attempt,
                        max_attempts = attempts,
                        timeout_ms = self.timeout.as_millis() as u64,
                        "durable write timed out"
                    );
                    last_error = DomainError::new(
                        ErrorCode::WriteTimeout,
                        format!("'{}' timed out after {:?}", name, self.timeout),
                    );
                }
            }
            if attempt < attempts {
                tokio::time::sleep(self.backoff * attempt).await;
            }
        }

        Err(last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            backoff: Duration::from_millis(1),
            timeout: Duration::from_millis(50),
        }
    }

    #[tokio::test]
    async fn returns_value_on_first_success() {
        let policy = fast_policy();
        let result: Result<u32, _> = policy.run("op", || async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn retries_until_success() {
        let policy = fast_policy();
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = policy
            .run("op", move || {
                let calls = calls_clone.clone();
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(DomainError::persistence("transient"))
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn surfaces_last_error_when_exhausted() {
        let policy = fast_policy();
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result: Result<(), _> = policy
            .run("op", move || {
                let calls = calls_clone.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(DomainError::persistence("still down"))
                }
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::PersistenceFailed);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn timeout_counts_as_failed_attempt() {
        let policy = RetryPolicy {
            max_attempts: 2,
            backoff: Duration::from_millis(1),
            timeout: Duration::from_millis(10),
        };

        let result: Result<(), _> = policy
            .run("op", || async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        assert_eq!(result.unwrap_err().code, ErrorCode::WriteTimeout);
    }
}
