//! Engagement repository port.
//!
//! Persists the per-user streak and reward counters. A missing row reads
//! as fresh state (zero balance, zero streak).

use async_trait::async_trait;

use crate::domain::engagement::EngagementState;
use crate::domain::foundation::{DomainError, UserId};

/// Repository port for engagement counters.
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Fetches the user's engagement state, or fresh state if none exists.
    async fn fetch(&self, user_id: &UserId) -> Result<EngagementState, DomainError>;

    /// Upserts the user's engagement state (last write wins).
    ///
    /// # Errors
    ///
    /// - `PersistenceFailed` on write failure
    async fn upsert(&self, user_id: &UserId, state: &EngagementState) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EngagementRepository) {}
    }
}
