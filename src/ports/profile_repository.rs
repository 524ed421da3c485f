//! Profile repository port (write side of the scoring accumulator).
//!
//! # Design
//!
//! - **Transactional per answer**: all deltas from one answer event land
//!   together or not at all - a crash mid-update must never leave some
//!   dimensions updated and others not.
//! - **Additive**: updates accumulate onto existing rows, never replace.
//! - **User-scoped**: one live row per (user, dimension).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::DimensionProfile;
use crate::domain::question::DimensionDelta;

/// Repository port for per-user dimension scores.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Applies one answer's deltas atomically:
    /// `score[dim] = (score[dim] or 0) + value` for each delta.
    ///
    /// # Errors
    ///
    /// - `PersistenceFailed` on write failure (no partial application)
    async fn apply_deltas(
        &self,
        user_id: &UserId,
        deltas: &[DimensionDelta],
    ) -> Result<(), DomainError>;

    /// Fetches the user's full dimension map.
    async fn fetch(&self, user_id: &UserId) -> Result<DimensionProfile, DomainError>;

    /// Deletes every dimension row for the user (explicit profile reset).
    async fn reset(&self, user_id: &UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ProfileRepository) {}
    }
}
