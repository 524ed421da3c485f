//! Local response cache port.
//!
//! Best-effort durable store of raw answers, keyed by question id, used to
//! avoid re-asking answered questions. A second `put` for the same id
//! overwrites rather than duplicates. Failures degrade silently at the
//! call site: they cost only de-duplication convenience, never correctness
//! of the committed profile.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, QuestionId, Timestamp, UserId};

/// One cached answer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CachedResponse {
    pub question_id: QuestionId,
    pub answer_value: String,
    pub cached_at: Timestamp,
}

/// Port for the durable local answer cache.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Stores an answer, overwriting any previous answer for the same
    /// question id (at most one stored answer per question).
    async fn put(
        &self,
        user_id: &UserId,
        question_id: &QuestionId,
        answer_value: &str,
        cached_at: Timestamp,
    ) -> Result<(), DomainError>;

    /// Returns every cached answer for the user.
    async fn get_all(&self, user_id: &UserId) -> Result<Vec<CachedResponse>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_cache_is_object_safe() {
        fn _accepts_dyn(_cache: &dyn ResponseCache) {}
    }
}
