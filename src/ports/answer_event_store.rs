//! Answer event store port.
//!
//! The append-only log of user answers. Events are never mutated; the
//! answered-question set is reconstructed by deduplicating on question id.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::elicitation::AnswerEvent;
use crate::domain::foundation::{DomainError, QuestionId, UserId};

/// Repository port for the answer event log.
#[async_trait]
pub trait AnswerEventStore: Send + Sync {
    /// Appends one answer event.
    ///
    /// Implementations must tolerate a retried append of the same
    /// (user, question) pair without duplicating it - retries after a
    /// false-negative failure must not double-record.
    ///
    /// # Errors
    ///
    /// - `PersistenceFailed` on write failure
    async fn append(&self, event: &AnswerEvent) -> Result<(), DomainError>;

    /// Lists all events for a user, oldest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<AnswerEvent>, DomainError>;

    /// Returns the distinct question ids the user has answered.
    async fn answered_question_ids(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<QuestionId>, DomainError>;
}
