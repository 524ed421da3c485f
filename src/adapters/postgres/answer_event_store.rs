//! PostgreSQL implementation of AnswerEventStore.
//!
//! `answer_events` is append-only with a unique (user_id, question_id)
//! constraint. Retried appends hit ON CONFLICT DO NOTHING, which keeps the
//! write idempotent without read-before-write.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::elicitation::{AnswerEvent, AnswerKind};
use crate::domain::foundation::{
    AnswerEventId, DomainError, QuestionId, Timestamp, UserId,
};
use crate::ports::AnswerEventStore;

/// PostgreSQL implementation of AnswerEventStore.
#[derive(Clone)]
pub struct PostgresAnswerEventStore {
    pool: PgPool,
}

impl PostgresAnswerEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_db_row(row: &sqlx::postgres::PgRow) -> Result<AnswerEvent, DomainError> {
        let id: Uuid = row.get("id");
        let user_id: String = row.get("user_id");
        let question_id: String = row.get("question_id");
        let chosen_value: String = row.get("chosen_value");
        let kind: String = row.get("kind");
        let is_incomparable: bool = row.get("is_incomparable");
        let answered_at: chrono::DateTime<chrono::Utc> = row.get("answered_at");

        let kind = kind_from_str(&kind)?;

        Ok(AnswerEvent {
            id: AnswerEventId::from_uuid(id),
            user_id: UserId::new(user_id)
                .map_err(|e| DomainError::validation("user_id", format!("Invalid user ID: {}", e)))?,
            question_id: QuestionId::new(question_id).map_err(|e| {
                DomainError::validation("question_id", format!("Invalid question ID: {}", e))
            })?,
            chosen_value,
            kind,
            is_incomparable,
            answered_at: Timestamp::from_datetime(answered_at),
        })
    }
}

fn kind_to_str(kind: AnswerKind) -> &'static str {
    match kind {
        AnswerKind::Choice => "choice",
        AnswerKind::Detailed => "detailed",
    }
}

fn kind_from_str(kind: &str) -> Result<AnswerKind, DomainError> {
    match kind {
        "choice" => Ok(AnswerKind::Choice),
        "detailed" => Ok(AnswerKind::Detailed),
        other => Err(DomainError::validation(
            "kind",
            format!("Unknown answer kind: {}", other),
        )),
    }
}

#[async_trait]
impl AnswerEventStore for PostgresAnswerEventStore {
    async fn append(&self, event: &AnswerEvent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO answer_events (
                id, user_id, question_id, chosen_value, kind,
                is_incomparable, answered_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, question_id) DO NOTHING
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(event.user_id.as_str())
        .bind(event.question_id.as_str())
        .bind(&event.chosen_value)
        .bind(kind_to_str(event.kind))
        .bind(event.is_incomparable)
        .bind(event.answered_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::persistence(format!("Failed to append answer event: {}", e)))?;

        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<AnswerEvent>, DomainError> {
        let rows = sqlx::query(
            "SELECT * FROM answer_events WHERE user_id = $1 ORDER BY answered_at",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::persistence(format!("Failed to list answer events: {}", e)))?;

        rows.iter().map(Self::from_db_row).collect()
    }

    async fn answered_question_ids(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<QuestionId>, DomainError> {
        let rows = sqlx::query(
            "SELECT DISTINCT question_id FROM answer_events WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::persistence(format!("Failed to load answered questions: {}", e))
        })?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("question_id");
                QuestionId::new(id).map_err(|e| {
                    DomainError::validation("question_id", format!("Invalid question ID: {}", e))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn kind_column_round_trips() {
        for kind in [AnswerKind::Choice, AnswerKind::Detailed] {
            assert_eq!(kind_from_str(kind_to_str(kind)).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_column_is_a_field_validation_error() {
        let err = kind_from_str("essay").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("kind"));
    }
}
