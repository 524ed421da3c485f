//! Answer events - the durable unit of user action.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnswerEventId, QuestionId, Timestamp, UserId};

/// How the answer was given.
///
/// Detailed (free-text) answers are a higher-effort input and earn a
/// distinct reward tier in the engagement layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    /// A selection from the question's fixed options.
    Choice,
    /// A free-text elaboration submitted with the answer.
    Detailed,
}

/// Append-only log entry recording one answer.
///
/// Created exactly once per answer and never mutated. The answered-question
/// set is reconstructed from these by deduplicating on `question_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvent {
    pub id: AnswerEventId,
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub chosen_value: String,
    pub kind: AnswerKind,
    pub is_incomparable: bool,
    pub answered_at: Timestamp,
}

impl AnswerEvent {
    /// Creates an event for a scored-question answer.
    pub fn scored(
        user_id: UserId,
        question_id: QuestionId,
        chosen_value: impl Into<String>,
        kind: AnswerKind,
        answered_at: Timestamp,
    ) -> Self {
        Self {
            id: AnswerEventId::new(),
            user_id,
            question_id,
            chosen_value: chosen_value.into(),
            kind,
            is_incomparable: false,
            answered_at,
        }
    }

    /// Creates an event for an incomparable-pair choice.
    ///
    /// Incomparable answers never carry a scoring payload.
    pub fn incomparable(
        user_id: UserId,
        question_id: QuestionId,
        chosen_value: impl Into<String>,
        answered_at: Timestamp,
    ) -> Self {
        Self {
            id: AnswerEventId::new(),
            user_id,
            question_id,
            chosen_value: chosen_value.into(),
            kind: AnswerKind::Choice,
            is_incomparable: true,
            answered_at,
        }
    }
}
