//! Elicitation-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId};

/// Errors surfaced by the elicitation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElicitationError {
    /// No identified user when an answer was submitted. The session state
    /// is preserved so the action can be retried after sign-in.
    Unauthenticated,
    /// The session already reached its terminal state; further answers
    /// are rejected.
    SessionComplete,
    /// No elicitation session has been started for this user.
    NoActiveSession,
    /// A result was requested before the session completed.
    SessionNotComplete,
    /// The submitted answer does not match the question currently shown.
    UnexpectedAnswer { expected: Option<QuestionId> },
    /// The chosen value does not name any option of the current question.
    UnknownOption { question_id: QuestionId },
    /// The accumulated score fell outside every bucket range.
    BucketLookupFailed { score: i32 },
    /// A durable write failed after exhausting its retry budget. In-memory
    /// session state is kept; the caller is warned progress may be unsaved.
    PersistenceFailed(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ElicitationError {
    pub fn unexpected_answer(expected: Option<QuestionId>) -> Self {
        ElicitationError::UnexpectedAnswer { expected }
    }

    pub fn unknown_option(question_id: QuestionId) -> Self {
        ElicitationError::UnknownOption { question_id }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        ElicitationError::PersistenceFailed(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ElicitationError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ElicitationError::Infrastructure(message.into())
    }

    /// Maps to the stable error code used across port and HTTP boundaries.
    pub fn code(&self) -> ErrorCode {
        match self {
            ElicitationError::Unauthenticated => ErrorCode::Unauthenticated,
            ElicitationError::SessionComplete => ErrorCode::SessionComplete,
            ElicitationError::NoActiveSession => ErrorCode::NoActiveSession,
            ElicitationError::SessionNotComplete => ErrorCode::SessionNotComplete,
            ElicitationError::UnexpectedAnswer { .. } => ErrorCode::UnexpectedAnswer,
            ElicitationError::UnknownOption { .. } => ErrorCode::ValidationFailed,
            ElicitationError::BucketLookupFailed { .. } => ErrorCode::BucketLookupFailed,
            ElicitationError::PersistenceFailed(_) => ErrorCode::PersistenceFailed,
            ElicitationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ElicitationError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Whether the caller may retry the same action.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ElicitationError::Unauthenticated | ElicitationError::PersistenceFailed(_)
        )
    }

    pub fn message(&self) -> String {
        match self {
            ElicitationError::Unauthenticated => {
                "Sign in required before answering".to_string()
            }
            ElicitationError::SessionComplete => {
                "The questionnaire is already complete".to_string()
            }
            ElicitationError::NoActiveSession => "No active questionnaire session".to_string(),
            ElicitationError::SessionNotComplete => {
                "The questionnaire is not complete yet".to_string()
            }
            ElicitationError::UnexpectedAnswer { expected } => match expected {
                Some(id) => format!("Expected an answer for question '{}'", id),
                None => "No question is currently awaiting an answer".to_string(),
            },
            ElicitationError::UnknownOption { question_id } => {
                format!("Chosen value is not an option of question '{}'", question_id)
            }
            ElicitationError::BucketLookupFailed { score } => {
                format!("Score {} falls outside every personality bucket", score)
            }
            ElicitationError::PersistenceFailed(msg) => {
                format!("Progress may not be saved: {}", msg)
            }
            ElicitationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ElicitationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ElicitationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ElicitationError {}

impl From<DomainError> for ElicitationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Unauthenticated => ElicitationError::Unauthenticated,
            ErrorCode::SessionComplete => ElicitationError::SessionComplete,
            ErrorCode::NoActiveSession => ElicitationError::NoActiveSession,
            ErrorCode::SessionNotComplete => ElicitationError::SessionNotComplete,
            ErrorCode::BucketLookupFailed => {
                // Score detail is in the message; keep the distinct code.
                ElicitationError::Infrastructure(err.to_string())
            }
            ErrorCode::PersistenceFailed | ErrorCode::WriteTimeout => {
                ElicitationError::PersistenceFailed(err.to_string())
            }
            ErrorCode::ValidationFailed => ElicitationError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => ElicitationError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_is_retryable() {
        assert!(ElicitationError::Unauthenticated.is_retryable());
    }

    #[test]
    fn persistence_failure_is_retryable() {
        assert!(ElicitationError::persistence("timeout").is_retryable());
    }

    #[test]
    fn session_complete_is_not_retryable() {
        assert!(!ElicitationError::SessionComplete.is_retryable());
    }

    #[test]
    fn codes_map_to_taxonomy() {
        assert_eq!(
            ElicitationError::BucketLookupFailed { score: 99 }.code(),
            ErrorCode::BucketLookupFailed
        );
        assert_eq!(
            ElicitationError::Unauthenticated.code(),
            ErrorCode::Unauthenticated
        );
    }

    #[test]
    fn domain_error_converts_to_persistence_variant() {
        let err: ElicitationError = DomainError::persistence("insert failed").into();
        assert!(matches!(err, ElicitationError::PersistenceFailed(_)));
    }

    #[test]
    fn validation_conversion_keeps_field_detail() {
        let err: ElicitationError =
            DomainError::validation("chosen_value", "cannot be empty").into();
        match err {
            ElicitationError::ValidationFailed { field, .. } => assert_eq!(field, "chosen_value"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
