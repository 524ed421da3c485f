//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the Rudolph domain.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthenticatedUser, CurrentUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AnswerEventId, QuestionId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
