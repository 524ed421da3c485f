//! Application handlers - one per user-facing operation.
//!
//! Each handler owns the ports it needs as `Arc<dyn ...>` and drives a
//! single discrete user action to completion.

mod get_current;
mod get_engagement;
mod get_result;
mod start_session;
mod submit_answer;

pub use get_current::GetCurrentHandler;
pub use get_engagement::GetEngagementHandler;
pub use get_result::{GetResultHandler, QuizResult};
pub use start_session::{StartSessionCommand, StartSessionHandler};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};

use crate::domain::elicitation::{ElicitationError, ElicitationSession, Prompt};
use crate::domain::foundation::{AuthenticatedUser, CurrentUser};
use crate::ports::IdentityProvider;

/// What the UI consumes between answers.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub current: Option<Prompt>,
    pub progress_percent: u8,
    pub complete: bool,
}

impl SessionView {
    fn of(session: &ElicitationSession) -> Self {
        Self {
            current: session.current_prompt(),
            progress_percent: session.progress_percent(),
            complete: session.is_complete(),
        }
    }
}

/// Resolves the current user, treating `Unauthenticated` as a hard stop.
async fn require_user(
    identity: &dyn IdentityProvider,
    token: Option<&str>,
) -> Result<AuthenticatedUser, ElicitationError> {
    match identity.current_user(token).await? {
        CurrentUser::Authenticated(user) => Ok(user),
        CurrentUser::Unauthenticated => Err(ElicitationError::Unauthenticated),
    }
}
