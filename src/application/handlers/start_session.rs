//! StartSessionHandler - builds a fresh elicitation session.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::elicitation::{ElicitationError, ElicitationSession, SelectionStrategy};
use crate::domain::foundation::QuestionId;
use crate::ports::{AnswerEventStore, IdentityProvider, QuestionSource, ResponseCache};

use super::{require_user, SessionView};
use crate::application::ActiveSessions;

/// Command to start (or restart) the questionnaire.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub token: Option<String>,
}

/// Handler for starting an elicitation session.
///
/// The answered-id set is reconstructed from the durable answer log,
/// merged with the best-effort local response cache, so the user is never
/// re-asked a question they already answered.
pub struct StartSessionHandler {
    identity: Arc<dyn IdentityProvider>,
    questions: Arc<dyn QuestionSource>,
    answer_log: Arc<dyn AnswerEventStore>,
    cache: Arc<dyn ResponseCache>,
    strategy: Arc<dyn SelectionStrategy>,
    sessions: Arc<ActiveSessions>,
}

impl StartSessionHandler {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        questions: Arc<dyn QuestionSource>,
        answer_log: Arc<dyn AnswerEventStore>,
        cache: Arc<dyn ResponseCache>,
        strategy: Arc<dyn SelectionStrategy>,
        sessions: Arc<ActiveSessions>,
    ) -> Self {
        Self {
            identity,
            questions,
            answer_log,
            cache,
            strategy,
            sessions,
        }
    }

    pub async fn handle(&self, cmd: StartSessionCommand) -> Result<SessionView, ElicitationError> {
        let user = require_user(self.identity.as_ref(), cmd.token.as_deref()).await?;

        let catalog = self.questions.load().await?;

        let mut answered: HashSet<QuestionId> =
            self.answer_log.answered_question_ids(&user.id).await?;

        // Cache reads are best effort; a broken cache only loses dedup.
        match self.cache.get_all(&user.id).await {
            Ok(cached) => answered.extend(cached.into_iter().map(|c| c.question_id)),
            Err(err) => {
                tracing::warn!(user_id = %user.id, error = %err, "response cache unavailable");
            }
        }

        let scored = self.strategy.order(catalog.scored_questions().to_vec());
        let session = ElicitationSession::new(
            user.id.clone(),
            scored,
            catalog.incomparable_pairs().to_vec(),
            answered,
        );

        tracing::info!(
            user_id = %user.id,
            progress = session.progress_percent(),
            complete = session.is_complete(),
            "elicitation session started"
        );

        let view = SessionView::of(&session);
        self.sessions.insert(session);
        Ok(view)
    }
}
