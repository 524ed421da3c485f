//! GetCurrentHandler - read-only view of the live session.

use std::sync::Arc;

use crate::domain::elicitation::ElicitationError;
use crate::ports::IdentityProvider;

use super::{require_user, SessionView};
use crate::application::ActiveSessions;

/// Query handler for the UI's between-answer view:
/// `{ current_question, progress_percent, is_incomparable }`.
pub struct GetCurrentHandler {
    identity: Arc<dyn IdentityProvider>,
    sessions: Arc<ActiveSessions>,
}

impl GetCurrentHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>, sessions: Arc<ActiveSessions>) -> Self {
        Self { identity, sessions }
    }

    pub async fn handle(&self, token: Option<&str>) -> Result<SessionView, ElicitationError> {
        let user = require_user(self.identity.as_ref(), token).await?;
        self.sessions
            .get(&user.id)
            .map(|session| SessionView::of(&session))
            .ok_or(ElicitationError::NoActiveSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::StaticIdentityProvider;
    use crate::domain::elicitation::ElicitationSession;
    use crate::domain::foundation::UserId;
    use std::collections::HashSet;

    fn user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[tokio::test]
    async fn returns_view_for_active_session() {
        let sessions = Arc::new(ActiveSessions::new());
        sessions.insert(ElicitationSession::new(
            user_id(),
            vec![],
            vec![],
            HashSet::new(),
        ));
        let handler = GetCurrentHandler::new(
            Arc::new(StaticIdentityProvider::single("t", user_id())),
            sessions,
        );
        let view = handler.handle(Some("t")).await.unwrap();
        assert!(view.complete);
    }

    #[tokio::test]
    async fn missing_session_is_reported() {
        let handler = GetCurrentHandler::new(
            Arc::new(StaticIdentityProvider::single("t", user_id())),
            Arc::new(ActiveSessions::new()),
        );
        let result = handler.handle(Some("t")).await;
        assert_eq!(result.unwrap_err(), ElicitationError::NoActiveSession);
    }
}
