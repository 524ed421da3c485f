//! In-memory registry of live elicitation sessions.
//!
//! Sessions are transient by contract: abandoning one simply drops it and
//! a new session is rebuilt from the durable answer log. One live session
//! per user; starting again replaces the old one (last write wins).

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::elicitation::ElicitationSession;
use crate::domain::foundation::UserId;

/// Registry of active sessions, keyed by user.
#[derive(Debug, Default)]
pub struct ActiveSessions {
    inner: Mutex<HashMap<UserId, ElicitationSession>>,
}

impl ActiveSessions {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) the user's session.
    pub fn insert(&self, session: ElicitationSession) {
        let mut map = self.lock();
        map.insert(session.user_id().clone(), session);
    }

    /// Returns a snapshot of the user's session.
    pub fn get(&self, user_id: &UserId) -> Option<ElicitationSession> {
        self.lock().get(user_id).cloned()
    }

    /// Runs a closure against the user's session, mutably.
    pub fn with_session<R>(
        &self,
        user_id: &UserId,
        f: impl FnOnce(&mut ElicitationSession) -> R,
    ) -> Option<R> {
        let mut map = self.lock();
        map.get_mut(user_id).map(f)
    }

    /// Discards the user's session ("abandon session").
    pub fn remove(&self, user_id: &UserId) -> Option<ElicitationSession> {
        self.lock().remove(user_id)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, ElicitationSession>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn session(id: &str) -> ElicitationSession {
        ElicitationSession::new(user(id), vec![], vec![], HashSet::new())
    }

    #[test]
    fn insert_and_get_roundtrips() {
        let sessions = ActiveSessions::new();
        sessions.insert(session("user-1"));
        assert!(sessions.get(&user("user-1")).is_some());
        assert!(sessions.get(&user("user-2")).is_none());
    }

    #[test]
    fn insert_replaces_existing_session() {
        let sessions = ActiveSessions::new();
        sessions.insert(session("user-1"));
        sessions.insert(session("user-1"));
        assert!(sessions.get(&user("user-1")).is_some());
    }

    #[test]
    fn remove_discards_session() {
        let sessions = ActiveSessions::new();
        sessions.insert(session("user-1"));
        assert!(sessions.remove(&user("user-1")).is_some());
        assert!(sessions.get(&user("user-1")).is_none());
    }

    #[test]
    fn with_session_returns_none_for_missing_user() {
        let sessions = ActiveSessions::new();
        let result = sessions.with_session(&user("ghost"), |s| s.is_complete());
        assert!(result.is_none());
    }
}
