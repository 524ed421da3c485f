//! In-memory adapters.
//!
//! Process-local implementations of the record-store ports. Used by tests
//! and by local development without a database. Write failures can be
//! injected to exercise the persistence-failure paths.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::elicitation::AnswerEvent;
use crate::domain::engagement::EngagementState;
use crate::domain::foundation::{DomainError, QuestionId, Timestamp, UserId};
use crate::domain::profile::DimensionProfile;
use crate::domain::question::{DimensionDelta, QuestionCatalog};
use crate::ports::{
    AnswerEventStore, CachedResponse, EngagementRepository, ProfileRepository, QuestionSource,
    ResponseCache,
};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn injected_failure(op: &str) -> DomainError {
    DomainError::persistence(format!("injected {} failure", op))
}

/// In-memory dimension-score rows.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    rows: Mutex<HashMap<UserId, HashMap<String, i32>>>,
    fail_writes: AtomicBool,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent writes fail, for persistence-failure tests.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn apply_deltas(
        &self,
        user_id: &UserId,
        deltas: &[DimensionDelta],
    ) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected_failure("apply_deltas"));
        }
        let mut rows = lock(&self.rows);
        let user_rows = rows.entry(user_id.clone()).or_default();
        for delta in deltas {
            *user_rows.entry(delta.dimension.clone()).or_insert(0) += delta.value;
        }
        Ok(())
    }

    async fn fetch(&self, user_id: &UserId) -> Result<DimensionProfile, DomainError> {
        let rows = lock(&self.rows);
        Ok(match rows.get(user_id) {
            Some(user_rows) => DimensionProfile::from_rows(
                user_rows.iter().map(|(k, v)| (k.clone(), *v)),
            ),
            None => DimensionProfile::new(),
        })
    }

    async fn reset(&self, user_id: &UserId) -> Result<(), DomainError> {
        lock(&self.rows).remove(user_id);
        Ok(())
    }
}

/// In-memory append-only answer log.
#[derive(Debug, Default)]
pub struct InMemoryAnswerEventStore {
    events: Mutex<Vec<AnswerEvent>>,
    fail_writes: AtomicBool,
}

impl InMemoryAnswerEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent appends fail, for persistence-failure tests.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seeds an event directly (test setup).
    pub fn push(&self, event: AnswerEvent) {
        lock(&self.events).push(event);
    }
}

#[async_trait]
impl AnswerEventStore for InMemoryAnswerEventStore {
    async fn append(&self, event: &AnswerEvent) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected_failure("append"));
        }
        let mut events = lock(&self.events);
        // Retried appends of the same (user, question) must not duplicate.
        let duplicate = events.iter().any(|e| {
            e.user_id == event.user_id && e.question_id == event.question_id
        });
        if !duplicate {
            events.push(event.clone());
        }
        Ok(())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<AnswerEvent>, DomainError> {
        Ok(lock(&self.events)
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn answered_question_ids(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<QuestionId>, DomainError> {
        Ok(lock(&self.events)
            .iter()
            .filter(|e| &e.user_id == user_id)
            .map(|e| e.question_id.clone())
            .collect())
    }
}

/// In-memory engagement counters.
#[derive(Debug, Default)]
pub struct InMemoryEngagementRepository {
    states: Mutex<HashMap<UserId, EngagementState>>,
    fail_writes: AtomicBool,
}

impl InMemoryEngagementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent upserts fail, for persistence-failure tests.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl EngagementRepository for InMemoryEngagementRepository {
    async fn fetch(&self, user_id: &UserId) -> Result<EngagementState, DomainError> {
        Ok(lock(&self.states).get(user_id).cloned().unwrap_or_default())
    }

    async fn upsert(&self, user_id: &UserId, state: &EngagementState) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected_failure("upsert"));
        }
        lock(&self.states).insert(user_id.clone(), state.clone());
        Ok(())
    }
}

/// In-memory response cache, keyed by (user, question).
#[derive(Debug, Default)]
pub struct InMemoryResponseCache {
    entries: Mutex<HashMap<UserId, HashMap<QuestionId, CachedResponse>>>,
    fail_writes: AtomicBool,
}

impl InMemoryResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent puts fail, for degraded-cache tests.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResponseCache for InMemoryResponseCache {
    async fn put(
        &self,
        user_id: &UserId,
        question_id: &QuestionId,
        answer_value: &str,
        cached_at: Timestamp,
    ) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::CacheError,
                "injected cache failure",
            ));
        }
        let mut entries = lock(&self.entries);
        entries.entry(user_id.clone()).or_default().insert(
            question_id.clone(),
            CachedResponse {
                question_id: question_id.clone(),
                answer_value: answer_value.to_string(),
                cached_at,
            },
        );
        Ok(())
    }

    async fn get_all(&self, user_id: &UserId) -> Result<Vec<CachedResponse>, DomainError> {
        Ok(lock(&self.entries)
            .get(user_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default())
    }
}

/// Question source serving a pre-built catalog.
#[derive(Debug, Clone)]
pub struct StaticQuestionSource {
    catalog: QuestionCatalog,
}

impl StaticQuestionSource {
    pub fn new(catalog: QuestionCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn load(&self) -> Result<QuestionCatalog, DomainError> {
        Ok(self.catalog.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::elicitation::AnswerKind;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    #[tokio::test]
    async fn profile_repository_accumulates_across_calls() {
        let repo = InMemoryProfileRepository::new();
        repo.apply_deltas(&user(), &[DimensionDelta::new("A", 2).unwrap()])
            .await
            .unwrap();
        repo.apply_deltas(&user(), &[DimensionDelta::new("A", 3).unwrap()])
            .await
            .unwrap();
        let profile = repo.fetch(&user()).await.unwrap();
        assert_eq!(profile.score("A"), Some(5));
    }

    #[tokio::test]
    async fn profile_reset_clears_rows() {
        let repo = InMemoryProfileRepository::new();
        repo.apply_deltas(&user(), &[DimensionDelta::new("A", 2).unwrap()])
            .await
            .unwrap();
        repo.reset(&user()).await.unwrap();
        assert!(repo.fetch(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn answer_store_deduplicates_retried_appends() {
        let store = InMemoryAnswerEventStore::new();
        let event = AnswerEvent::scored(
            user(),
            qid("q0"),
            "Yes",
            AnswerKind::Choice,
            Timestamp::now(),
        );
        store.append(&event).await.unwrap();
        store.append(&event).await.unwrap();
        assert_eq!(store.list_by_user(&user()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn cache_put_overwrites_same_question() {
        let cache = InMemoryResponseCache::new();
        cache
            .put(&user(), &qid("q0"), "first", Timestamp::now())
            .await
            .unwrap();
        cache
            .put(&user(), &qid("q0"), "second", Timestamp::now())
            .await
            .unwrap();
        let all = cache.get_all(&user()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].answer_value, "second");
    }

    #[tokio::test]
    async fn engagement_fetch_defaults_to_fresh_state() {
        let repo = InMemoryEngagementRepository::new();
        let state = repo.fetch(&user()).await.unwrap();
        assert_eq!(state, EngagementState::new());
    }
}
