//! SubmitAnswerHandler - the one-answer pipeline.
//!
//! Validates the submission against the live session, advances the state
//! machine optimistically, then performs the durable writes (dimension
//! deltas, answer log, engagement counters) under the retry policy. A
//! write failure is surfaced as a recoverable error without rolling the
//! session back, so the user is not forced to repeat answered questions.

use std::sync::Arc;

use crate::domain::elicitation::{AnswerEvent, AnswerKind, ElicitationError, Prompt};
use crate::domain::engagement::EngagementState;
use crate::domain::foundation::{QuestionId, Timestamp, UserId};
use crate::domain::question::DimensionDelta;
use crate::ports::{
    AnswerEventStore, EngagementRepository, IdentityProvider, ProfileRepository, ResponseCache,
};

use super::{require_user, SessionView};
use crate::application::{ActiveSessions, RetryPolicy};

/// Command carrying one answer.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub token: Option<String>,
    pub question_id: QuestionId,
    pub chosen_value: String,
    /// True when the value is a free-text elaboration rather than a
    /// fixed-option pick; earns the higher reward tier.
    pub detailed: bool,
}

/// Result of a submission.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    /// True when the question id was already answered and the submission
    /// was a scoring no-op.
    pub already_answered: bool,
    pub engagement: EngagementState,
    pub view: SessionView,
}

/// Handler for answer submissions.
pub struct SubmitAnswerHandler {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    answer_log: Arc<dyn AnswerEventStore>,
    engagement: Arc<dyn EngagementRepository>,
    cache: Arc<dyn ResponseCache>,
    sessions: Arc<ActiveSessions>,
    retry: RetryPolicy,
}

impl SubmitAnswerHandler {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        answer_log: Arc<dyn AnswerEventStore>,
        engagement: Arc<dyn EngagementRepository>,
        cache: Arc<dyn ResponseCache>,
        sessions: Arc<ActiveSessions>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            identity,
            profiles,
            answer_log,
            engagement,
            cache,
            sessions,
            retry,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnswerCommand,
    ) -> Result<SubmitAnswerResult, ElicitationError> {
        let user = require_user(self.identity.as_ref(), cmd.token.as_deref()).await?;
        let now = Timestamp::now();

        // Phase 1: validate and advance the in-memory state machine.
        // The lock is never held across an await.
        let advanced = self.advance_session(&user.id, &cmd)?;

        let advanced = match advanced {
            Advanced::AlreadyAnswered(view) => {
                tracing::debug!(user_id = %user.id, question_id = %cmd.question_id,
                    "duplicate submission ignored");
                let engagement = self.engagement.fetch(&user.id).await?;
                return Ok(SubmitAnswerResult {
                    already_answered: true,
                    engagement,
                    view,
                });
            }
            Advanced::Recorded(data) => data,
        };

        // Phase 2: durable writes under the retry policy.
        let kind = if cmd.detailed {
            AnswerKind::Detailed
        } else {
            AnswerKind::Choice
        };

        if !advanced.deltas.is_empty() {
            self.retry
                .run("apply_deltas", || {
                    self.profiles.apply_deltas(&user.id, &advanced.deltas)
                })
                .await?;
        }

        let event = if advanced.is_incomparable {
            AnswerEvent::incomparable(
                user.id.clone(),
                cmd.question_id.clone(),
                cmd.chosen_value.clone(),
                now,
            )
        } else {
            AnswerEvent::scored(
                user.id.clone(),
                cmd.question_id.clone(),
                cmd.chosen_value.clone(),
                kind,
                now,
            )
        };
        self.retry
            .run("append_answer_event", || self.answer_log.append(&event))
            .await?;

        let previous = self.engagement.fetch(&user.id).await?;
        let scored_answers = if advanced.is_incomparable {
            None
        } else {
            Some(advanced.scored_answered)
        };
        let next_engagement = previous.record_answer(kind, scored_answers, now);
        self.retry
            .run("upsert_engagement", || {
                self.engagement.upsert(&user.id, &next_engagement)
            })
            .await?;

        // Phase 3: best-effort local cache; failures only cost dedup.
        if let Err(err) = self
            .cache
            .put(&user.id, &cmd.question_id, &cmd.chosen_value, now)
            .await
        {
            tracing::warn!(user_id = %user.id, error = %err, "response cache write failed");
        }

        tracing::info!(
            user_id = %user.id,
            question_id = %cmd.question_id,
            incomparable = advanced.is_incomparable,
            progress = advanced.view.progress_percent,
            "answer recorded"
        );

        Ok(SubmitAnswerResult {
            already_answered: false,
            engagement: next_engagement,
            view: advanced.view,
        })
    }

    /// Validates the answer against the current prompt and advances the
    /// session, returning everything the durable writes need.
    fn advance_session(
        &self,
        user_id: &UserId,
        cmd: &SubmitAnswerCommand,
    ) -> Result<Advanced, ElicitationError> {
        self.sessions
            .with_session(user_id, |session| {
                if session.is_complete() {
                    return Err(ElicitationError::SessionComplete);
                }
                if session.is_answered(&cmd.question_id) {
                    return Ok(Advanced::AlreadyAnswered(SessionView::of(session)));
                }

                let prompt = session
                    .current_prompt()
                    .ok_or(ElicitationError::SessionComplete)?;

                match prompt {
                    Prompt::Scored(question) => {
                        let deltas = if cmd.detailed {
                            // Free-text elaborations carry no numeric payload.
                            Vec::new()
                        } else {
                            question
                                .option_by_text(&cmd.chosen_value)
                                .ok_or_else(|| {
                                    ElicitationError::unknown_option(cmd.question_id.clone())
                                })?
                                .deltas
                                .to_vec()
                        };
                        session.record_scored_answer(&cmd.question_id)?;
                        Ok(Advanced::Recorded(RecordedAnswer {
                            deltas,
                            is_incomparable: false,
                            scored_answered: session.scored_answered(),
                            view: SessionView::of(session),
                        }))
                    }
                    Prompt::Incomparable(pair) => {
                        if cmd.chosen_value != pair.item_a() && cmd.chosen_value != pair.item_b() {
                            return Err(ElicitationError::unknown_option(cmd.question_id.clone()));
                        }
                        session.record_incomparable_answer(&cmd.question_id)?;
                        Ok(Advanced::Recorded(RecordedAnswer {
                            deltas: Vec::new(),
                            is_incomparable: true,
                            scored_answered: session.scored_answered(),
                            view: SessionView::of(session),
                        }))
                    }
                }
            })
            .ok_or(ElicitationError::NoActiveSession)?
    }
}

enum Advanced {
    AlreadyAnswered(SessionView),
    Recorded(RecordedAnswer),
}

struct RecordedAnswer {
    deltas: Vec<DimensionDelta>,
    is_incomparable: bool,
    scored_answered: u32,
    view: SessionView,
}
