//! The elicitation session state machine.
//!
//! Drives which question is shown next, interleaves incomparable pairs on a
//! fixed cadence, and terminates when the pool is exhausted. The session is
//! transient: it is rebuilt from scratch if abandoned, with the answered-id
//! set reconstructed from the durable answer log.

use std::collections::{HashSet, VecDeque};

use crate::domain::foundation::{QuestionId, StateMachine, UserId};
use crate::domain::question::{IncomparablePair, ScoredQuestion};

use super::errors::ElicitationError;

/// Every N scored answers, one incomparable pair is interleaved.
pub const INCOMPARABLE_CADENCE: u32 = 3;

/// Phases of an elicitation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElicitationPhase {
    /// A scored question is being shown.
    AwaitingScored,
    /// An incomparable pair is being shown.
    AwaitingIncomparable,
    /// Terminal: the pool is exhausted and the final tally is available.
    Complete,
}

impl StateMachine for ElicitationPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ElicitationPhase::*;
        matches!(
            (self, target),
            (AwaitingScored, AwaitingIncomparable)
                | (AwaitingScored, Complete)
                | (AwaitingIncomparable, AwaitingScored)
                | (AwaitingIncomparable, Complete)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ElicitationPhase::*;
        match self {
            AwaitingScored => vec![AwaitingIncomparable, Complete],
            AwaitingIncomparable => vec![AwaitingScored, Complete],
            Complete => vec![],
        }
    }
}

/// The question currently shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Scored(ScoredQuestion),
    Incomparable(IncomparablePair),
}

impl Prompt {
    /// Returns the id of the prompted question.
    pub fn question_id(&self) -> &QuestionId {
        match self {
            Prompt::Scored(q) => q.id(),
            Prompt::Incomparable(p) => p.id(),
        }
    }

    /// Returns true for an incomparable prompt.
    pub fn is_incomparable(&self) -> bool {
        matches!(self, Prompt::Incomparable(_))
    }
}

/// One user's elicitation session.
///
/// # Invariants
///
/// - `Complete` is terminal: submissions are rejected once reached.
/// - The cadence transition fires at most once per scored-answer multiple,
///   and falls through to `AwaitingScored` once incomparables are exhausted.
/// - An empty scored pool completes immediately with no error.
#[derive(Debug, Clone)]
pub struct ElicitationSession {
    user_id: UserId,
    queue: VecDeque<ScoredQuestion>,
    incomparables: Vec<IncomparablePair>,
    answered: HashSet<QuestionId>,
    total_scored: usize,
    previously_answered_scored: usize,
    scored_answered: u32,
    incomparable_cursor: usize,
    phase: ElicitationPhase,
}

impl ElicitationSession {
    /// Starts a session over the given pool.
    ///
    /// Questions whose ids appear in `already_answered` are filtered out so
    /// the user is never re-asked; they still count toward progress.
    pub fn new(
        user_id: UserId,
        scored: Vec<ScoredQuestion>,
        incomparables: Vec<IncomparablePair>,
        already_answered: HashSet<QuestionId>,
    ) -> Self {
        let total_scored = scored.len();
        let queue: VecDeque<ScoredQuestion> = scored
            .into_iter()
            .filter(|q| !already_answered.contains(q.id()))
            .collect();
        let previously_answered_scored = total_scored - queue.len();

        let phase = if queue.is_empty() {
            ElicitationPhase::Complete
        } else {
            ElicitationPhase::AwaitingScored
        };

        Self {
            user_id,
            queue,
            incomparables,
            answered: already_answered,
            total_scored,
            previously_answered_scored,
            scored_answered: 0,
            incomparable_cursor: 0,
            phase,
        }
    }

    /// Returns the session owner.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the current phase.
    pub fn phase(&self) -> ElicitationPhase {
        self.phase
    }

    /// Returns true once the session reached its terminal state.
    pub fn is_complete(&self) -> bool {
        self.phase == ElicitationPhase::Complete
    }

    /// Returns the question currently awaiting an answer, if any.
    pub fn current_prompt(&self) -> Option<Prompt> {
        match self.phase {
            ElicitationPhase::AwaitingScored => {
                self.queue.front().cloned().map(Prompt::Scored)
            }
            ElicitationPhase::AwaitingIncomparable => self
                .incomparables
                .get(self.incomparable_cursor)
                .cloned()
                .map(Prompt::Incomparable),
            ElicitationPhase::Complete => None,
        }
    }

    /// Share of the scored pool answered so far, 0-100.
    ///
    /// An empty pool reads as fully complete.
    pub fn progress_percent(&self) -> u8 {
        if self.total_scored == 0 {
            return 100;
        }
        let answered = self.previously_answered_scored + self.scored_answered as usize;
        ((answered * 100) / self.total_scored) as u8
    }

    /// Returns true when the question was already answered (this session or
    /// a previous one). Re-submission of such an id must be a scoring no-op.
    pub fn is_answered(&self, question_id: &QuestionId) -> bool {
        self.answered.contains(question_id)
    }

    /// Number of scored answers recorded in this session.
    pub fn scored_answered(&self) -> u32 {
        self.scored_answered
    }

    /// Number of incomparable prompts consumed so far.
    pub fn incomparables_shown(&self) -> usize {
        self.incomparable_cursor
    }

    /// Records a scored answer and advances the machine.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` if the session already finished
    /// - `UnexpectedAnswer` if the id does not match the current question
    pub fn record_scored_answer(
        &mut self,
        question_id: &QuestionId,
    ) -> Result<(), ElicitationError> {
        if self.is_complete() {
            return Err(ElicitationError::SessionComplete);
        }
        if self.phase != ElicitationPhase::AwaitingScored {
            return Err(ElicitationError::unexpected_answer(
                self.current_prompt().map(|p| p.question_id().clone()),
            ));
        }
        let current = match self.queue.front() {
            Some(q) if q.id() == question_id => self.queue.pop_front(),
            other => {
                return Err(ElicitationError::unexpected_answer(
                    other.map(|q| q.id().clone()),
                ))
            }
        };
        debug_assert!(current.is_some());

        self.answered.insert(question_id.clone());
        self.scored_answered += 1;

        let cadence_hit = self.scored_answered % INCOMPARABLE_CADENCE == 0;
        let incomparable_available = self.incomparable_cursor < self.incomparables.len();

        let next = if cadence_hit && incomparable_available {
            ElicitationPhase::AwaitingIncomparable
        } else if self.queue.is_empty() {
            ElicitationPhase::Complete
        } else {
            ElicitationPhase::AwaitingScored
        };
        self.advance(next)
    }

    /// Records an incomparable choice and advances the machine.
    ///
    /// The cursor advance is what makes the cadence idempotent: once a pair
    /// is consumed it never reappears, and the next cadence hit picks the
    /// following pair or falls through when none remain.
    ///
    /// # Errors
    ///
    /// - `SessionComplete` if the session already finished
    /// - `UnexpectedAnswer` if the id does not match the current pair
    pub fn record_incomparable_answer(
        &mut self,
        question_id: &QuestionId,
    ) -> Result<(), ElicitationError> {
        if self.is_complete() {
            return Err(ElicitationError::SessionComplete);
        }
        if self.phase != ElicitationPhase::AwaitingIncomparable {
            return Err(ElicitationError::unexpected_answer(
                self.current_prompt().map(|p| p.question_id().clone()),
            ));
        }
        match self.incomparables.get(self.incomparable_cursor) {
            Some(pair) if pair.id() == question_id => {}
            other => {
                return Err(ElicitationError::unexpected_answer(
                    other.map(|p| p.id().clone()),
                ))
            }
        }

        self.answered.insert(question_id.clone());
        self.incomparable_cursor += 1;

        let next = if self.queue.is_empty() {
            ElicitationPhase::Complete
        } else {
            ElicitationPhase::AwaitingScored
        };
        self.advance(next)
    }

    fn advance(&mut self, next: ElicitationPhase) -> Result<(), ElicitationError> {
        if next == self.phase {
            return Ok(());
        }
        self.phase = self
            .phase
            .transition_to(next)
            .map_err(|e| ElicitationError::infrastructure(e.to_string()))?;
        Ok(())
    }
}
