//! Engagement module - streaks and the reward ledger.
//!
//! Both counters derive from answer events but are independent of the
//! scoring math. State advances only through pure functions taking
//! `(previous, event, now)`, which keeps the day-boundary and cadence
//! arithmetic testable in isolation.

use serde::{Deserialize, Serialize};

use crate::domain::elicitation::AnswerKind;
use crate::domain::foundation::Timestamp;

/// Every Nth scored answer earns the questionnaire reward.
pub const QUESTIONNAIRE_REWARD_INTERVAL: u32 = 4;

/// Coins granted when the scored-answer count hits the interval.
pub const QUESTIONNAIRE_REWARD: u32 = 5;

/// Coins granted for a detailed (free-text) answer - a higher-effort tier.
pub const DETAILED_REWARD: u32 = 15;

/// Answers more than this many hours apart reset the streak.
pub const STREAK_WINDOW_HOURS: i64 = 24;

/// Per-user engagement counters.
///
/// `reward_balance` only increases; spending is not modeled here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementState {
    pub reward_balance: u32,
    pub streak_count: u32,
    pub last_answered_at: Option<Timestamp>,
}

impl EngagementState {
    /// Fresh state for a user with no recorded answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstitutes state from persisted counters.
    pub fn reconstitute(
        reward_balance: u32,
        streak_count: u32,
        last_answered_at: Option<Timestamp>,
    ) -> Self {
        Self {
            reward_balance,
            streak_count,
            last_answered_at,
        }
    }

    /// Advances the counters for one answer event.
    ///
    /// `scored_answers` is the post-answer scored count when the answer was
    /// a scored one, and `None` for incomparable answers - the questionnaire
    /// reward must never re-fire for a multiple already rewarded.
    ///
    /// Streak rule: a gap of more than 24 hours since the previous answer
    /// resets the streak to 1; anything up to and including 24 hours
    /// increments it, same-day re-answers included. This is a rolling-window
    /// streak, not a calendar-day streak.
    pub fn record_answer(
        &self,
        kind: AnswerKind,
        scored_answers: Option<u32>,
        now: Timestamp,
    ) -> Self {
        let mut reward_balance = self.reward_balance;

        if let Some(count) = scored_answers {
            if count > 0 && count % QUESTIONNAIRE_REWARD_INTERVAL == 0 {
                reward_balance += QUESTIONNAIRE_REWARD;
            }
        }
        if kind == AnswerKind::Detailed {
            reward_balance += DETAILED_REWARD;
        }

        let streak_count = match self.last_answered_at {
            Some(last)
                if now.duration_since(&last)
                    <= chrono::Duration::hours(STREAK_WINDOW_HOURS) =>
            {
                self.streak_count + 1
            }
            _ => 1,
        };

        Self {
            reward_balance,
            streak_count,
            last_answered_at: Some(now),
        }
    }
}
