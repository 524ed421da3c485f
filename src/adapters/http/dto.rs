//! HTTP DTOs for the elicitation endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::handlers::{QuizResult, SessionView, SubmitAnswerResult};
use crate::domain::elicitation::Prompt;
use crate::domain::engagement::EngagementState;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to submit one answer.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_id: String,
    pub chosen_value: String,
    /// Free-text elaboration flag; earns the higher reward tier.
    #[serde(default)]
    pub detailed: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// The question currently awaiting an answer.
#[derive(Debug, Clone, Serialize)]
pub struct PromptResponse {
    pub question_id: String,
    pub category: String,
    pub is_incomparable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_a: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_b: Option<String>,
}

impl From<Prompt> for PromptResponse {
    fn from(prompt: Prompt) -> Self {
        match prompt {
            Prompt::Scored(question) => Self {
                question_id: question.id().to_string(),
                category: question.category().to_string(),
                is_incomparable: false,
                text: Some(question.text().to_string()),
                options: question
                    .options()
                    .iter()
                    .map(|o| o.text.clone())
                    .collect(),
                item_a: None,
                item_b: None,
            },
            Prompt::Incomparable(pair) => Self {
                question_id: pair.id().to_string(),
                category: pair.category().to_string(),
                is_incomparable: true,
                text: None,
                options: Vec::new(),
                item_a: Some(pair.item_a().to_string()),
                item_b: Some(pair.item_b().to_string()),
            },
        }
    }
}

/// The between-answers session view.
#[derive(Debug, Clone, Serialize)]
pub struct SessionViewResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<PromptResponse>,
    pub progress_percent: u8,
    pub complete: bool,
}

impl From<SessionView> for SessionViewResponse {
    fn from(view: SessionView) -> Self {
        Self {
            current_question: view.current.map(PromptResponse::from),
            progress_percent: view.progress_percent,
            complete: view.complete,
        }
    }
}

/// Response to an answer submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswerResponse {
    pub already_answered: bool,
    pub reward_balance: u32,
    pub streak_count: u32,
    #[serde(flatten)]
    pub view: SessionViewResponse,
}

impl From<SubmitAnswerResult> for SubmitAnswerResponse {
    fn from(result: SubmitAnswerResult) -> Self {
        Self {
            already_answered: result.already_answered,
            reward_balance: result.engagement.reward_balance,
            streak_count: result.engagement.streak_count,
            view: result.view.into(),
        }
    }
}

/// The completed questionnaire's outcome.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResultResponse {
    pub total_score: i32,
    pub dimensions: BTreeMap<String, i32>,
    pub bucket: BucketResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct BucketResponse {
    pub name: String,
    pub description: String,
    pub special_power: String,
    pub quote: String,
}

impl From<QuizResult> for QuizResultResponse {
    fn from(result: QuizResult) -> Self {
        Self {
            total_score: result.total_score,
            dimensions: result
                .profile
                .iter()
                .map(|(dimension, score)| (dimension.to_string(), score))
                .collect(),
            bucket: BucketResponse {
                name: result.bucket.name,
                description: result.bucket.description,
                special_power: result.bucket.special_power,
                quote: result.bucket.quote,
            },
        }
    }
}

/// Display-only engagement counters.
#[derive(Debug, Clone, Serialize)]
pub struct EngagementResponse {
    pub reward_balance: u32,
    pub streak_count: u32,
}

impl From<EngagementState> for EngagementResponse {
    fn from(state: EngagementState) -> Self {
        Self {
            reward_balance: state.reward_balance,
            streak_count: state.streak_count,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// True when the same request may be retried.
    pub retryable: bool,
}
