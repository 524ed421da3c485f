//! GetResultHandler - final tally to personality bucket.

use std::sync::Arc;

use crate::domain::elicitation::ElicitationError;
use crate::domain::foundation::ErrorCode;
use crate::domain::profile::DimensionProfile;
use crate::domain::question::PersonalityBucket;
use crate::ports::{IdentityProvider, ProfileRepository, QuestionSource};

use super::require_user;
use crate::application::ActiveSessions;

/// The completed questionnaire's outcome.
#[derive(Debug, Clone)]
pub struct QuizResult {
    pub profile: DimensionProfile,
    pub total_score: i32,
    pub bucket: PersonalityBucket,
}

/// Handler resolving the accumulated profile to a bucket.
///
/// Only valid once the session is complete. A score outside every bucket
/// range is a distinct failure, never silently defaulted - it signals a
/// data bug or an out-of-range accumulation.
pub struct GetResultHandler {
    identity: Arc<dyn IdentityProvider>,
    questions: Arc<dyn QuestionSource>,
    profiles: Arc<dyn ProfileRepository>,
    sessions: Arc<ActiveSessions>,
}

impl GetResultHandler {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        questions: Arc<dyn QuestionSource>,
        profiles: Arc<dyn ProfileRepository>,
        sessions: Arc<ActiveSessions>,
    ) -> Self {
        Self {
            identity,
            questions,
            profiles,
            sessions,
        }
    }

    pub async fn handle(&self, token: Option<&str>) -> Result<QuizResult, ElicitationError> {
        let user = require_user(self.identity.as_ref(), token).await?;

        let session = self
            .sessions
            .get(&user.id)
            .ok_or(ElicitationError::NoActiveSession)?;
        if !session.is_complete() {
            return Err(ElicitationError::SessionNotComplete);
        }

        let profile = self.profiles.fetch(&user.id).await?;
        let total_score = profile.total();

        let catalog = self.questions.load().await?;
        let bucket = catalog.lookup_bucket(total_score).map_err(|err| {
            if err.code == ErrorCode::BucketLookupFailed {
                ElicitationError::BucketLookupFailed { score: total_score }
            } else {
                err.into()
            }
        })?;

        Ok(QuizResult {
            profile,
            total_score,
            bucket: bucket.clone(),
        })
    }
}
