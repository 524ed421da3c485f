//! GetEngagementHandler - display-only streak and reward view.

use std::sync::Arc;

use crate::domain::elicitation::ElicitationError;
use crate::domain::engagement::EngagementState;
use crate::ports::{EngagementRepository, IdentityProvider};

use super::require_user;

/// Query handler for `{ reward_balance, streak_count }`.
pub struct GetEngagementHandler {
    identity: Arc<dyn IdentityProvider>,
    engagement: Arc<dyn EngagementRepository>,
}

impl GetEngagementHandler {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        engagement: Arc<dyn EngagementRepository>,
    ) -> Self {
        Self {
            identity,
            engagement,
        }
    }

    pub async fn handle(&self, token: Option<&str>) -> Result<EngagementState, ElicitationError> {
        let user = require_user(self.identity.as_ref(), token).await?;
        Ok(self.engagement.fetch(&user.id).await?)
    }
}
