//! Fixed token-to-user mapping for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthenticatedUser, CurrentUser, DomainError, UserId};
use crate::ports::IdentityProvider;

/// Resolves bearer tokens against a fixed in-memory table. Anything not
/// in the table resolves to `CurrentUser::Unauthenticated`.
#[derive(Debug, Default, Clone)]
pub struct StaticIdentityProvider {
    users: HashMap<String, AuthenticatedUser>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider recognizing exactly one token.
    pub fn single(token: &str, user_id: UserId) -> Self {
        let mut provider = Self::new();
        provider.register(token, user_id, None);
        provider
    }

    pub fn register(&mut self, token: &str, user_id: UserId, display_name: Option<&str>) {
        self.users.insert(
            token.to_string(),
            AuthenticatedUser {
                id: user_id,
                display_name: display_name.map(str::to_string),
            },
        );
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_user(&self, token: Option<&str>) -> Result<CurrentUser, DomainError> {
        Ok(match token.and_then(|t| self.users.get(t)) {
            Some(user) => CurrentUser::Authenticated(user.clone()),
            None => CurrentUser::Unauthenticated,
        })
    }
}
