//! Identity provider port.
//!
//! Resolves the current user from whatever credential the caller presents.
//! The engine treats `Unauthenticated` as a hard stop for any scoring
//! action; session state is preserved so the action can be retried after
//! sign-in.

use async_trait::async_trait;

use crate::domain::foundation::{CurrentUser, DomainError};

/// Port for resolving the authenticated user.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the user behind a bearer token.
    ///
    /// A missing, expired, or invalid token resolves to
    /// `CurrentUser::Unauthenticated` - that is an expected state, not an
    /// error. Errors are reserved for provider outages.
    async fn current_user(&self, token: Option<&str>) -> Result<CurrentUser, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn IdentityProvider) {}
    }
}
