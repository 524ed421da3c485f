//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a bearer
//! token. They have **no external dependencies** - any auth provider can
//! populate them via the `IdentityProvider` port.

use super::UserId;

/// Authenticated user extracted from a validated token.
///
/// This is a **domain type** with no provider dependencies.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// Display name if available.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, display_name: Option<String>) -> Self {
        Self { id, display_name }
    }
}

/// Result of resolving the current user.
///
/// `Unauthenticated` is an expected state, not an error: the engine treats
/// it as a hard stop for any scoring action, but the caller may retry the
/// same action after signing in.
#[derive(Debug, Clone)]
pub enum CurrentUser {
    /// A signed-in user with a resolved identity.
    Authenticated(AuthenticatedUser),
    /// No identified user (missing, expired, or invalid credentials).
    Unauthenticated,
}

impl CurrentUser {
    /// Returns the authenticated user, or None.
    pub fn authenticated(&self) -> Option<&AuthenticatedUser> {
        match self {
            CurrentUser::Authenticated(user) => Some(user),
            CurrentUser::Unauthenticated => None,
        }
    }
}
