//! JWT bearer-token identity resolution.

use async_trait::async_trait;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthenticatedUser, CurrentUser, DomainError, UserId};
use crate::ports::IdentityProvider;

/// Claims carried by marketplace-issued access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the marketplace user id.
    pub sub: String,
    /// Expiry as unix seconds.
    pub exp: i64,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Validates HS256-signed bearer tokens.
///
/// Missing, malformed, expired, or badly-signed tokens all resolve to
/// `CurrentUser::Unauthenticated` rather than an error; the caller
/// decides whether anonymity is acceptable for the operation.
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn current_user(&self, token: Option<&str>) -> Result<CurrentUser, DomainError> {
        let Some(token) = token else {
            return Ok(CurrentUser::Unauthenticated);
        };

        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(err) => {
                tracing::debug!(error = %err, "rejected bearer token");
                return Ok(CurrentUser::Unauthenticated);
            }
        };

        match UserId::new(&claims.sub) {
            Ok(id) => Ok(CurrentUser::Authenticated(AuthenticatedUser {
                id,
                display_name: claims.name,
            })),
            Err(_) => Ok(CurrentUser::Unauthenticated),
        }
    }
}
