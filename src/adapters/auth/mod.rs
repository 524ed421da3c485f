//! Identity adapters.

mod jwt;
mod static_provider;

pub use jwt::{Claims, JwtIdentityProvider};
pub use static_provider::StaticIdentityProvider;
