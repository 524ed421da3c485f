//! HTTP adapter - the axum surface over the application handlers.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ElicitationHandlers;
pub use routes::{app, elicitation_routes};
