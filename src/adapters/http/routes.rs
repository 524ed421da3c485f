//! HTTP routes for the elicitation API.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    get_current, get_engagement, get_result, start_session, submit_answer, ElicitationHandlers,
};

/// Creates the elicitation router with all endpoints.
pub fn elicitation_routes(handlers: ElicitationHandlers) -> Router {
    Router::new()
        .route("/api/elicitation/session", post(start_session))
        .route("/api/elicitation/current", get(get_current))
        .route("/api/elicitation/answer", post(submit_answer))
        .route("/api/elicitation/result", get(get_result))
        .route("/api/engagement", get(get_engagement))
        .with_state(handlers)
}

/// Assembles the full application router with tracing and CORS.
pub fn app(handlers: ElicitationHandlers) -> Router {
    elicitation_routes(handlers)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
