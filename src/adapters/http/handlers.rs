//! HTTP handlers for the elicitation endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::{
    GetCurrentHandler, GetEngagementHandler, GetResultHandler, StartSessionCommand,
    StartSessionHandler, SubmitAnswerCommand, SubmitAnswerHandler,
};
use crate::domain::elicitation::ElicitationError;
use crate::domain::foundation::QuestionId;

use super::dto::{
    EngagementResponse, ErrorResponse, QuizResultResponse, SessionViewResponse,
    SubmitAnswerRequest, SubmitAnswerResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ElicitationHandlers {
    start_handler: Arc<StartSessionHandler>,
    submit_handler: Arc<SubmitAnswerHandler>,
    current_handler: Arc<GetCurrentHandler>,
    result_handler: Arc<GetResultHandler>,
    engagement_handler: Arc<GetEngagementHandler>,
}

impl ElicitationHandlers {
    pub fn new(
        start_handler: Arc<StartSessionHandler>,
        submit_handler: Arc<SubmitAnswerHandler>,
        current_handler: Arc<GetCurrentHandler>,
        result_handler: Arc<GetResultHandler>,
        engagement_handler: Arc<GetEngagementHandler>,
    ) -> Self {
        Self {
            start_handler,
            submit_handler,
            current_handler,
            result_handler,
            engagement_handler,
        }
    }
}

/// Extracts the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/elicitation/session - Start (or restart) the questionnaire
pub async fn start_session(
    State(handlers): State<ElicitationHandlers>,
    headers: HeaderMap,
) -> Response {
    let cmd = StartSessionCommand {
        token: bearer_token(&headers),
    };
    match handlers.start_handler.handle(cmd).await {
        Ok(view) => {
            let response: SessionViewResponse = view.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_elicitation_error(e),
    }
}

/// GET /api/elicitation/current - The question currently awaiting an answer
pub async fn get_current(
    State(handlers): State<ElicitationHandlers>,
    headers: HeaderMap,
) -> Response {
    match handlers
        .current_handler
        .handle(bearer_token(&headers).as_deref())
        .await
    {
        Ok(view) => {
            let response: SessionViewResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_elicitation_error(e),
    }
}

/// POST /api/elicitation/answer - Submit one answer
pub async fn submit_answer(
    State(handlers): State<ElicitationHandlers>,
    headers: HeaderMap,
    Json(req): Json<SubmitAnswerRequest>,
) -> Response {
    let question_id = match QuestionId::new(req.question_id) {
        Ok(id) => id,
        Err(e) => {
            return handle_elicitation_error(ElicitationError::validation(
                "question_id",
                e.to_string(),
            ))
        }
    };

    let cmd = SubmitAnswerCommand {
        token: bearer_token(&headers),
        question_id,
        chosen_value: req.chosen_value,
        detailed: req.detailed,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response: SubmitAnswerResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_elicitation_error(e),
    }
}

/// GET /api/elicitation/result - The bucket for a completed session
pub async fn get_result(
    State(handlers): State<ElicitationHandlers>,
    headers: HeaderMap,
) -> Response {
    match handlers
        .result_handler
        .handle(bearer_token(&headers).as_deref())
        .await
    {
        Ok(result) => {
            let response: QuizResultResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_elicitation_error(e),
    }
}

/// GET /api/engagement - Display-only streak and reward counters
pub async fn get_engagement(
    State(handlers): State<ElicitationHandlers>,
    headers: HeaderMap,
) -> Response {
    match handlers
        .engagement_handler
        .handle(bearer_token(&headers).as_deref())
        .await
    {
        Ok(state) => {
            let response: EngagementResponse = state.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_elicitation_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_elicitation_error(error: ElicitationError) -> Response {
    let status = match &error {
        ElicitationError::Unauthenticated => StatusCode::UNAUTHORIZED,
        ElicitationError::NoActiveSession => StatusCode::NOT_FOUND,
        ElicitationError::SessionComplete
        | ElicitationError::SessionNotComplete
        | ElicitationError::UnexpectedAnswer { .. } => StatusCode::CONFLICT,
        ElicitationError::UnknownOption { .. } | ElicitationError::ValidationFailed { .. } => {
            StatusCode::BAD_REQUEST
        }
        ElicitationError::PersistenceFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        ElicitationError::BucketLookupFailed { .. } | ElicitationError::Infrastructure(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        tracing::error!(code = %error.code(), error = %error, "elicitation request failed");
    }

    let body = ErrorResponse {
        code: error.code().to_string(),
        message: error.message(),
        retryable: error.is_retryable(),
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_extracts_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Bearer abc123".parse().unwrap(),
        );
        assert_eq!(bearer_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn missing_authorization_header_yields_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn non_bearer_scheme_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Basic dXNlcjpwdw==".parse().unwrap(),
        );
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn persistence_failure_maps_to_service_unavailable() {
        let response = handle_elicitation_error(ElicitationError::persistence("down"));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn unauthenticated_maps_to_401() {
        let response = handle_elicitation_error(ElicitationError::Unauthenticated);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
