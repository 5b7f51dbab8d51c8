//! Plan generation endpoints.

use super::headers::CallerIdentity;
use super::types::{ApiError, CancelResponse, CreatePlanRequest, PlanResponse};
use super::AppState;
use crate::plan::{GenerationRequest, PipelineError};
use crate::progress::ProgressState;
use crate::session::{SessionController, SessionError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match &err {
            PipelineError::MissingField(field) => ApiError::validation(field, &err.to_string()),
            PipelineError::EntitlementRequired { .. } => ApiError::entitlement(&err.to_string()),
            PipelineError::Cancelled => ApiError::superseded(),
            PipelineError::Invariant(_) => ApiError::internal(&err.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Cancelled => ApiError::superseded(),
            SessionError::Pipeline(e) => e.into(),
            SessionError::Aborted(message) => ApiError::internal(&message),
        }
    }
}

/// POST /v1/plans - Generate a plan, superseding the caller's previous request.
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<CreatePlanRequest>, JsonRejection>,
) -> Result<Json<PlanResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(&e.body_text()))?;
    let caller = CallerIdentity::from_headers(&headers);

    let request = GenerationRequest::new(body.business_name, body.business_description)
        .with_tier(body.quality_tier)
        .authenticated(caller.authenticated);

    // A rejected request must not cancel the caller's running session.
    request.validate()?;

    let controller = state.controller_for(&caller.id);
    let handle = controller.start(request);
    let session_id = handle.id();
    let mut guard = CancelOnDisconnect {
        controller: Arc::clone(&controller),
        session_id,
        armed: true,
    };

    tracing::info!(
        caller = %caller.id,
        session_id = %session_id,
        tier = %body.quality_tier,
        "Plan generation requested"
    );

    let timeout_secs = state.config.server.request_timeout_seconds;
    let waited = tokio::time::timeout(Duration::from_secs(timeout_secs), handle.wait()).await;
    guard.armed = false;
    match waited {
        Ok(Ok(outcome)) => Ok(Json(PlanResponse::new(session_id.to_string(), outcome))),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => {
            controller.cancel_session(session_id);
            tracing::warn!(session_id = %session_id, timeout_secs, "Plan generation timed out");
            Err(ApiError::timeout(timeout_secs))
        }
    }
}

/// Cancels the session when the handler future is dropped before the
/// session finishes, i.e. the client went away.
struct CancelOnDisconnect {
    controller: Arc<SessionController>,
    session_id: Uuid,
    armed: bool,
}

impl Drop for CancelOnDisconnect {
    fn drop(&mut self) {
        if self.armed && self.controller.cancel_session(self.session_id) {
            tracing::info!(session_id = %self.session_id, "Client disconnected, session cancelled");
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub state: ProgressState,
}

/// GET /v1/plans/progress - Latest progress of the caller's session.
pub async fn progress(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<ProgressResponse> {
    let caller = CallerIdentity::from_headers(&headers);
    let response = match state.sessions.get(&caller.id) {
        Some(controller) => ProgressResponse {
            session_id: controller.active_session_id().map(|id| id.to_string()),
            state: controller.progress(),
        },
        None => ProgressResponse {
            session_id: None,
            state: ProgressState::default(),
        },
    };
    Json(response)
}

/// DELETE /v1/plans - Cancel the caller's running session.
pub async fn cancel(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<CancelResponse> {
    let caller = CallerIdentity::from_headers(&headers);
    let cancelled = state
        .sessions
        .get(&caller.id)
        .is_some_and(|controller| controller.cancel_active());
    Json(CancelResponse { cancelled })
}
