//! Request and response bodies for the HTTP API.

use crate::completion::QualityTier;
use crate::extract::EntityKind;
use crate::plan::{BusinessPlanDocument, GenerationOutcome, SectionWarning};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/plans`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePlanRequest {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub business_description: String,
    #[serde(default)]
    pub quality_tier: QualityTier,
}

/// Body returned by `POST /v1/plans`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub session_id: String,
    pub document: BusinessPlanDocument,
    pub warnings: Vec<SectionWarning>,
    pub markdown: String,
}

impl PlanResponse {
    pub fn new(session_id: String, outcome: GenerationOutcome) -> Self {
        Self {
            session_id,
            markdown: outcome.document.to_markdown(),
            document: outcome.document,
            warnings: outcome.warnings,
        }
    }
}

/// Body of `POST /v1/extract`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractRequest {
    pub kind: EntityKind,
    #[serde(default)]
    pub text: String,
}

/// Body returned by `DELETE /v1/plans`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

/// Error envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    fn new(message: impl Into<String>, r#type: &str, param: Option<&str>, code: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.into(),
                r#type: r#type.to_string(),
                param: param.map(str::to_string),
                code: Some(code.to_string()),
            },
        }
    }

    /// Malformed request (400).
    pub fn bad_request(message: &str) -> Self {
        Self::new(message, "invalid_request_error", None, "invalid_request_error")
    }

    /// A required field is missing or blank (422).
    pub fn validation(field: &str, message: &str) -> Self {
        Self::new(message, "invalid_request_error", Some(field), "validation_error")
    }

    /// The caller may not use the requested tier (403).
    pub fn entitlement(message: &str) -> Self {
        Self::new(
            message,
            "permission_error",
            Some("quality_tier"),
            "entitlement_required",
        )
    }

    /// A newer request from the same caller replaced this one (409).
    pub fn superseded() -> Self {
        Self::new(
            "Generation was cancelled or superseded by a newer request",
            "conflict_error",
            None,
            "superseded",
        )
    }

    /// The whole build exceeded the server's request timeout (504).
    pub fn timeout(seconds: u64) -> Self {
        Self::new(
            format!("Plan generation exceeded {seconds}s"),
            "server_error",
            None,
            "gateway_timeout",
        )
    }

    /// Unexpected failure (500).
    pub fn internal(message: &str) -> Self {
        Self::new(message, "server_error", None, "internal_error")
    }

    fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("invalid_request_error") => StatusCode::BAD_REQUEST,
            Some("validation_error") => StatusCode::UNPROCESSABLE_ENTITY,
            Some("entitlement_required") => StatusCode::FORBIDDEN,
            Some("superseded") => StatusCode::CONFLICT,
            Some("gateway_timeout") => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
