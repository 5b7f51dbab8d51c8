//! Entity extraction endpoint.

use super::types::{ApiError, ExtractRequest};
use crate::extract::{extract_entities, EntityList};
use axum::{extract::rejection::JsonRejection, Json};

/// POST /v1/extract - Extract entities of one kind from free text.
pub async fn handle(
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<EntityList>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(&e.body_text()))?;
    let list = extract_entities(request.kind, &request.text);
    tracing::debug!(
        kind = %request.kind,
        source = list.source().label(),
        count = list.len(),
        "Entities extracted"
    );
    Ok(Json(list))
}
