//! Axum route handlers for the Response API.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::response::ResponseRecord;
use crate::responder::generator::{generate_response, GenerateRequest, GeneratedResponse};
use crate::state::AppState;

/// POST /api/v1/responses/generate
///
/// Renders the prompt for the chosen (or latest) configuration, generates a
/// reply, and stores it. Returns the stored record plus analytics.
pub async fn handle_generate(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<Json<GeneratedResponse>, AppError> {
    let generated = generate_response(
        state.configurations.as_ref(),
        state.responses.as_ref(),
        state.generator.as_ref(),
        request,
    )
    .await?;
    Ok(Json(generated))
}

/// GET /api/v1/responses
pub async fn handle_list_responses(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResponseRecord>>, AppError> {
    Ok(Json(state.responses.list().await?))
}

/// GET /api/v1/responses/:id
pub async fn handle_get_response(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ResponseRecord>, AppError> {
    let record = state
        .responses
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Response {id} not found")))?;
    Ok(Json(record))
}
