use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::configuration::{Configuration, ConfigurationFacts, ConfigurationPatch};
use crate::state::AppState;

/// GET /api/v1/configurations
pub async fn handle_list_configurations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Configuration>>, AppError> {
    Ok(Json(state.configurations.list().await?))
}

/// POST /api/v1/configurations
///
/// Every save is a new version; existing snapshots are never rewritten here.
pub async fn handle_create_configuration(
    State(state): State<AppState>,
    AppJson(facts): AppJson<ConfigurationFacts>,
) -> Result<(StatusCode, Json<Configuration>), AppError> {
    let created = state.configurations.create(facts).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/configurations/latest
pub async fn handle_latest_configuration(
    State(state): State<AppState>,
) -> Result<Json<Configuration>, AppError> {
    let latest = state
        .configurations
        .latest()
        .await?
        .ok_or_else(|| AppError::NotFound("No configuration has been saved".to_string()))?;
    Ok(Json(latest))
}

/// GET /api/v1/configurations/:id
pub async fn handle_get_configuration(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Configuration>, AppError> {
    let configuration = state
        .configurations
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Configuration {id} not found")))?;
    Ok(Json(configuration))
}

/// PATCH /api/v1/configurations/:id
///
/// In-place update: merges the given fact groups, keeps the id.
pub async fn handle_update_configuration(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    AppJson(patch): AppJson<ConfigurationPatch>,
) -> Result<Json<Configuration>, AppError> {
    let updated = state
        .configurations
        .update(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Configuration {id} not found")))?;
    Ok(Json(updated))
}
