use axum::extract::State;
use axum::http::StatusCode;

use super::error::{ApiError, ApiResult};
use super::extract::{Json, Path};
use super::AppState;
use crate::models::*;

/// Latest validation for the idea given in the path.
pub async fn get_latest_validation(
    State(state): State<AppState>,
    Path(idea_id): Path<i64>,
) -> ApiResult<Json<Validation>> {
    state
        .db
        .get_latest_validation(idea_id)?
        .map(Json)
        .ok_or(ApiError::NotFound("Validation"))
}

pub async fn create_validation(
    State(state): State<AppState>,
    Json(input): Json<CreateValidationInput>,
) -> ApiResult<(StatusCode, Json<Validation>)> {
    let idea_id = input.idea_id;
    let validation = state
        .db
        .create_validation(input)?
        .ok_or(ApiError::NotFound("Idea"))?;
    tracing::info!("Created validation {} for idea {}", validation.id, idea_id);
    Ok((StatusCode::CREATED, Json(validation)))
}

pub async fn update_validation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateValidationInput>,
) -> ApiResult<Json<Validation>> {
    let validation = state
        .db
        .update_validation(id, input)?
        .ok_or(ApiError::NotFound("Validation"))?;
    tracing::info!("Updated validation {}", id);
    Ok(Json(validation))
}

pub async fn delete_validation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !state.db.delete_validation(id)? {
        return Err(ApiError::NotFound("Validation"));
    }
    tracing::info!("Deleted validation {}", id);
    Ok(StatusCode::NO_CONTENT)
}
