use axum::extract::State;
use axum::http::StatusCode;

use super::error::{require_percentage, require_text, ApiError, ApiResult};
use super::extract::{Json, Path};
use super::AppState;
use crate::models::*;

pub async fn list_implementation_items(
    State(state): State<AppState>,
    Path(idea_id): Path<i64>,
) -> ApiResult<Json<Vec<ImplementationItem>>> {
    let items = state.db.list_implementation_items(idea_id)?;
    tracing::debug!("Listing {} implementation items for idea {}", items.len(), idea_id);
    Ok(Json(items))
}

pub async fn get_implementation_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ImplementationItem>> {
    state
        .db
        .get_implementation_item(id)?
        .map(Json)
        .ok_or(ApiError::NotFound("Implementation item"))
}

pub async fn create_implementation_item(
    State(state): State<AppState>,
    Json(input): Json<CreateImplementationItemInput>,
) -> ApiResult<(StatusCode, Json<ImplementationItem>)> {
    require_text("itemType", &input.item_type)?;
    require_text("name", &input.name)?;
    require_percentage(input.completion_percentage)?;

    let idea_id = input.idea_id;
    let item = state
        .db
        .create_implementation_item(input)?
        .ok_or(ApiError::NotFound("Idea"))?;
    tracing::info!("Created implementation item {} for idea {}", item.id, idea_id);
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_implementation_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateImplementationItemInput>,
) -> ApiResult<Json<ImplementationItem>> {
    require_text("itemType", &input.item_type)?;
    require_text("name", &input.name)?;
    require_percentage(input.completion_percentage)?;

    let item = state
        .db
        .update_implementation_item(id, input)?
        .ok_or(ApiError::NotFound("Implementation item"))?;
    tracing::info!("Updated implementation item {}", id);
    Ok(Json(item))
}

pub async fn delete_implementation_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !state.db.delete_implementation_item(id)? {
        return Err(ApiError::NotFound("Implementation item"));
    }
    tracing::info!("Deleted implementation item {}", id);
    Ok(StatusCode::NO_CONTENT)
}
