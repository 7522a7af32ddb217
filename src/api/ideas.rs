use axum::extract::State;
use axum::http::StatusCode;

use super::error::{require_text, ApiError, ApiResult};
use super::extract::{Json, Path};
use super::AppState;
use crate::models::*;

pub async fn list_ideas(State(state): State<AppState>) -> ApiResult<Json<Vec<Idea>>> {
    let ideas = state.db.list_ideas()?;
    tracing::debug!("Listing {} active ideas", ideas.len());
    Ok(Json(ideas))
}

pub async fn get_idea(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Idea>> {
    state
        .db
        .get_idea(id)?
        .map(Json)
        .ok_or(ApiError::NotFound("Idea"))
}

pub async fn create_idea(
    State(state): State<AppState>,
    Json(input): Json<CreateIdeaInput>,
) -> ApiResult<(StatusCode, Json<Idea>)> {
    require_text("summary", &input.summary)?;
    require_text("description", &input.description)?;

    let idea = state.db.create_idea(input)?;
    tracing::info!("Created idea {}", idea.id);
    Ok((StatusCode::CREATED, Json(idea)))
}

pub async fn update_idea(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateIdeaInput>,
) -> ApiResult<Json<Idea>> {
    require_text("summary", &input.summary)?;
    require_text("description", &input.description)?;

    let idea = state
        .db
        .update_idea(id, input)?
        .ok_or(ApiError::NotFound("Idea"))?;
    tracing::info!("Updated idea {}", id);
    Ok(Json(idea))
}

pub async fn delete_idea(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !state.db.delete_idea(id)? {
        return Err(ApiError::NotFound("Idea"));
    }
    tracing::info!("Deleted idea {} and its records", id);
    Ok(StatusCode::NO_CONTENT)
}

/// The idea with its latest validation, latest plan and all implementation items.
pub async fn get_idea_overview(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<IdeaOverview>> {
    state
        .db
        .get_idea_overview(id)?
        .map(Json)
        .ok_or(ApiError::NotFound("Idea"))
}
