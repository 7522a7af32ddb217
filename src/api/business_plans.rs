use axum::extract::State;
use axum::http::StatusCode;

use super::error::{ApiError, ApiResult};
use super::extract::{Json, Path};
use super::AppState;
use crate::models::*;

pub async fn get_latest_business_plan(
    State(state): State<AppState>,
    Path(idea_id): Path<i64>,
) -> ApiResult<Json<BusinessPlan>> {
    state
        .db
        .get_latest_business_plan(idea_id)?
        .map(Json)
        .ok_or(ApiError::NotFound("Business plan"))
}

pub async fn create_business_plan(
    State(state): State<AppState>,
    Json(input): Json<CreateBusinessPlanInput>,
) -> ApiResult<(StatusCode, Json<BusinessPlan>)> {
    let idea_id = input.idea_id;
    let plan = state
        .db
        .create_business_plan(input)?
        .ok_or(ApiError::NotFound("Idea"))?;
    tracing::info!("Created business plan {} for idea {}", plan.id, idea_id);
    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn update_business_plan(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateBusinessPlanInput>,
) -> ApiResult<Json<BusinessPlan>> {
    let plan = state
        .db
        .update_business_plan(id, input)?
        .ok_or(ApiError::NotFound("Business plan"))?;
    tracing::info!("Updated business plan {}", id);
    Ok(Json(plan))
}

pub async fn delete_business_plan(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !state.db.delete_business_plan(id)? {
        return Err(ApiError::NotFound("Business plan"));
    }
    tracing::info!("Deleted business plan {}", id);
    Ok(StatusCode::NO_CONTENT)
}
