mod business_plans;
pub mod error;
mod extract;
mod health;
mod ideas;
mod implementation_items;
mod validations;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::Database;

pub use error::{ApiError, ApiResult, ErrorResponse};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

pub fn create_router(db: Database) -> Router {
    let state = AppState { db };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::health_check))
        .merge(api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Ideas
        .route("/api/ideas", get(ideas::list_ideas).post(ideas::create_idea))
        .route(
            "/api/ideas/{id}",
            get(ideas::get_idea)
                .put(ideas::update_idea)
                .delete(ideas::delete_idea),
        )
        .route("/api/ideas/{id}/overview", get(ideas::get_idea_overview))
        // Validations: GET takes the idea id, PUT/DELETE the validation id
        .route("/api/validations", post(validations::create_validation))
        .route(
            "/api/validations/{id}",
            get(validations::get_latest_validation)
                .put(validations::update_validation)
                .delete(validations::delete_validation),
        )
        // Business plans: same id convention as validations
        .route(
            "/api/business-plans",
            post(business_plans::create_business_plan),
        )
        .route(
            "/api/business-plans/{id}",
            get(business_plans::get_latest_business_plan)
                .put(business_plans::update_business_plan)
                .delete(business_plans::delete_business_plan),
        )
        // Implementation items
        .route(
            "/api/implementation-items",
            post(implementation_items::create_implementation_item),
        )
        .route(
            "/api/implementation-items/{idea_id}",
            get(implementation_items::list_implementation_items),
        )
        .route(
            "/api/implementation-item/{id}",
            get(implementation_items::get_implementation_item)
                .put(implementation_items::update_implementation_item)
                .delete(implementation_items::delete_implementation_item),
        )
}
