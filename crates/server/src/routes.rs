use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod index;
pub mod teachers;

#[utoipa::path(get, path = "/health", tag = "ops", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: teacher routes, listing page, health
/// and the OpenAPI document.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/show_teachers", get(teachers::show_teachers))
        .route("/add_teacher", post(teachers::add_teacher))
        .route("/delete_teacher/:id", delete(teachers::delete_teacher))
        .route("/update_teacher/:id", put(teachers::update_teacher))
        .route("/search_teachers/:name", get(teachers::search_teachers))
        .route("/filtered_criteria", get(teachers::filtered_criteria));

    let pages = Router::new()
        .route("/", get(index::index))
        .route("/health", get(health));

    pages
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
