pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ranking::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/extract-criteria",
            post(handlers::handle_extract_criteria),
        )
        .route(
            "/api/v1/score-resumes",
            post(handlers::handle_score_resumes),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
