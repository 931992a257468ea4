pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/skills", get(handlers::handle_list_skills))
        .route("/api/v1/profile", post(handlers::handle_build_profile))
        .route("/api/v1/matches", post(handlers::handle_match))
        .route(
            "/api/v1/matches/summary",
            post(handlers::handle_match_summary),
        )
        .route("/api/v1/matches/rank", post(handlers::handle_rank))
        .with_state(state)
}
