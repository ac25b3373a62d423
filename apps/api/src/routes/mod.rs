pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze/trip", post(handlers::handle_analyze_trip))
        .route(
            "/api/v1/analyze/decision",
            post(handlers::handle_analyze_decision),
        )
        .with_state(state)
}
