//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde_json::Value;

use crate::analysis::decision::DecisionRequest;
use crate::analysis::run_analysis;
use crate::analysis::trip::TripRequest;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/analyze/trip
pub async fn handle_analyze_trip(
    State(state): State<AppState>,
    Json(request): Json<TripRequest>,
) -> Result<Json<Value>, AppError> {
    let result = run_analysis(&state.llm, &request).await?;
    Ok(Json(Value::Object(result)))
}

/// POST /api/v1/analyze/decision
pub async fn handle_analyze_decision(
    State(state): State<AppState>,
    Json(request): Json<DecisionRequest>,
) -> Result<Json<Value>, AppError> {
    let result = run_analysis(&state.llm, &request).await?;
    Ok(Json(Value::Object(result)))
}
