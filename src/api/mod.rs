//! HTTP shell for the operation surface
//!
//! The transport's only job is to deliver a validated, already-parsed
//! operation to the dispatcher: one POST route carrying an adjacently
//! tagged JSON document `{"operation": ..., "arguments": {...}}`.

pub mod health;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, ErrorCode};
use crate::ops::{self, Operation, OperationOutput};
use crate::state::AppState;

const BODY_LIMIT_BYTES: usize = 50 * 1024 * 1024;

/// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/operation", post(execute))
        .fallback(unknown_route)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /api/operation
async fn execute(
    State(state): State<AppState>,
    payload: Result<Json<Operation>, JsonRejection>,
) -> Result<Json<OperationOutput>, AppError> {
    let Json(op) = payload
        .map_err(|rejection| AppError::with_message(ErrorCode::ValidationFailed, rejection.body_text()))?;
    let output = ops::dispatch(&state, op).await?;
    Ok(Json(output))
}

async fn unknown_route() -> AppError {
    AppError::new(ErrorCode::NotFound)
}
