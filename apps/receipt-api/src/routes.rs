//! # HTTP Routes
//!
//! ```text
//! POST /receipts/process       ReceiptSubmission  → { "id": "..." }
//! GET  /receipts/{id}/points                      → { "points": N }
//! GET  /health                                    → "OK"
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use receipt_core::{PointsResponse, ProcessReceiptResponse, ReceiptId, ReceiptSubmission};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/{id}/points", get(get_points))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health - Liveness check.
async fn health_check() -> impl IntoResponse {
    "OK"
}

/// POST /receipts/process - Validate, store and score a receipt.
async fn process_receipt(
    State(state): State<AppState>,
    payload: Result<Json<ReceiptSubmission>, JsonRejection>,
) -> Result<Json<ProcessReceiptResponse>, ApiError> {
    let Json(submission) = payload.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "Rejected unreadable receipt body");
        ApiError::from(rejection)
    })?;

    let id = state.service.submit(&submission).map_err(|e| {
        if let receipt_store::StoreError::Validation(report) = &e {
            warn!(problems = report.errors().len(), "Rejected invalid receipt");
        }
        ApiError::from(e)
    })?;

    info!(id = %id, "Receipt processed");
    Ok(Json(ProcessReceiptResponse { id }))
}

/// GET /receipts/{id}/points - Points for a processed receipt.
async fn get_points(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    let id = ReceiptId::parse(&raw_id)?;

    match state.service.lookup(&id)? {
        Some(points) => Ok(Json(points)),
        None => {
            info!(id = %id, "No receipt found for id");
            Err(ApiError::receipt_not_found())
        }
    }
}
