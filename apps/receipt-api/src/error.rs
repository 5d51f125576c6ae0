//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Receipt Points                         │
//! │                                                                         │
//! │  Handler: Result<Json<T>, ApiError>                                     │
//! │         │                                                               │
//! │         ├── JsonRejection          ──► 400 VALIDATION_ERROR             │
//! │         ├── StoreError::Validation ──► 400 VALIDATION_ERROR + errors[]  │
//! │         ├── CoreError (blank id)   ──► 400 VALIDATION_ERROR             │
//! │         ├── unknown id             ──► 404 NOT_FOUND                    │
//! │         └── StoreError::Internal   ──► 500 INTERNAL (details logged,    │
//! │                                         never returned)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! {
//!   "code": "VALIDATION_ERROR",
//!   "message": "The receipt is invalid.",
//!   "errors": ["items[0].price has invalid format: ..."]
//! }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use receipt_core::{CoreError, ValidationReport};
use receipt_store::StoreError;
use serde::Serialize;

pub const INVALID_RECEIPT_MESSAGE: &str = "The receipt is invalid.";
pub const RECEIPT_NOT_FOUND_MESSAGE: &str = "No receipt found for that ID.";
pub const INVALID_ID_MESSAGE: &str = "Missing or invalid receipt ID.";
pub const INTERNAL_MESSAGE: &str = "Server error.";

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Individual field failures, for validation errors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Creates a validation error carrying every field failure.
    pub fn invalid_receipt(report: &ValidationReport) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: INVALID_RECEIPT_MESSAGE.to_string(),
            errors: report.messages(),
        }
    }

    /// Creates the not found error for a receipt lookup.
    pub fn receipt_not_found() -> Self {
        ApiError::new(ErrorCode::NotFound, RECEIPT_NOT_FOUND_MESSAGE)
    }

    /// Creates an internal error with a generic message.
    pub fn internal() -> Self {
        ApiError::new(ErrorCode::Internal, INTERNAL_MESSAGE)
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(report) => ApiError::invalid_receipt(&report),
            StoreError::NotFound { .. } => ApiError::receipt_not_found(),
            StoreError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Internal store error: {}", e);
                ApiError::internal()
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(report) => ApiError::invalid_receipt(&report),
            CoreError::InvalidReceiptId(_) => {
                ApiError::new(ErrorCode::ValidationError, INVALID_ID_MESSAGE)
            }
            CoreError::PointsOverflow { rule } => {
                tracing::error!(rule, "Points overflow while scoring receipt");
                ApiError::internal()
            }
        }
    }
}

/// Malformed or mistyped JSON bodies are client errors too.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: INVALID_RECEIPT_MESSAGE.to_string(),
            errors: vec![rejection.body_text()],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}
