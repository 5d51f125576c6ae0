//! # Store Error Types
//!
//! Error types for store, scorer, and service operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationReport (receipt-core)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds NotFound / Internal                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in receipt-api) ← Serialized for clients                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use receipt_core::{ReceiptId, ValidationReport};
use thiserror::Error;

/// Store and scoring errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the identifier.
    ///
    /// ## When This Occurs
    /// - Client looked up an id that was never issued
    /// - Scorer asked to score an id that was never created
    #[error("Receipt not found: {id}")]
    NotFound { id: ReceiptId },

    /// The submission failed validation; nothing was stored.
    #[error(transparent)]
    Validation(#[from] ValidationReport),

    /// Unexpected failure inside the store.
    ///
    /// ## When This Occurs
    /// - The map lock was poisoned by a panicking writer
    /// - A receipt's points do not fit in a `u64`
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn not_found(id: &ReceiptId) -> Self {
        StoreError::NotFound { id: id.clone() }
    }
}

/// Convenience type alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let id = ReceiptId::parse("abc-123").unwrap();
        assert_eq!(
            StoreError::not_found(&id).to_string(),
            "Receipt not found: abc-123"
        );
        assert_eq!(
            StoreError::Internal("lock poisoned".to_string()).to_string(),
            "Internal store error: lock poisoned"
        );
    }

    #[test]
    fn test_validation_converts() {
        let err: StoreError = ValidationReport::default().into();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
