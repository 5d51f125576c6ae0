//! # Error Types
//!
//! Domain-specific error types for receipt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  receipt-core errors (this file)                                        │
//! │  ├── CoreError         - General domain errors                          │
//! │  ├── ValidationReport  - Every problem found on one receipt             │
//! │  └── ValidationError   - A single field failure                         │
//! │                                                                         │
//! │  receipt-store errors (separate crate)                                  │
//! │  └── StoreError        - Lookup / scoring failures                      │
//! │                                                                         │
//! │  HTTP errors (in app)                                                   │
//! │  └── ApiError          - What clients see (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → ValidationReport → StoreError → ApiError      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in every message (`items[2].price`)
//! 3. Validation accumulates; it never stops at the first failure

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The receipt failed one or more checks.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationReport),

    /// A receipt identifier was blank.
    #[error("Invalid receipt id: {0:?}")]
    InvalidReceiptId(String),

    /// A rule, or the sum of all rules, does not fit in a `u64`.
    #[error("Points overflow while applying rule: {rule}")]
    PointsOverflow { rule: &'static str },
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field failure on a submitted receipt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing, or blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// The field is present but not in the expected shape.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A list that must have at least one element is empty.
    #[error("{field} must contain at least one item")]
    Empty { field: String },

    /// Optional check: the total disagrees with the item prices.
    #[error("total {total} does not match the sum of item prices {items_sum}")]
    TotalMismatch { total: Money, items_sum: Money },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the field this failure is about.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Empty { field } => field,
            ValidationError::TotalMismatch { .. } => "total",
        }
    }
}

// =============================================================================
// Validation Report
// =============================================================================

/// Outcome of validating one receipt: every failure, in check order.
///
/// ## Why Not `Result<(), ValidationError>`?
/// A client fixing a receipt wants to see all problems at once,
/// not one per round trip.
///
/// ```rust
/// use receipt_core::error::{ValidationError, ValidationReport};
///
/// let mut report = ValidationReport::default();
/// assert!(report.is_valid());
///
/// report.push(ValidationError::required("retailer"));
/// assert!(!report.is_valid());
/// assert_eq!(report.messages(), vec!["retailer is required".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("receipt is invalid ({} problem(s))", .errors.len())]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// True when no check failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records a failure.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// All failures, in the order the checks ran.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Human-readable messages, one per failure.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("retailer").to_string(),
            "retailer is required"
        );
        assert_eq!(
            ValidationError::invalid_format("items[0].price", "expected 0.00").to_string(),
            "items[0].price has invalid format: expected 0.00"
        );
        assert_eq!(
            ValidationError::Empty {
                field: "items".to_string()
            }
            .to_string(),
            "items must contain at least one item"
        );
        assert_eq!(
            ValidationError::TotalMismatch {
                total: Money::from_cents(900),
                items_sum: Money::from_cents(875),
            }
            .to_string(),
            "total $9.00 does not match the sum of item prices $8.75"
        );
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(ValidationError::required("total").field(), "total");
        assert_eq!(
            ValidationError::invalid_format("items[3].price", "x").field(),
            "items[3].price"
        );
    }

    #[test]
    fn test_report_accumulates_in_order() {
        let mut report = ValidationReport::default();
        report.push(ValidationError::required("retailer"));
        report.push(ValidationError::required("total"));

        assert!(!report.is_valid());
        assert_eq!(report.errors().len(), 2);
        assert_eq!(report.errors()[0].field(), "retailer");
        assert_eq!(report.errors()[1].field(), "total");
        assert_eq!(report.to_string(), "receipt is invalid (2 problem(s))");
    }

    #[test]
    fn test_report_converts_to_core_error() {
        let core_err: CoreError = ValidationReport::default().into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_overflow_message_names_rule() {
        let err = CoreError::PointsOverflow {
            rule: "description length",
        };
        assert_eq!(
            err.to_string(),
            "Points overflow while applying rule: description length"
        );
    }
}
