//! # Domain Types
//!
//! Core domain types used throughout Receipt Points.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Wire (unvalidated)          Validated                 Stored           │
//! │  ┌──────────────────┐        ┌─────────────────┐       ┌──────────────┐ │
//! │  │ReceiptSubmission │──────► │    Receipt      │─────► │ReceiptRecord │ │
//! │  │  retailer?       │validate│  retailer       │ store │  receipt     │ │
//! │  │  purchaseDate?   │        │  NaiveDate      │       │  points      │ │
//! │  │  purchaseTime?   │        │  NaiveTime      │       └──────────────┘ │
//! │  │  items?          │        │  Vec<Item>      │              ▲         │
//! │  │  total?          │        │  Money          │              │         │
//! │  └──────────────────┘        └─────────────────┘         ReceiptId      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only [`crate::validation`] builds a [`Receipt`]; everything downstream of
//! it can rely on the fields being well-formed.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Wire Types
// =============================================================================

/// A receipt exactly as submitted by a client.
///
/// Every field is optional so that a missing field becomes a validation
/// message instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptSubmission {
    pub retailer: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_time: Option<String>,
    pub items: Option<Vec<ItemSubmission>>,
    pub total: Option<String>,
}

/// One line item as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemSubmission {
    pub short_description: Option<String>,
    pub price: Option<String>,
}

impl ItemSubmission {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        ItemSubmission {
            short_description: Some(short_description.into()),
            price: Some(price.into()),
        }
    }
}

// =============================================================================
// Validated Types
// =============================================================================

/// A purchased item that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Description as submitted (not trimmed; rules trim when they need to).
    pub short_description: String,

    /// Price in cents.
    pub price: Money,
}

/// A receipt that passed validation.
///
/// ## Invariants
/// - `retailer` is non-empty after trimming
/// - `items` has at least one element
/// - all amounts came from the strict `0.00` form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: NaiveDate,
    pub purchase_time: NaiveTime,
    pub items: Vec<Item>,
    pub total: Money,
}

// =============================================================================
// Identifier
// =============================================================================

/// Opaque identifier handed out for an accepted receipt.
///
/// Generated values are UUID v4 strings, but callers must not rely on
/// the shape; lookups accept any non-blank string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptId(String);

impl ReceiptId {
    /// Generates a fresh, globally unique identifier.
    pub fn generate() -> Self {
        ReceiptId(Uuid::new_v4().to_string())
    }

    /// Wraps a caller-supplied identifier, rejecting blank input.
    ///
    /// ```rust
    /// use receipt_core::ReceiptId;
    ///
    /// assert!(ReceiptId::parse("7fb1377b-b223-49d9-a31a-5a02701dd310").is_ok());
    /// assert!(ReceiptId::parse("   ").is_err());
    /// ```
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if raw.trim().is_empty() {
            return Err(CoreError::InvalidReceiptId(raw.to_string()));
        }
        Ok(ReceiptId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Stored Record
// =============================================================================

/// What the store keeps per identifier.
///
/// Accepted receipts are inserted with their computed points; rescoring
/// overwrites `points` with the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptRecord {
    pub receipt: Receipt,
    pub points: u64,
}

// =============================================================================
// Responses
// =============================================================================

/// Body returned after a receipt is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcessReceiptResponse {
    pub id: ReceiptId,
}

/// Body returned by a points lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PointsResponse {
    pub points: u64,
}

// =============================================================================
// Unit Tests
// =============================================================================
