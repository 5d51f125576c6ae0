//! # In-Memory Receipt Store
//!
//! Identifier-keyed map from [`ReceiptId`] to [`ReceiptRecord`].
//!
//! ## Lifecycle of a Record
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  create_scored(receipt, points) ──► { receipt, points } under a fresh  │
//! │                                     ReceiptId, in one write            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  update(id, points) ──► points overwritten (scorer, repeatable)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  get(id) ──► cloned record, any number of times                        │
//! │                                                                         │
//! │  No delete, no expiry: records live as long as the store.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! A single `RwLock` guards the whole map. Every operation takes the lock
//! once, so no caller ever observes a half-written record. A poisoned lock
//! is reported as [`StoreError::Internal`].

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use receipt_core::{Receipt, ReceiptId, ReceiptRecord};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// In-memory receipt store.
///
/// ## Usage
/// ```rust
/// use receipt_store::ReceiptStore;
/// # use receipt_core::types::{ItemSubmission, ReceiptSubmission};
/// # use receipt_core::validation::parse_receipt;
/// # let receipt = parse_receipt(&ReceiptSubmission {
/// #     retailer: Some("Target".into()),
/// #     purchase_date: Some("2022-01-01".into()),
/// #     purchase_time: Some("13:01".into()),
/// #     items: Some(vec![ItemSubmission::new("Pepsi - 12-oz", "1.25")]),
/// #     total: Some("1.25".into()),
/// # }).unwrap();
///
/// let store = ReceiptStore::new();
/// let id = store.create(receipt).unwrap();
///
/// assert_eq!(store.get(&id).unwrap().unwrap().points, 0);
/// store.update(&id, 37).unwrap();
/// assert_eq!(store.get(&id).unwrap().unwrap().points, 37);
/// ```
#[derive(Debug, Default)]
pub struct ReceiptStore {
    records: RwLock<HashMap<ReceiptId, ReceiptRecord>>,
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Internal("receipt store lock poisoned".to_string())
}

impl ReceiptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `{ receipt, points: 0 }` under a freshly generated identifier.
    pub fn create(&self, receipt: Receipt) -> StoreResult<ReceiptId> {
        self.create_scored(receipt, 0)
    }

    /// Inserts an already scored receipt under a freshly generated
    /// identifier. The record becomes visible with its final points.
    pub fn create_scored(&self, receipt: Receipt, points: u64) -> StoreResult<ReceiptId> {
        let mut records = self.records.write().map_err(poisoned)?;

        let mut id = ReceiptId::generate();
        while records.contains_key(&id) {
            id = ReceiptId::generate();
        }

        records.insert(id.clone(), ReceiptRecord { receipt, points });
        debug!(id = %id, points, count = records.len(), "Receipt stored");

        Ok(id)
    }

    /// Returns a copy of the record, or `None` for an unknown identifier.
    pub fn get(&self, id: &ReceiptId) -> StoreResult<Option<ReceiptRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(id).cloned())
    }

    /// Overwrites the points of an existing record.
    pub fn update(&self, id: &ReceiptId, points: u64) -> StoreResult<()> {
        let mut records = self.records.write().map_err(poisoned)?;

        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id))?;
        record.points = points;

        debug!(id = %id, points, "Receipt points updated");
        Ok(())
    }

    /// Number of stored receipts.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Drops every record. Intended for tests.
    pub fn clear(&self) -> StoreResult<()> {
        self.records.write().map_err(poisoned)?.clear();
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_core::types::{ItemSubmission, ReceiptSubmission};
    use receipt_core::validation::parse_receipt;
    use std::sync::Arc;
    use std::thread;

    fn sample_receipt() -> Receipt {
        parse_receipt(&ReceiptSubmission {
            retailer: Some("Walgreens".to_string()),
            purchase_date: Some("2022-01-02".to_string()),
            purchase_time: Some("08:13".to_string()),
            items: Some(vec![
                ItemSubmission::new("Pepsi - 12-oz", "1.25"),
                ItemSubmission::new("Dasani", "1.40"),
            ]),
            total: Some("2.65".to_string()),
        })
        .unwrap()
    }

    #[test]
    fn test_create_starts_at_zero_points() {
        let store = ReceiptStore::new();
        let id = store.create(sample_receipt()).unwrap();

        let record = store.get(&id).unwrap().unwrap();
        assert_eq!(record.points, 0);
        assert_eq!(record.receipt, sample_receipt());
    }

    #[test]
    fn test_create_scored_keeps_points() {
        let store = ReceiptStore::new();
        let id = store.create_scored(sample_receipt(), 15).unwrap();

        let record = store.get(&id).unwrap().unwrap();
        assert_eq!(record.points, 15);
        assert_eq!(record.receipt, sample_receipt());
    }

    #[test]
    fn test_create_issues_distinct_ids() {
        let store = ReceiptStore::new();
        let a = store.create(sample_receipt()).unwrap();
        let b = store.create(sample_receipt()).unwrap();

        assert_ne!(a, b);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_get_unknown_is_none() {
        let store = ReceiptStore::new();
        let id = ReceiptId::parse("never-issued").unwrap();
        assert!(store.get(&id).unwrap().is_none());
    }

    #[test]
    fn test_update_overwrites() {
        let store = ReceiptStore::new();
        let id = store.create(sample_receipt()).unwrap();

        store.update(&id, 15).unwrap();
        store.update(&id, 42).unwrap();
        assert_eq!(store.get(&id).unwrap().unwrap().points, 42);
    }

    #[test]
    fn test_update_unknown_is_not_found() {
        let store = ReceiptStore::new();
        let id = ReceiptId::parse("missing").unwrap();

        let err = store.update(&id, 1).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_clear_resets() {
        let store = ReceiptStore::new();
        let id = store.create(sample_receipt()).unwrap();

        store.clear().unwrap();
        assert!(store.is_empty().unwrap());
        assert!(store.get(&id).unwrap().is_none());
    }

    #[test]
    fn test_concurrent_creates() {
        let store = Arc::new(ReceiptStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..25 {
                        store.create(sample_receipt()).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len().unwrap(), 200);
    }
}
