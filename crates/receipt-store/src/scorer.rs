//! # Scorer
//!
//! Runs the full rule set over a receipt and keeps the stored points in
//! step with the result.
//!
//! ```text
//! score(id)
//!    │
//!    ├── store.get(id) ──── None ──► StoreError::NotFound
//!    │
//!    ├── points_for(&record.receipt)   (pure, receipt-core)
//!    │        └── overflow ──► StoreError::Internal
//!    │
//!    ├── store.update(id, total)
//!    │
//!    └── PointsResponse { points: total }
//! ```
//!
//! Scoring the same identifier again repeats the computation and
//! overwrites the stored points with the same value.

use receipt_core::{calculate_points, PointsResponse, Receipt, ReceiptId};
use tracing::{debug, error};

use crate::error::{StoreError, StoreResult};
use crate::memory::ReceiptStore;

/// Total points for `receipt`, with each rule's share logged at debug.
///
/// A receipt whose points do not fit in a `u64` is reported as
/// [`StoreError::Internal`]; callers never see a wrapped or partial total.
pub fn points_for(receipt: &Receipt) -> StoreResult<u64> {
    let breakdown = calculate_points(receipt).map_err(|e| {
        error!(retailer = %receipt.retailer, items = receipt.items.len(), "{e}");
        StoreError::Internal(e.to_string())
    })?;

    for contribution in breakdown.contributions() {
        debug!(
            rule = contribution.rule.label(),
            points = contribution.points,
            "Rule applied"
        );
    }

    Ok(breakdown.total())
}

/// Scores records held in a [`ReceiptStore`].
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    store: &'a ReceiptStore,
}

impl<'a> Scorer<'a> {
    pub fn new(store: &'a ReceiptStore) -> Self {
        Scorer { store }
    }

    /// Recomputes and stores the points for `id`.
    pub fn score(&self, id: &ReceiptId) -> StoreResult<PointsResponse> {
        let record = self
            .store
            .get(id)?
            .ok_or_else(|| StoreError::not_found(id))?;

        let points = points_for(&record.receipt)?;
        self.store.update(id, points)?;
        debug!(id = %id, points, "Receipt scored");

        Ok(PointsResponse { points })
    }
}
