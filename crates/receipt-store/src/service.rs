//! # Receipt Service
//!
//! The two entry points a transport layer needs: `submit` and `lookup`.
//!
//! ## Submit Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit(submission)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Validator::parse ── invalid ──► StoreError::Validation (nothing kept)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  scorer::points_for ── overflow ──► StoreError::Internal (nothing kept) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReceiptStore::create_scored ──► ReceiptId, final points, one write     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(ReceiptId)                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use receipt_core::{PointsResponse, ReceiptId, ReceiptSubmission, Validator};
use tracing::debug;

use crate::error::StoreResult;
use crate::memory::ReceiptStore;
use crate::scorer::{points_for, Scorer};

/// Facade over validation, storage and scoring.
///
/// ## Usage
/// ```rust
/// use receipt_core::types::{ItemSubmission, ReceiptSubmission};
/// use receipt_store::ReceiptService;
///
/// let service = ReceiptService::default();
/// let id = service
///     .submit(&ReceiptSubmission {
///         retailer: Some("Target".into()),
///         purchase_date: Some("2022-01-01".into()),
///         purchase_time: Some("13:01".into()),
///         items: Some(vec![ItemSubmission::new("Pepsi - 12-oz", "1.25")]),
///         total: Some("1.25".into()),
///     })
///     .unwrap();
///
/// assert_eq!(service.lookup(&id).unwrap().unwrap().points, 37);
/// ```
#[derive(Debug, Default)]
pub struct ReceiptService {
    store: ReceiptStore,
    validator: Validator,
}

impl ReceiptService {
    pub fn new(validator: Validator) -> Self {
        ReceiptService {
            store: ReceiptStore::new(),
            validator,
        }
    }

    /// Validates, stores and scores a receipt.
    ///
    /// A rejected or unscorable submission never reaches the store and
    /// never gets an id. Points are computed before the insert, so a
    /// concurrent `lookup` never sees the receipt without its points.
    pub fn submit(&self, submission: &ReceiptSubmission) -> StoreResult<ReceiptId> {
        let receipt = self.validator.parse(submission)?;
        let points = points_for(&receipt)?;

        let id = self.store.create_scored(receipt, points)?;

        debug!(id = %id, points, "Receipt submitted");
        Ok(id)
    }

    /// Points for a previously submitted receipt, `None` if the id is unknown.
    pub fn lookup(&self, id: &ReceiptId) -> StoreResult<Option<PointsResponse>> {
        Ok(self
            .store
            .get(id)?
            .map(|record| PointsResponse {
                points: record.points,
            }))
    }

    /// Recomputes the points for an existing receipt.
    pub fn rescore(&self, id: &ReceiptId) -> StoreResult<PointsResponse> {
        self.scorer().score(id)
    }

    pub fn store(&self) -> &ReceiptStore {
        &self.store
    }

    fn scorer(&self) -> Scorer<'_> {
        Scorer::new(&self.store)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use proptest::prelude::*;
    use receipt_core::rules::calculate_points;
    use receipt_core::types::ItemSubmission;
    use receipt_core::validation::parse_receipt;
    use receipt_core::ValidationOptions;
    use std::sync::Arc;
    use std::thread;

    fn target() -> ReceiptSubmission {
        ReceiptSubmission {
            retailer: Some("Target".to_string()),
            purchase_date: Some("2022-01-01".to_string()),
            purchase_time: Some("13:01".to_string()),
            items: Some(vec![ItemSubmission::new("Pepsi - 12-oz", "1.25")]),
            total: Some("1.25".to_string()),
        }
    }

    #[test]
    fn test_submit_then_lookup() {
        let service = ReceiptService::default();
        let id = service.submit(&target()).unwrap();

        assert_eq!(
            service.lookup(&id).unwrap(),
            Some(PointsResponse { points: 37 })
        );
    }

    #[test]
    fn test_invalid_submission_is_not_stored() {
        let service = ReceiptService::default();
        let mut submission = target();
        submission.items = Some(vec![ItemSubmission::new("Pepsi - 12-oz", "2.5")]);

        let err = service.submit(&submission).unwrap_err();
        match err {
            StoreError::Validation(report) => {
                assert_eq!(report.errors()[0].field(), "items[0].price");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(service.store().is_empty().unwrap());
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        let service = ReceiptService::default();
        service.submit(&target()).unwrap();

        let unknown = ReceiptId::parse("7fb1377b-b223-49d9-a31a-5a02701dd310").unwrap();
        assert_eq!(service.lookup(&unknown).unwrap(), None);
    }

    #[test]
    fn test_zero_point_receipt_is_still_found() {
        let service = ReceiptService::default();
        let id = service
            .submit(&ReceiptSubmission {
                retailer: Some("&&&".to_string()),
                purchase_date: Some("2022-01-02".to_string()),
                purchase_time: Some("09:00".to_string()),
                items: Some(vec![ItemSubmission::new("ab", "1.01")]),
                total: Some("1.01".to_string()),
            })
            .unwrap();

        assert_eq!(
            service.lookup(&id).unwrap(),
            Some(PointsResponse { points: 0 })
        );
    }

    #[test]
    fn test_rescore_matches_submission() {
        let service = ReceiptService::default();
        let id = service.submit(&target()).unwrap();

        assert_eq!(service.rescore(&id).unwrap().points, 37);
        assert_eq!(service.rescore(&id).unwrap().points, 37);
    }

    #[test]
    fn test_validator_options_are_honoured() {
        let service = ReceiptService::new(Validator::new(ValidationOptions {
            require_total_matches_items: true,
        }));
        let mut submission = target();
        submission.total = Some("5.00".to_string());

        assert!(matches!(
            service.submit(&submission),
            Err(StoreError::Validation(_))
        ));
        assert!(service.submit(&target()).is_ok());
    }

    #[test]
    fn test_unscorable_submission_is_not_stored() {
        let service = ReceiptService::default();
        let mut submission = target();
        submission.items = Some(vec![
            ItemSubmission::new("abc", "92233720368547758.07");
            1001
        ]);

        assert!(matches!(
            service.submit(&submission),
            Err(StoreError::Internal(_))
        ));
        assert!(service.store().is_empty().unwrap());
    }

    #[test]
    fn test_submit_inserts_final_points() {
        let service = ReceiptService::default();
        let id = service.submit(&target()).unwrap();

        // Stored as scored: no separate update pass is needed.
        let record = service.store().get(&id).unwrap().unwrap();
        assert_eq!(record.points, 37);
    }

    #[test]
    fn test_concurrent_submit_and_lookup() {
        let service = Arc::new(ReceiptService::default());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let id = service.submit(&target()).unwrap();
                        assert_eq!(
                            service.lookup(&id).unwrap(),
                            Some(PointsResponse { points: 37 })
                        );
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(service.store().len().unwrap(), 200);
    }

    fn amount() -> impl Strategy<Value = String> {
        (0u32..500, 0u32..100).prop_map(|(d, c)| format!("{d}.{c:02}"))
    }

    fn valid_submission() -> impl Strategy<Value = ReceiptSubmission> {
        (
            "[A-Za-z0-9&' -]{0,20}[A-Za-z0-9]",
            1u32..=28,
            0u32..24,
            0u32..60,
            prop::collection::vec(("[A-Za-z0-9 -]{1,12}[A-Za-z]", amount()), 1..6),
            amount(),
        )
            .prop_map(|(retailer, day, hour, minute, items, total)| ReceiptSubmission {
                retailer: Some(retailer),
                purchase_date: Some(format!("2022-06-{day:02}")),
                purchase_time: Some(format!("{hour:02}:{minute:02}")),
                items: Some(
                    items
                        .into_iter()
                        .map(|(d, p)| ItemSubmission::new(d, p))
                        .collect(),
                ),
                total: Some(total),
            })
    }

    proptest! {
        #[test]
        fn prop_lookup_equals_independent_rules(submission in valid_submission()) {
            let service = ReceiptService::default();
            let id = service.submit(&submission).unwrap();

            let expected = calculate_points(&parse_receipt(&submission).unwrap())
                .unwrap()
                .total();
            prop_assert_eq!(service.lookup(&id).unwrap(), Some(PointsResponse { points: expected }));
        }

        #[test]
        fn prop_rescoring_is_stable(submission in valid_submission(), times in 1usize..5) {
            let service = ReceiptService::default();
            let id = service.submit(&submission).unwrap();
            let first = service.lookup(&id).unwrap();

            for _ in 0..times {
                prop_assert_eq!(Some(service.rescore(&id).unwrap()), first);
            }
        }

        #[test]
        fn prop_invalid_submissions_never_stored(
            submission in valid_submission(),
            which in 0usize..5,
        ) {
            let mut broken = submission;
            match which {
                0 => broken.retailer = Some("   ".to_string()),
                1 => broken.purchase_date = Some("2022-02-30".to_string()),
                2 => broken.purchase_time = Some("24:00".to_string()),
                3 => broken.items = Some(vec![]),
                _ => broken.total = None,
            }

            let service = ReceiptService::default();
            prop_assert!(matches!(service.submit(&broken), Err(StoreError::Validation(_))));
            prop_assert!(service.store().is_empty().unwrap());
        }
    }
}
