//! # Validation Module
//!
//! Turns a [`ReceiptSubmission`] into a [`Receipt`], or explains why not.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (axum Json extractor)                                   │
//! │  └── JSON syntax and field types                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── 1. retailer       present, non-blank                              │
//! │  ├── 2. purchaseDate   YYYY-MM-DD, real calendar date                  │
//! │  ├── 3. purchaseTime   HH:MM, 00-23 / 00-59                            │
//! │  ├── 4. items          non-empty, each with description + 0.00 price   │
//! │  ├── 5. total          0.00                                            │
//! │  └── 6. (optional)     total == sum(item prices)                       │
//! │                                                                         │
//! │  Every check runs; failures accumulate into one ValidationReport.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use receipt_core::types::{ItemSubmission, ReceiptSubmission};
//! use receipt_core::validation::{parse_receipt, validate_receipt};
//!
//! let submission = ReceiptSubmission {
//!     retailer: Some("Target".into()),
//!     purchase_date: Some("2022-01-01".into()),
//!     purchase_time: Some("13:01".into()),
//!     items: Some(vec![ItemSubmission::new("Pepsi - 12-oz", "1.25")]),
//!     total: Some("1.25".into()),
//! };
//!
//! assert!(validate_receipt(&submission).is_valid());
//! let receipt = parse_receipt(&submission).unwrap();
//! assert_eq!(receipt.total.cents(), 125);
//! ```

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::error::{ValidationError, ValidationReport};
use crate::money::Money;
use crate::types::{Item, ItemSubmission, Receipt, ReceiptSubmission};

/// Result type for single-field validators.
pub type ValidationResult<T> = Result<T, ValidationError>;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid date regex"));

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("Invalid time regex")
});

// =============================================================================
// Options
// =============================================================================

/// Switches for checks that change which receipts are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject receipts whose `total` differs from the sum of item prices.
    /// Off by default.
    pub require_total_matches_items: bool,
}

// =============================================================================
// Validator
// =============================================================================

/// Receipt validator.
///
/// Stateless apart from its [`ValidationOptions`]; cheap to copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    pub fn new(options: ValidationOptions) -> Self {
        Validator { options }
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    /// Runs every check and reports all failures. Never panics.
    pub fn validate(&self, submission: &ReceiptSubmission) -> ValidationReport {
        self.check(submission).0
    }

    /// Runs every check and returns the typed receipt when all pass.
    pub fn parse(&self, submission: &ReceiptSubmission) -> Result<Receipt, ValidationReport> {
        match self.check(submission) {
            (report, Some(receipt)) if report.is_valid() => Ok(receipt),
            (report, _) => Err(report),
        }
    }

    /// Single pass that both collects failures and builds the receipt.
    fn check(&self, submission: &ReceiptSubmission) -> (ValidationReport, Option<Receipt>) {
        let mut report = ValidationReport::default();

        let retailer = collect(&mut report, validate_retailer(submission.retailer.as_deref()));
        let purchase_date = collect(
            &mut report,
            validate_purchase_date(submission.purchase_date.as_deref()),
        );
        let purchase_time = collect(
            &mut report,
            validate_purchase_time(submission.purchase_time.as_deref()),
        );
        let items = validate_items(&mut report, submission.items.as_deref());
        let total = collect(
            &mut report,
            validate_amount("total", submission.total.as_deref()),
        );

        if self.options.require_total_matches_items {
            if let (Some(items), Some(total)) = (&items, total) {
                if let Err(e) = validate_total_matches_items(total, items) {
                    report.push(e);
                }
            }
        }

        let receipt = match (retailer, purchase_date, purchase_time, items, total) {
            (Some(retailer), Some(purchase_date), Some(purchase_time), Some(items), Some(total)) => {
                Some(Receipt {
                    retailer,
                    purchase_date,
                    purchase_time,
                    items,
                    total,
                })
            }
            _ => None,
        };

        (report, receipt)
    }
}

/// Validates with default options.
pub fn validate_receipt(submission: &ReceiptSubmission) -> ValidationReport {
    Validator::default().validate(submission)
}

/// Parses with default options.
pub fn parse_receipt(submission: &ReceiptSubmission) -> Result<Receipt, ValidationReport> {
    Validator::default().parse(submission)
}

fn collect<T>(report: &mut ValidationReport, result: ValidationResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            report.push(e);
            None
        }
    }
}

/// Treats `None` and `""` alike: both mean the field was not supplied.
fn required<'a>(field: &str, value: Option<&'a str>) -> ValidationResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::required(field)),
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the retailer name.
///
/// ## Rules
/// - Must be present
/// - Must not be blank after trimming
///
/// Returns the name as submitted; the alphanumeric rule ignores
/// whitespace anyway.
pub fn validate_retailer(retailer: Option<&str>) -> ValidationResult<String> {
    let retailer = required("retailer", retailer)?;

    if retailer.trim().is_empty() {
        return Err(ValidationError::required("retailer"));
    }

    Ok(retailer.to_string())
}

/// Validates a purchase date.
///
/// ## Rules
/// - Shape `YYYY-MM-DD`
/// - Must be a real calendar date (`2023-02-30` is rejected)
///
/// ## Example
/// ```rust
/// use receipt_core::validation::validate_purchase_date;
///
/// assert!(validate_purchase_date(Some("2024-02-29")).is_ok());
/// assert!(validate_purchase_date(Some("2023-02-29")).is_err());
/// assert!(validate_purchase_date(Some("2023-2-1")).is_err());
/// ```
pub fn validate_purchase_date(date: Option<&str>) -> ValidationResult<NaiveDate> {
    let date = required("purchaseDate", date)?;

    if !DATE_PATTERN.is_match(date) {
        return Err(ValidationError::invalid_format(
            "purchaseDate",
            "expected YYYY-MM-DD",
        ));
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        ValidationError::invalid_format("purchaseDate", "not a valid calendar date")
    })
}

/// Validates a purchase time.
///
/// ## Rules
/// - Shape `HH:MM`, 24-hour clock
/// - Hour 00-23, minute 00-59
pub fn validate_purchase_time(time: Option<&str>) -> ValidationResult<NaiveTime> {
    let time = required("purchaseTime", time)?;

    let invalid = || ValidationError::invalid_format("purchaseTime", "expected HH:MM (24-hour)");

    let caps = TIME_PATTERN.captures(time).ok_or_else(invalid)?;
    let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
    let minute: u32 = caps[2].parse().map_err(|_| invalid())?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Validates an amount in the strict `0.00` form.
///
/// ## Example
/// ```rust
/// use receipt_core::validation::validate_amount;
///
/// assert_eq!(validate_amount("total", Some("35.35")).unwrap().cents(), 3535);
/// assert!(validate_amount("total", Some("35.3")).is_err());
/// assert!(validate_amount("total", None).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Option<&str>) -> ValidationResult<Money> {
    let amount = required(field, amount)?;

    amount
        .parse::<Money>()
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

/// Validates a single line item. `index` is only used in field names.
pub fn validate_item(index: usize, item: &ItemSubmission) -> Result<Item, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let description_field = format!("items[{index}].shortDescription");
    let price_field = format!("items[{index}].price");

    let short_description = match item.short_description.as_deref() {
        Some(d) if !d.trim().is_empty() => Some(d.to_string()),
        _ => {
            errors.push(ValidationError::required(description_field));
            None
        }
    };

    let price = match validate_amount(&price_field, item.price.as_deref()) {
        Ok(price) => Some(price),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    match (short_description, price) {
        (Some(short_description), Some(price)) => Ok(Item {
            short_description,
            price,
        }),
        _ => Err(errors),
    }
}

/// Validates the item list, pushing one failure per bad field.
fn validate_items(
    report: &mut ValidationReport,
    items: Option<&[ItemSubmission]>,
) -> Option<Vec<Item>> {
    let Some(items) = items else {
        report.push(ValidationError::required("items"));
        return None;
    };

    if items.is_empty() {
        report.push(ValidationError::Empty {
            field: "items".to_string(),
        });
        return None;
    }

    let mut parsed = Vec::with_capacity(items.len());
    let mut all_ok = true;
    for (index, item) in items.iter().enumerate() {
        match validate_item(index, item) {
            Ok(item) => parsed.push(item),
            Err(errors) => {
                all_ok = false;
                for e in errors {
                    report.push(e);
                }
            }
        }
    }

    all_ok.then_some(parsed)
}

/// Optional cross-check between `total` and the item prices.
pub fn validate_total_matches_items(total: Money, items: &[Item]) -> ValidationResult<()> {
    let items_sum = items
        .iter()
        .try_fold(0i64, |acc, item| acc.checked_add(item.price.cents()))
        .map(Money::from_cents)
        .ok_or_else(|| ValidationError::invalid_format("items", "sum of prices is too large"))?;

    if items_sum != total {
        return Err(ValidationError::TotalMismatch { total, items_sum });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn target_receipt() -> ReceiptSubmission {
        ReceiptSubmission {
            retailer: Some("Target".to_string()),
            purchase_date: Some("2022-01-01".to_string()),
            purchase_time: Some("13:01".to_string()),
            items: Some(vec![ItemSubmission::new("Pepsi - 12-oz", "1.25")]),
            total: Some("1.25".to_string()),
        }
    }

    fn fields(report: &ValidationReport) -> Vec<&str> {
        report.errors().iter().map(ValidationError::field).collect()
    }

    #[test]
    fn test_valid_receipt_parses() {
        let receipt = parse_receipt(&target_receipt()).unwrap();
        assert_eq!(receipt.retailer, "Target");
        assert_eq!(receipt.purchase_date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(receipt.purchase_time, NaiveTime::from_hms_opt(13, 1, 0).unwrap());
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].price.cents(), 125);
        assert_eq!(receipt.total.cents(), 125);
    }

    #[test]
    fn test_empty_submission_reports_every_field_in_order() {
        let report = validate_receipt(&ReceiptSubmission::default());
        assert!(!report.is_valid());
        assert_eq!(
            fields(&report),
            vec!["retailer", "purchaseDate", "purchaseTime", "items", "total"]
        );
    }

    #[test]
    fn test_validate_retailer() {
        assert!(validate_retailer(Some("M&M Corner Market")).is_ok());
        assert!(validate_retailer(Some("")).is_err());
        assert!(validate_retailer(Some("   ")).is_err());
        assert!(validate_retailer(None).is_err());
    }

    #[test]
    fn test_validate_purchase_date() {
        assert!(validate_purchase_date(Some("2022-03-20")).is_ok());
        assert!(validate_purchase_date(Some("2024-02-29")).is_ok());

        assert!(validate_purchase_date(Some("2023-02-29")).is_err());
        assert!(validate_purchase_date(Some("2022-13-01")).is_err());
        assert!(validate_purchase_date(Some("2022-00-10")).is_err());
        assert!(validate_purchase_date(Some("2022/01/01")).is_err());
        assert!(validate_purchase_date(Some("22-01-01")).is_err());
        assert!(validate_purchase_date(Some("2022-01-01T00:00")).is_err());
        assert!(validate_purchase_date(None).is_err());
    }

    #[test]
    fn test_validate_purchase_time() {
        assert!(validate_purchase_time(Some("00:00")).is_ok());
        assert!(validate_purchase_time(Some("14:33")).is_ok());
        assert!(validate_purchase_time(Some("23:59")).is_ok());

        assert!(validate_purchase_time(Some("24:00")).is_err());
        assert!(validate_purchase_time(Some("12:60")).is_err());
        assert!(validate_purchase_time(Some("9:05")).is_err());
        assert!(validate_purchase_time(Some("09:05:00")).is_err());
        assert!(validate_purchase_time(Some("")).is_err());
    }

    #[test]
    fn test_malformed_price_is_reported_by_name() {
        let mut submission = target_receipt();
        submission.items = Some(vec![
            ItemSubmission::new("Gatorade", "2.25"),
            ItemSubmission::new("Gatorade", "2.5"),
        ]);

        let report = validate_receipt(&submission);
        assert!(!report.is_valid());
        assert_eq!(fields(&report), vec!["items[1].price"]);
        assert!(report.messages()[0].starts_with("items[1].price has invalid format"));
    }

    #[test]
    fn test_item_failures_accumulate() {
        let mut submission = target_receipt();
        submission.items = Some(vec![
            ItemSubmission {
                short_description: Some("   ".to_string()),
                price: None,
            },
            ItemSubmission::new("Doritos", "abc"),
        ]);
        submission.total = Some("1.5".to_string());

        let report = validate_receipt(&submission);
        assert_eq!(
            fields(&report),
            vec![
                "items[0].shortDescription",
                "items[0].price",
                "items[1].price",
                "total"
            ]
        );
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut submission = target_receipt();
        submission.items = Some(vec![]);

        let report = validate_receipt(&submission);
        assert_eq!(
            report.errors(),
            &[ValidationError::Empty {
                field: "items".to_string()
            }]
        );
    }

    #[test]
    fn test_total_cross_check_is_off_by_default() {
        let mut submission = target_receipt();
        submission.total = Some("100.00".to_string());
        assert!(validate_receipt(&submission).is_valid());
    }

    #[test]
    fn test_total_cross_check_when_enabled() {
        let validator = Validator::new(ValidationOptions {
            require_total_matches_items: true,
        });

        assert!(validator.validate(&target_receipt()).is_valid());

        let mut submission = target_receipt();
        submission.total = Some("100.00".to_string());
        let report = validator.validate(&submission);
        assert_eq!(
            report.errors(),
            &[ValidationError::TotalMismatch {
                total: Money::from_cents(10000),
                items_sum: Money::from_cents(125),
            }]
        );
    }

    #[test]
    fn test_parse_returns_report_on_failure() {
        let mut submission = target_receipt();
        submission.purchase_time = Some("25:00".to_string());

        let report = parse_receipt(&submission).unwrap_err();
        assert_eq!(fields(&report), vec!["purchaseTime"]);
    }
}
