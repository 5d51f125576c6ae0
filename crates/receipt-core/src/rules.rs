//! # Points Rules
//!
//! The fixed rule set that turns a validated [`Receipt`] into points.
//!
//! ## Rule Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule                     Input          Contribution                  │
//! │  ───────────────────────  ─────────────  ────────────────────────────  │
//! │  RetailerAlphanumeric     retailer       1 per ASCII letter/digit      │
//! │  RoundDollarTotal         total          50 if no cents                │
//! │  QuarterMultipleTotal     total          25 if multiple of 0.25        │
//! │  ItemPairs                items          5 per two items               │
//! │  DescriptionLength        items          ceil(price × 0.2) per item    │
//! │                                          whose trimmed description     │
//! │                                          length is a multiple of 3     │
//! │  OddPurchaseDay           purchaseDate   6 if the day is odd           │
//! │  AfternoonWindow          purchaseTime   10 if 14:00 < t < 16:00       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule is a pure function of the receipt. Rules do not see each
//! other's output, so the total is the same in any evaluation order.
//!
//! Amounts are only bounded by `i64` cents, so the description bonus and
//! the grand total are summed with checked arithmetic. A receipt whose
//! points do not fit in a `u64` yields [`CoreError::PointsOverflow`].
//!
//! ## Usage
//! ```rust
//! use receipt_core::rules::{calculate_points, Rule};
//! use receipt_core::types::{ItemSubmission, ReceiptSubmission};
//! use receipt_core::validation::parse_receipt;
//!
//! let receipt = parse_receipt(&ReceiptSubmission {
//!     retailer: Some("Target".into()),
//!     purchase_date: Some("2022-01-01".into()),
//!     purchase_time: Some("13:01".into()),
//!     items: Some(vec![ItemSubmission::new("Pepsi - 12-oz", "1.25")]),
//!     total: Some("1.25".into()),
//! })
//! .unwrap();
//!
//! let breakdown = calculate_points(&receipt).unwrap();
//! assert_eq!(breakdown.points_for(Rule::QuarterMultipleTotal), 25);
//! assert_eq!(breakdown.total(), 37);
//! ```

use chrono::{Datelike, NaiveTime, Timelike};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Item, Receipt};

// =============================================================================
// Constants
// =============================================================================

pub const ROUND_DOLLAR_POINTS: u64 = 50;
pub const QUARTER_MULTIPLE_POINTS: u64 = 25;
pub const POINTS_PER_ITEM_PAIR: u64 = 5;
pub const ODD_DAY_POINTS: u64 = 6;
pub const AFTERNOON_POINTS: u64 = 10;

const QUARTER: Money = Money::from_cents(25);

/// Description bonus multiplier, as a fraction (0.2 = 1/5).
const DESCRIPTION_BONUS_NUM: u32 = 1;
const DESCRIPTION_BONUS_DEN: u32 = 5;

/// Afternoon window bounds in minutes after midnight, both exclusive.
const AFTERNOON_START_MINUTES: u32 = 14 * 60;
const AFTERNOON_END_MINUTES: u32 = 16 * 60;

// =============================================================================
// Individual Rules
// =============================================================================

/// 1 point per ASCII letter or digit in the retailer name.
///
/// ```rust
/// use receipt_core::rules::retailer_alphanumeric_points;
///
/// assert_eq!(retailer_alphanumeric_points("M&M Corner Market"), 14);
/// ```
pub fn retailer_alphanumeric_points(retailer: &str) -> u64 {
    retailer.chars().filter(char::is_ascii_alphanumeric).count() as u64
}

/// 50 points when the total has no cents.
pub fn round_dollar_points(total: Money) -> u64 {
    if total.is_whole_units() {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

/// 25 points when the total is a multiple of 0.25.
pub fn quarter_multiple_points(total: Money) -> u64 {
    if total.is_multiple_of(QUARTER) {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

/// 5 points for every two items.
pub fn item_pair_points(items: &[Item]) -> u64 {
    (items.len() as u64 / 2) * POINTS_PER_ITEM_PAIR
}

/// Sum over items whose trimmed description length is a non-zero multiple
/// of 3 of `ceil(price × 0.2)`. Rounding is per item.
///
/// Length counts Unicode scalar values (`char`s), not bytes and not
/// UTF-16 code units. `None` when the sum does not fit in a `u64`.
pub fn description_length_points(items: &[Item]) -> Option<u64> {
    items
        .iter()
        .filter(|item| {
            let len = item.short_description.trim().chars().count();
            len > 0 && len % 3 == 0
        })
        .try_fold(0u64, |acc, item| {
            acc.checked_add(
                item.price
                    .scaled_ceil_units(DESCRIPTION_BONUS_NUM, DESCRIPTION_BONUS_DEN),
            )
        })
}

/// 6 points when the day of the month is odd.
pub fn odd_day_points(purchase_date: impl Datelike) -> u64 {
    if purchase_date.day() % 2 == 1 {
        ODD_DAY_POINTS
    } else {
        0
    }
}

/// 10 points when the purchase is strictly after 14:00 and strictly
/// before 16:00.
pub fn afternoon_points(purchase_time: NaiveTime) -> u64 {
    let minutes = purchase_time.hour() * 60 + purchase_time.minute();
    if minutes > AFTERNOON_START_MINUTES && minutes < AFTERNOON_END_MINUTES {
        AFTERNOON_POINTS
    } else {
        0
    }
}

// =============================================================================
// Rule Set
// =============================================================================

/// One scoring rule. [`Rule::ALL`] is the complete, fixed rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    RetailerAlphanumeric,
    RoundDollarTotal,
    QuarterMultipleTotal,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonWindow,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::RetailerAlphanumeric,
        Rule::RoundDollarTotal,
        Rule::QuarterMultipleTotal,
        Rule::ItemPairs,
        Rule::DescriptionLength,
        Rule::OddPurchaseDay,
        Rule::AfternoonWindow,
    ];

    /// Points this rule awards for `receipt`.
    pub fn points(&self, receipt: &Receipt) -> CoreResult<u64> {
        let points = match self {
            Rule::RetailerAlphanumeric => retailer_alphanumeric_points(&receipt.retailer),
            Rule::RoundDollarTotal => round_dollar_points(receipt.total),
            Rule::QuarterMultipleTotal => quarter_multiple_points(receipt.total),
            Rule::ItemPairs => item_pair_points(&receipt.items),
            Rule::DescriptionLength => description_length_points(&receipt.items)
                .ok_or(CoreError::PointsOverflow { rule: self.label() })?,
            Rule::OddPurchaseDay => odd_day_points(receipt.purchase_date),
            Rule::AfternoonWindow => afternoon_points(receipt.purchase_time),
        };
        Ok(points)
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Rule::RetailerAlphanumeric => "retailer alphanumeric",
            Rule::RoundDollarTotal => "round dollar total",
            Rule::QuarterMultipleTotal => "quarter multiple total",
            Rule::ItemPairs => "item pairs",
            Rule::DescriptionLength => "description length",
            Rule::OddPurchaseDay => "odd purchase day",
            Rule::AfternoonWindow => "afternoon window",
        }
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Points awarded by one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleContribution {
    pub rule: Rule,
    pub points: u64,
}

/// Per-rule contributions for one receipt.
///
/// Only [`apply_rules`] builds one, so `total` always equals the sum of
/// `contributions` and is known to fit in a `u64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    contributions: Vec<RuleContribution>,
    total: u64,
}

impl PointsBreakdown {
    /// Sum of every contribution.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Contributions in evaluation order.
    pub fn contributions(&self) -> &[RuleContribution] {
        &self.contributions
    }

    /// Points from a single rule (0 if the rule was not evaluated).
    pub fn points_for(&self, rule: Rule) -> u64 {
        self.contributions
            .iter()
            .filter(|c| c.rule == rule)
            .map(|c| c.points)
            .sum()
    }
}

/// Applies a list of rules to a receipt, in the given order.
pub fn apply_rules(receipt: &Receipt, rules: &[Rule]) -> CoreResult<PointsBreakdown> {
    let mut contributions = Vec::with_capacity(rules.len());
    let mut total = 0u64;

    for rule in rules {
        let points = rule.points(receipt)?;
        total = total
            .checked_add(points)
            .ok_or(CoreError::PointsOverflow { rule: rule.label() })?;
        contributions.push(RuleContribution {
            rule: *rule,
            points,
        });
    }

    Ok(PointsBreakdown {
        contributions,
        total,
    })
}

/// Applies the full rule set.
pub fn calculate_points(receipt: &Receipt) -> CoreResult<PointsBreakdown> {
    apply_rules(receipt, &Rule::ALL)
}

// =============================================================================
// Unit Tests
// =============================================================================
