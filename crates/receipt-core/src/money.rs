//! # Money Module
//!
//! Provides the `Money` type for handling receipt amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    "is 1.10 a multiple of 0.25?" depends on representation error      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "1.25" → 125 cents → 125 % 25 == 0 ✅                                │
//! │    "9.00" → 900 cents → 900 % 100 == 0 ✅                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use receipt_core::money::Money;
//!
//! let total: Money = "9.00".parse().unwrap();
//! assert_eq!(total.cents(), 900);
//! assert!(total.is_whole_units());
//! assert!(total.is_multiple_of(Money::from_cents(25)));
//!
//! // Only the strict two-decimal form is accepted
//! assert!("2.5".parse::<Money>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Strict amount shape: one or more digits, a dot, exactly two digits.
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]{2})$").expect("Invalid amount regex"));

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64**: Receipt amounts are never negative, but `i64` keeps arithmetic
///   identical to the rest of the money math and leaves room for sums
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **No float constructor**: amounts come from strings or cents only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// True when the amount has no cents (a round dollar amount).
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// assert!(Money::from_cents(900).is_whole_units());
    /// assert!(!Money::from_cents(901).is_whole_units());
    /// ```
    #[inline]
    pub const fn is_whole_units(&self) -> bool {
        self.0 % 100 == 0
    }

    /// True when the amount is an exact multiple of `step`.
    ///
    /// A zero step never divides anything.
    #[inline]
    pub const fn is_multiple_of(&self, step: Money) -> bool {
        step.0 != 0 && self.0 % step.0 == 0
    }

    /// Multiplies by `numerator / denominator` and rounds up to the next
    /// whole currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// // $12.25 × 0.2 = $2.45 → 3
    /// assert_eq!(Money::from_cents(1225).scaled_ceil_units(1, 5), 3);
    /// // $5.00 × 0.2 = $1.00 → 1 (exact values are not bumped)
    /// assert_eq!(Money::from_cents(500).scaled_ceil_units(1, 5), 1);
    /// ```
    ///
    /// ## Implementation
    /// Works entirely in cents: `ceil(cents × num / (den × 100))`.
    /// Negative or zero results clamp to zero.
    pub fn scaled_ceil_units(&self, numerator: u32, denominator: u32) -> u64 {
        let scaled = self.0 as i128 * numerator as i128;
        let divisor = denominator as i128 * 100;
        if scaled <= 0 || divisor == 0 {
            return 0;
        }
        ((scaled + divisor - 1) / divisor) as u64
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Why an amount string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoneyError {
    /// Not of the form `<digits>.<two digits>`.
    #[error("expected a decimal amount with exactly two fractional digits (e.g. 12.34)")]
    Format,

    /// Shape is fine but the amount does not fit in 64-bit cents.
    #[error("amount is too large")]
    Overflow,
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = AMOUNT_PATTERN.captures(s).ok_or(ParseMoneyError::Format)?;

        let dollars: i64 = caps[1].parse().map_err(|_| ParseMoneyError::Overflow)?;
        let cents: i64 = caps[2].parse().map_err(|_| ParseMoneyError::Format)?;

        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Money)
            .ok_or(ParseMoneyError::Overflow)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$D.CC`, for logs and error messages.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
