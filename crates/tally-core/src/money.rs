//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Summed over hundreds of expenses the drift reaches whole cents.       │
//! │                                                                         │
//! │  OUR SOLUTION: Fixed-point decimals (rust_decimal)                      │
//! │    Accumulate at full precision:  100 / 3 = 33.3333333333...            │
//! │    Round ONCE when reporting:     33.33                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cents are not enough here (a 40% share of 33.33 is 13.332), so unlike a
//! till the ledger keeps the full decimal and only rounds at the edges.
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let lunch = Money::from_cents(12000); // 120.00
//! let share = lunch / 3;                // 40.00
//! assert_eq!(share.round_half_up(), Money::from_cents(4000));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::{MAX_AMOUNT_UNITS, MONEY_SCALE, TOLERANCE_CENTS};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value held as an exact decimal.
///
/// ## Design Decisions
/// - **Signed**: net balances are negative for debtors
/// - **Full precision inside**: running sums are never rounded
/// - **Serde as string**: `"12.34"` survives JSON without float conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero money value.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, MONEY_SCALE))
    }

    /// Wraps an exact decimal.
    #[inline]
    pub const fn from_decimal(value: Decimal) -> Self {
        Money(value)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// The absolute tolerance (0.01) used for every "close enough" comparison.
    #[inline]
    pub fn tolerance() -> Self {
        Money::from_cents(TOLERANCE_CENTS)
    }

    /// Upper bound for an expense amount and for any single share.
    #[inline]
    pub fn max_amount() -> Self {
        Money(Decimal::from(MAX_AMOUNT_UNITS))
    }

    /// Rounds to two decimal places, half away from zero.
    ///
    /// ## Rounding Rule
    /// ```text
    ///   12.345  →  12.35
    ///  -12.345  → -12.35
    ///   33.3333 →  33.33
    /// ```
    /// This is the only place the ledger rounds. Call it when a number
    /// leaves the engine, never on a running total.
    ///
    /// The result always carries exactly two decimals, so `0` prints as `0.00`.
    pub fn round_half_up(&self) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(MONEY_SCALE);
        Money(rounded)
    }

    /// True when `|self - target| <= 0.01`.
    pub fn is_within_tolerance(&self, target: Money) -> bool {
        (*self - target).abs() <= Money::tolerance()
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a percentage (`40` means 40%) to this amount.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tally_core::money::Money;
    ///
    /// let bill = Money::from_cents(10000);
    /// assert_eq!(bill.percent(Decimal::from(40)), Money::from_cents(4000));
    /// ```
    pub fn percent(&self, pct: Decimal) -> Self {
        Money(self.0 * (pct / Decimal::ONE_HUNDRED))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the value as-is, e.g. `33.333333` or `40.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: e.to_string(),
            })
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Division by a head count (equal splits).
impl Div<usize> for Money {
    type Output = Self;

    #[inline]
    fn div(self, n: usize) -> Self {
        Money(self.0 / Decimal::from(n))
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_cents(1250));
        assert_eq!(" 7 ".parse::<Money>().unwrap(), Money::from_cents(700));
        assert!("twelve".parse::<Money>().is_err());
    }

    #[test]
    fn test_round_half_up() {
        let m: Money = "12.345".parse().unwrap();
        assert_eq!(m.round_half_up(), Money::from_cents(1235));

        let m: Money = "-12.345".parse().unwrap();
        assert_eq!(m.round_half_up(), Money::from_cents(-1235));

        let m: Money = "12.344".parse().unwrap();
        assert_eq!(m.round_half_up(), Money::from_cents(1234));

        assert_eq!(Money::ZERO.round_half_up().to_string(), "0.00");
        assert_eq!("100".parse::<Money>().unwrap().round_half_up().to_string(), "100.00");
    }

    /// 100 / 3 keeps its digits until reported; the lost cent is documented.
    #[test]
    fn test_equal_split_keeps_precision() {
        let third = Money::from_cents(10000) / 3;
        assert_ne!(third, Money::from_cents(3333));
        assert_eq!(third.round_half_up(), Money::from_cents(3333));

        let rebuilt = third + third + third;
        assert!(rebuilt.is_within_tolerance(Money::from_cents(10000)));
    }

    #[test]
    fn test_tolerance() {
        let a = Money::from_cents(10000);
        assert!(a.is_within_tolerance(Money::from_cents(10001)));
        assert!(a.is_within_tolerance(Money::from_cents(9999)));
        assert!(!a.is_within_tolerance(Money::from_cents(10002)));
    }

    #[test]
    fn test_percent() {
        let bill = Money::from_cents(3333);
        assert_eq!(bill.percent(Decimal::from(40)), "13.332".parse().unwrap());

        let top = Money::max_amount().percent(Money::max_amount().as_decimal());
        assert_eq!(top, Money::from_decimal(Decimal::from(10_000_000_000_000_000_000_000i128)));
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::ZERO.is_zero());
        assert!(Money::from_cents(1).is_positive());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!((-Money::from_cents(250)).abs(), Money::from_cents(250));
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_cents(100), Money::from_cents(250)].iter().sum();
        assert_eq!(total, Money::from_cents(350));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Money::from_cents(4000)).unwrap();
        assert_eq!(json, "\"40.00\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_cents(4000));
    }
}
