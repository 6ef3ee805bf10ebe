//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (immutable)            DERIVED (recomputed on every query)       │
//! │  ┌─────────────────┐          ┌─────────────────┐  ┌─────────────────┐  │
//! │  │  ExpenseRecord  │          │  PersonBalance  │  │   Settlement    │  │
//! │  │  ─────────────  │  ──────► │  ─────────────  │  │  ─────────────  │  │
//! │  │  amount         │          │  person         │  │  from (debtor)  │  │
//! │  │  payer          │          │  spent          │  │  to (creditor)  │  │
//! │  │  participants   │          │  owed           │  │  amount         │  │
//! │  │  split + shares │          │  balance        │  └─────────────────┘  │
//! │  └─────────────────┘          └─────────────────┘                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! People are identified by name. Names are compared exactly (no case
//! folding, no trimming) so "Bob" and "bob" are two people.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::dedupe_participants;

// =============================================================================
// Split Kind
// =============================================================================

/// How an expense is divided among its participants.
///
/// ```text
///   EQUAL       120.00 over [A, B, C]          → 40.00 each
///   PERCENTAGE  100.00, {A: 40, B: 40, C: 20}  → 40.00 / 40.00 / 20.00
///   EXACT        90.00, {A: 50, B: 40}         → 50.00 / 40.00
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitKind {
    /// Everyone owes `amount / n`.
    #[default]
    Equal,

    /// Shares are percentages summing to 100.
    #[serde(alias = "percent")]
    Percentage,

    /// Shares are amounts summing to the expense amount.
    Exact,
}

impl SplitKind {
    /// True for the kinds that need a shares mapping.
    pub fn uses_shares(&self) -> bool {
        matches!(self, SplitKind::Percentage | SplitKind::Exact)
    }
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitKind::Equal => write!(f, "equal"),
            SplitKind::Percentage => write!(f, "percentage"),
            SplitKind::Exact => write!(f, "exact"),
        }
    }
}

impl FromStr for SplitKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equal" => Ok(SplitKind::Equal),
            "percentage" | "percent" => Ok(SplitKind::Percentage),
            "exact" => Ok(SplitKind::Exact),
            _ => Err(ValidationError::NotAllowed {
                field: "split".to_string(),
                allowed: vec![
                    "equal".to_string(),
                    "percentage".to_string(),
                    "exact".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Shares
// =============================================================================

/// Participant name → share value.
///
/// Percent points for [`SplitKind::Percentage`], currency amounts for
/// [`SplitKind::Exact`]. Sorted by name so error messages are stable.
pub type Shares = BTreeMap<String, Decimal>;

// =============================================================================
// Expense Record
// =============================================================================

/// One expense as the engine sees it.
///
/// ## Invariants
/// Enforced by [`crate::validation::validate_record`], assumed everywhere else:
/// - `amount > 0`
/// - `payer` is one of `participants`
/// - `shares` is empty for equal splits and keyed exactly by `participants`
///   otherwise, summing to 100 (percentage) or `amount` (exact) within 0.01
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Total paid.
    pub amount: Money,

    /// Who paid.
    pub payer: String,

    /// Who shares the cost, duplicates removed, first occurrence kept.
    pub participants: Vec<String>,

    /// How the cost is divided.
    pub split: SplitKind,

    /// Per-participant shares, empty for equal splits.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shares: Shares,
}

impl ExpenseRecord {
    /// Builds an equal split record.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::{ExpenseRecord, Money};
    ///
    /// let dinner = ExpenseRecord::equal(Money::from_cents(12000), "A", ["A", "B", "C", "B"]);
    /// assert_eq!(dinner.participants, vec!["A", "B", "C"]);
    /// ```
    pub fn equal<I, S>(amount: Money, payer: impl Into<String>, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(amount, payer, participants, SplitKind::Equal, Shares::new())
    }

    /// Builds a record of any kind. Participants are de-duplicated.
    pub fn new<I, S>(
        amount: Money,
        payer: impl Into<String>,
        participants: I,
        split: SplitKind,
        shares: Shares,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExpenseRecord {
            amount,
            payer: payer.into(),
            participants: dedupe_participants(participants.into_iter().map(Into::into)),
            split,
            shares,
        }
    }

    /// Payer plus participants, payer first, without duplicates.
    pub fn people(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.payer.as_str()).chain(
            self.participants
                .iter()
                .map(String::as_str)
                .filter(move |p| *p != self.payer),
        )
    }

    /// What `person` owes for this record under its split rule, unrounded.
    ///
    /// Returns zero for people who are not participants.
    pub fn owed_by(&self, person: &str) -> Money {
        if !self.participants.iter().any(|p| p == person) {
            return Money::ZERO;
        }

        match self.split {
            SplitKind::Equal => self.amount / self.participants.len(),
            SplitKind::Percentage => self
                .shares
                .get(person)
                .map(|pct| self.amount.percent(*pct))
                .unwrap_or(Money::ZERO),
            SplitKind::Exact => self
                .shares
                .get(person)
                .map(|v| Money::from_decimal(*v))
                .unwrap_or(Money::ZERO),
        }
    }
}

// =============================================================================
// Person Balance
// =============================================================================

/// A person's reported position, every field rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonBalance {
    pub person: String,

    /// Total this person paid.
    pub spent: Money,

    /// Total this person is responsible for.
    pub owed: Money,

    /// `spent - owed`. Positive: the group owes them. Negative: they owe.
    pub balance: Money,
}

impl PersonBalance {
    /// True when the balance is inside the ±0.01 band.
    pub fn is_settled(&self) -> bool {
        self.balance.is_within_tolerance(Money::ZERO)
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// A single payment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Debtor.
    pub from: String,

    /// Creditor.
    pub to: String,

    /// Positive, rounded to 2 decimals.
    pub amount: Money,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}

// =============================================================================
// Ledger Summary
// =============================================================================

/// Everything a report needs, derived from one snapshot of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Sorted, de-duplicated union of payers and participants.
    pub people: Vec<String>,

    /// One row per person, sorted by name.
    pub balances: Vec<PersonBalance>,

    /// Payments in the order the reducer emitted them.
    pub settlements: Vec<Settlement>,
}

// =============================================================================
// Unit Tests
// =============================================================================
