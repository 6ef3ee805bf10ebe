//! # tally-core: Pure Ledger Engine for Tally
//!
//! This crate is the **heart** of Tally. Given the expenses a group has
//! recorded, it works out who is up, who is down, and who should pay whom.
//! Everything here is a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tally (CLI report)                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              tally-book (owns the expense records)              │   │
//! │  │     create / update ──► validate_record() before storing        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ immutable snapshot                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ validation│  │  balance  │  │settlement │  │   money   │  │   │
//! │  │   │  splits   │  │ aggregate │  │  reduce   │  │  Decimal  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STATE • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Expense records, balances, settlements
//! - [`money`] - Money type over exact decimals
//! - [`error`] - Domain error types
//! - [`validation`] - The split validator
//! - [`balance`] - Per-person spent / owed / balance
//! - [`settlement`] - Greedy debtor → creditor matching
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{summarize, ExpenseRecord, Money};
//!
//! let records = vec![ExpenseRecord::equal(Money::from_cents(12000), "A", ["A", "B", "C"])];
//! let summary = summarize(&records);
//!
//! assert_eq!(summary.people, vec!["A", "B", "C"]);
//! assert_eq!(summary.settlements.len(), 2);
//! assert_eq!(summary.settlements[0].to_string(), "B pays A 40.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod balance;
pub mod error;
pub mod money;
pub mod settlement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use balance::{aggregate, BalanceSheet, PersonTally};
pub use error::{CoreError, CoreResult, SplitError, ValidationError};
pub use money::Money;
pub use settlement::{reduce, settle, NetPosition};
pub use types::*;
pub use validation::validate_record;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Decimal places reported for every amount.
pub const MONEY_SCALE: u32 = 2;

/// The ±0.01 band, in cents, inside which two amounts count as equal.
///
/// Used by the share-sum checks, by the creditor / debtor cut-off and by
/// the settlement noise filter.
pub const TOLERANCE_CENTS: i64 = 1;

/// Largest expense amount, and largest share magnitude, in whole units.
///
/// Keeps every per-record product and every ledger total far inside the
/// range of `Decimal`, so aggregation cannot overflow on validated input.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

// =============================================================================
// Facade
// =============================================================================

/// Derives people, balances and settlements from one snapshot of records.
///
/// Settlements are reduced from the reported (rounded) balance rows, so a
/// report's payments always add up against the balances it prints.
pub fn summarize<'a, I>(records: I) -> LedgerSummary
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let sheet = aggregate(records);
    let balances = sheet.balances();
    let settlements = reduce(&balances);

    LedgerSummary {
        people: sheet.people(),
        balances,
        settlements,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_empty() {
        let none: Vec<ExpenseRecord> = Vec::new();
        assert_eq!(summarize(&none), LedgerSummary::default());
    }

    #[test]
    fn test_summarize_people_match_union() {
        let records = vec![
            ExpenseRecord::equal(Money::from_cents(3000), "Zoe", ["Zoe", "Ann"]),
            ExpenseRecord::equal(Money::from_cents(1000), "Ben", ["Ben"]),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.people, balance::people(&records));
        assert_eq!(summary.balances.len(), 3);
        assert_eq!(summary.settlements.len(), 1);
        assert_eq!(summary.settlements[0].to_string(), "Ann pays Zoe 15.00");
    }
}
