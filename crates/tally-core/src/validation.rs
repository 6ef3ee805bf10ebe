//! # Validation Module
//!
//! The split validator and a few field checks for Tally.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Runs                              │
//! │                                                                         │
//! │  create expense ──┐                                                     │
//! │                   ├──► merge onto stored record (updates only)          │
//! │  update expense ──┘            │                                        │
//! │                                ▼                                        │
//! │                     validate_record() ← THIS MODULE                     │
//! │                                │                                        │
//! │                ┌───────────────┴───────────────┐                        │
//! │                ▼                               ▼                        │
//! │          Err: write aborted              Ok: record stored              │
//! │          (book unchanged)                                               │
//! │                                                                         │
//! │  aggregate() / reduce() never validate: they trust stored records.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::validate_record;
//! use tally_core::{ExpenseRecord, Money};
//!
//! let dinner = ExpenseRecord::equal(Money::from_cents(12000), "A", ["A", "B", "C"]);
//! assert!(validate_record(&dinner).is_ok());
//! ```

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::error::{SplitError, SplitResult, ValidationError};
use crate::money::Money;
use crate::types::{ExpenseRecord, SplitKind};

/// Result type for field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Split Validator
// =============================================================================

/// Checks that a record's split is internally consistent.
///
/// ## Rules (checked in this order)
/// 1. `0 < amount <= Money::max_amount()`
/// 2. at least one participant, no blank names
/// 3. payer is a participant
/// 4. equal: no shares
/// 5. percentage / exact: share keys match participants exactly
/// 6. percentage / exact: every share within `±Money::max_amount()`
/// 7. percentage: shares sum to 100; exact: shares sum to amount (±0.01)
///
/// The bounds on amount and shares keep every owed amount and running
/// total representable, so a record that passes can always be aggregated.
///
/// Participants are compared as a set, so a record that still carries
/// duplicate names validates the same as its de-duplicated form.
pub fn validate_record(record: &ExpenseRecord) -> SplitResult<()> {
    if !record.amount.is_positive() {
        return Err(SplitError::InvalidAmount {
            amount: record.amount,
        });
    }

    if record.amount > Money::max_amount() {
        return Err(SplitError::AmountTooLarge {
            amount: record.amount,
            max: Money::max_amount(),
        });
    }

    if record.participants.is_empty() {
        return Err(SplitError::EmptyParticipants);
    }

    validate_person_name("payer", &record.payer)?;
    for participant in &record.participants {
        validate_person_name("participant", participant)?;
    }

    if !record.participants.iter().any(|p| *p == record.payer) {
        return Err(SplitError::PayerNotParticipant {
            payer: record.payer.clone(),
        });
    }

    match record.split {
        SplitKind::Equal => {
            if !record.shares.is_empty() {
                return Err(SplitError::UnexpectedShares);
            }
            Ok(())
        }
        SplitKind::Percentage => {
            check_share_keys(record)?;
            check_share_sum(record, Money::from_decimal(Decimal::ONE_HUNDRED))
        }
        SplitKind::Exact => {
            check_share_keys(record)?;
            check_share_sum(record, record.amount)
        }
    }
}

/// Share keys must equal the participant set: no missing, no extra.
fn check_share_keys(record: &ExpenseRecord) -> SplitResult<()> {
    let participants: HashSet<&str> = record.participants.iter().map(String::as_str).collect();

    let mut missing: Vec<String> = record
        .participants
        .iter()
        .filter(|p| !record.shares.contains_key(p.as_str()))
        .cloned()
        .collect();
    missing.sort();
    missing.dedup();
    if !missing.is_empty() {
        return Err(SplitError::MissingShares { names: missing });
    }

    // BTreeMap keys, already sorted
    let extra: Vec<String> = record
        .shares
        .keys()
        .filter(|k| !participants.contains(k.as_str()))
        .cloned()
        .collect();
    if !extra.is_empty() {
        return Err(SplitError::ExtraShares { names: extra });
    }

    Ok(())
}

fn check_share_sum(record: &ExpenseRecord, target: Money) -> SplitResult<()> {
    let max = Money::max_amount();
    let mut total = Decimal::ZERO;

    for (name, value) in &record.shares {
        let out_of_range = || SplitError::ShareOutOfRange {
            name: name.clone(),
            value: *value,
            max,
        };
        if value.abs() > max.as_decimal() {
            return Err(out_of_range());
        }
        total = total.checked_add(*value).ok_or_else(out_of_range)?;
    }

    let actual = Money::from_decimal(total);

    if !actual.is_within_tolerance(target) {
        return Err(SplitError::ShareSumMismatch {
            kind: record.split,
            expected: target,
            actual,
        });
    }

    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

/// A person's name must contain something other than whitespace.
pub fn validate_person_name(field: &str, name: &str) -> SplitResult<()> {
    if name.trim().is_empty() {
        return Err(SplitError::BlankName {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an expense description.
///
/// ## Rules
/// - Must not be empty or whitespace
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Normalisation
// =============================================================================

/// Removes duplicate names, keeping the first occurrence of each.
///
/// ## Example
/// ```rust
/// use tally_core::validation::dedupe_participants;
///
/// let names = ["B", "A", "B", "C", "A"].map(String::from);
/// assert_eq!(dedupe_participants(names), vec!["B", "A", "C"]);
/// ```
pub fn dedupe_participants<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Shares;

    fn shares(pairs: &[(&str, &str)]) -> Shares {
        pairs
            .iter()
            .map(|(name, v)| (name.to_string(), v.parse::<Decimal>().unwrap()))
            .collect()
    }

    fn record(amount: i64, payer: &str, people: &[&str], split: SplitKind, s: Shares) -> ExpenseRecord {
        ExpenseRecord::new(Money::from_cents(amount * 100), payer, people.iter().copied(), split, s)
    }

    #[test]
    fn test_equal_split_valid() {
        let r = record(120, "A", &["A", "B", "C"], SplitKind::Equal, Shares::new());
        assert!(validate_record(&r).is_ok());
    }

    #[test]
    fn test_amount_must_be_positive() {
        let r = record(0, "A", &["A"], SplitKind::Equal, Shares::new());
        assert!(matches!(validate_record(&r), Err(SplitError::InvalidAmount { .. })));

        let r = record(-5, "A", &["A"], SplitKind::Equal, Shares::new());
        assert!(matches!(validate_record(&r), Err(SplitError::InvalidAmount { .. })));
    }

    #[test]
    fn test_participants_required() {
        let r = record(10, "A", &[], SplitKind::Equal, Shares::new());
        assert_eq!(validate_record(&r), Err(SplitError::EmptyParticipants));
    }

    #[test]
    fn test_blank_names_rejected() {
        let r = record(10, "  ", &["  ", "B"], SplitKind::Equal, Shares::new());
        assert_eq!(
            validate_record(&r),
            Err(SplitError::BlankName {
                field: "payer".to_string()
            })
        );

        let r = record(10, "A", &["A", ""], SplitKind::Equal, Shares::new());
        assert_eq!(
            validate_record(&r),
            Err(SplitError::BlankName {
                field: "participant".to_string()
            })
        );
    }

    #[test]
    fn test_payer_must_participate() {
        let r = record(10, "D", &["A", "B"], SplitKind::Equal, Shares::new());
        assert_eq!(
            validate_record(&r),
            Err(SplitError::PayerNotParticipant {
                payer: "D".to_string()
            })
        );
    }

    #[test]
    fn test_equal_split_rejects_shares() {
        let r = record(10, "A", &["A", "B"], SplitKind::Equal, shares(&[("A", "5"), ("B", "5")]));
        assert_eq!(validate_record(&r), Err(SplitError::UnexpectedShares));
    }

    #[test]
    fn test_percentage_split() {
        let ok = record(
            100,
            "Bob",
            &["Alice", "Bob", "Charlie"],
            SplitKind::Percentage,
            shares(&[("Alice", "40"), ("Bob", "40"), ("Charlie", "20")]),
        );
        assert!(validate_record(&ok).is_ok());

        let within = record(
            100,
            "A",
            &["A", "B", "C"],
            SplitKind::Percentage,
            shares(&[("A", "33.33"), ("B", "33.33"), ("C", "33.34")]),
        );
        assert!(validate_record(&within).is_ok());

        let off = record(
            100,
            "A",
            &["A", "B", "C"],
            SplitKind::Percentage,
            shares(&[("A", "33.33"), ("B", "33.33"), ("C", "33.32")]),
        );
        assert!(matches!(
            validate_record(&off),
            Err(SplitError::ShareSumMismatch {
                kind: SplitKind::Percentage,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_and_extra_shares() {
        let missing = record(
            100,
            "A",
            &["A", "B", "C"],
            SplitKind::Percentage,
            shares(&[("A", "100")]),
        );
        assert_eq!(
            validate_record(&missing),
            Err(SplitError::MissingShares {
                names: vec!["B".to_string(), "C".to_string()]
            })
        );

        let extra = record(
            100,
            "A",
            &["A"],
            SplitKind::Exact,
            shares(&[("A", "50"), ("Z", "50")]),
        );
        assert_eq!(
            validate_record(&extra),
            Err(SplitError::ExtraShares {
                names: vec!["Z".to_string()]
            })
        );
    }

    #[test]
    fn test_exact_split_mismatch_rejected() {
        let r = record(
            90,
            "A",
            &["A", "B"],
            SplitKind::Exact,
            shares(&[("A", "50"), ("B", "50")]),
        );
        assert_eq!(
            validate_record(&r),
            Err(SplitError::ShareSumMismatch {
                kind: SplitKind::Exact,
                expected: Money::from_cents(9000),
                actual: Money::from_cents(10000),
            })
        );
    }

    #[test]
    fn test_exact_split_tolerance_edge() {
        let on_edge = record(
            90,
            "A",
            &["A", "B"],
            SplitKind::Exact,
            shares(&[("A", "45.00"), ("B", "45.01")]),
        );
        assert!(validate_record(&on_edge).is_ok());

        let past_edge = record(
            90,
            "A",
            &["A", "B"],
            SplitKind::Exact,
            shares(&[("A", "45.00"), ("B", "45.02")]),
        );
        assert!(validate_record(&past_edge).is_err());
    }

    #[test]
    fn test_amount_upper_bound() {
        let at_max = ExpenseRecord::equal(Money::max_amount(), "A", ["A", "B"]);
        assert!(validate_record(&at_max).is_ok());

        let huge = ExpenseRecord::new(
            Money::from_decimal("5e27".parse().unwrap()),
            "A",
            ["A", "B"],
            SplitKind::Percentage,
            shares(&[("A", "40"), ("B", "60")]),
        );
        assert_eq!(
            validate_record(&huge),
            Err(SplitError::AmountTooLarge {
                amount: huge.amount,
                max: Money::max_amount(),
            })
        );
    }

    #[test]
    fn test_huge_shares_rejected_without_overflow() {
        let r = record(
            100,
            "A",
            &["A", "B"],
            SplitKind::Exact,
            shares(&[("A", "6e28"), ("B", "6e28")]),
        );
        assert!(matches!(
            validate_record(&r),
            Err(SplitError::ShareOutOfRange { ref name, .. }) if name == "A"
        ));

        let negative = record(
            100,
            "A",
            &["A", "B"],
            SplitKind::Percentage,
            shares(&[("A", "-2000000000000"), ("B", "2000000000100")]),
        );
        assert!(matches!(
            validate_record(&negative),
            Err(SplitError::ShareOutOfRange { ref name, .. }) if name == "A"
        ));
    }

    /// The largest record the validator accepts still aggregates.
    #[test]
    fn test_bounded_record_aggregates() {
        let r = ExpenseRecord::new(
            Money::max_amount(),
            "A",
            ["A", "B"],
            SplitKind::Percentage,
            shares(&[("A", "1000000000000"), ("B", "-999999999900")]),
        );
        assert!(validate_record(&r).is_ok());

        let balances = crate::aggregate(&[r.clone(), r]).balances();
        assert_eq!(balances.len(), 2);
        let net: Money = balances.iter().map(|row| row.balance).sum();
        assert!(net.is_within_tolerance(Money::ZERO));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let r = record(
            100,
            "Bob",
            &["Alice", "Bob"],
            SplitKind::Exact,
            shares(&[("Alice", "60"), ("Bob", "40")]),
        );
        assert!(validate_record(&r).is_ok());
        assert!(validate_record(&r).is_ok());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Dinner").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description("   ").is_err());
    }

    #[test]
    fn test_dedupe_participants() {
        let names = ["A", "A", "B"].map(String::from);
        assert_eq!(dedupe_participants(names), vec!["A", "B"]);
    }
}
