//! # Balance Aggregation
//!
//! Turns a set of expense records into per-person spent / owed / balance.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      aggregate(records)                                 │
//! │                                                                         │
//! │  for each record (any order):                                          │
//! │     spent[payer]       += amount                                        │
//! │     owed[participant]  += share under the split rule                    │
//! │                                                                         │
//! │  BalanceSheet  (exact decimals, keyed by person)                       │
//! │       │                                                                 │
//! │       ├──► balances()  → rounded PersonBalance rows, sorted by name     │
//! │       └──► settlement::settle(&sheet)  (uses the exact nets)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Addition is commutative, so the sheet does not depend on record order.
//! Equal splits that don't divide evenly (100 / 3) are left as-is: nobody
//! absorbs the leftover cent.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::money::Money;
use crate::types::{ExpenseRecord, PersonBalance};

// =============================================================================
// Person Tally
// =============================================================================

/// Unrounded running totals for one person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PersonTally {
    pub spent: Money,
    pub owed: Money,
}

impl PersonTally {
    /// `spent - owed` at full precision.
    pub fn net(&self) -> Money {
        self.spent - self.owed
    }
}

// =============================================================================
// Balance Sheet
// =============================================================================

/// Exact per-person totals. Build with [`aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    tallies: BTreeMap<String, PersonTally>,
}

impl BalanceSheet {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record's contributions.
    ///
    /// The record is assumed valid. Shares naming non-participants are
    /// ignored; that case is a caller bug, not a runtime condition.
    pub fn record(&mut self, record: &ExpenseRecord) {
        for person in record.people() {
            self.tallies.entry(person.to_string()).or_default();
        }

        if let Some(payer) = self.tallies.get_mut(&record.payer) {
            payer.spent += record.amount;
        }

        for participant in &record.participants {
            let owed = record.owed_by(participant);
            if let Some(tally) = self.tallies.get_mut(participant) {
                tally.owed += owed;
            }
        }
    }

    /// Exact totals for one person.
    pub fn get(&self, person: &str) -> Option<&PersonTally> {
        self.tallies.get(person)
    }

    /// Iterates people and exact totals in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PersonTally)> {
        self.tallies.iter().map(|(name, tally)| (name.as_str(), tally))
    }

    /// Everyone on the sheet, sorted.
    pub fn people(&self) -> Vec<String> {
        self.tallies.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Reported rows: each field rounded half-up to 2 decimals, sorted by name.
    ///
    /// `balance` is rounded from the exact net, not computed from the
    /// rounded `spent` and `owed`, so it can differ from their difference
    /// by a cent.
    pub fn balances(&self) -> Vec<PersonBalance> {
        self.tallies
            .iter()
            .map(|(person, tally)| PersonBalance {
                person: person.clone(),
                spent: tally.spent.round_half_up(),
                owed: tally.owed.round_half_up(),
                balance: tally.net().round_half_up(),
            })
            .collect()
    }
}

impl<'a> Extend<&'a ExpenseRecord> for BalanceSheet {
    fn extend<I: IntoIterator<Item = &'a ExpenseRecord>>(&mut self, records: I) {
        for record in records {
            self.record(record);
        }
    }
}

impl<'a> FromIterator<&'a ExpenseRecord> for BalanceSheet {
    fn from_iter<I: IntoIterator<Item = &'a ExpenseRecord>>(records: I) -> Self {
        let mut sheet = BalanceSheet::new();
        sheet.extend(records);
        sheet
    }
}

// =============================================================================
// Public Functions
// =============================================================================

/// Aggregates records into an exact balance sheet.
///
/// ## Example
/// ```rust
/// use tally_core::balance::aggregate;
/// use tally_core::{ExpenseRecord, Money};
///
/// let records = [ExpenseRecord::equal(Money::from_cents(12000), "A", ["A", "B", "C"])];
/// let rows = aggregate(&records).balances();
///
/// assert_eq!(rows[0].person, "A");
/// assert_eq!(rows[0].balance, Money::from_cents(8000));
/// assert_eq!(rows[1].balance, Money::from_cents(-4000));
/// ```
pub fn aggregate<'a, I>(records: I) -> BalanceSheet
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records.into_iter().collect()
}

/// Sorted, de-duplicated union of every payer and participant.
pub fn people<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut names: Vec<String> = records
        .into_iter()
        .flat_map(|r| r.people().map(str::to_string))
        .collect();
    names.sort();
    names.dedup();
    names
}

// =============================================================================
// Unit Tests
// =============================================================================
