//! # Settlement Reduction
//!
//! Reduces net balances to a short list of debtor → creditor payments.
//!
//! ## Algorithm (two-pointer greedy)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  creditors (balance > 0.01)        debtors (balance < -0.01)            │
//! │  sorted largest first              sorted largest debt first            │
//! │  ┌────────┐                        ┌────────┐                           │
//! │  │ A  80  │ ◄── i                  │ B  40  │ ◄── j                     │
//! │  │        │                        │ C  40  │                           │
//! │  └────────┘                        └────────┘                           │
//! │                                                                         │
//! │  step:  pay = min(creditor[i], debtor[j])                               │
//! │         emit debtor[j] → creditor[i] (if pay > 0.01)                    │
//! │         subtract pay from both                                          │
//! │         i++ if creditor[i] <= 0.01,  j++ if debtor[j] <= 0.01           │
//! │  stop:  either side runs out                                            │
//! │                                                                         │
//! │  Result: B → A 40.00, C → A 40.00                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each step retires at least one person, so the list never exceeds
//! `creditors + debtors - 1` entries. It is not always the true minimum
//! (that is a subset-sum search), just a fast, deterministic one.
//!
//! Ties in amount keep person-name order. Emitted amounts are rounded to
//! 2 decimals; the remainders carried between steps are not.

use std::collections::BTreeMap;

use crate::balance::{BalanceSheet, PersonTally};
use crate::money::Money;
use crate::types::{PersonBalance, Settlement};

// =============================================================================
// Net Position
// =============================================================================

/// Anything that can say who a person is and what their net balance is.
///
/// Implemented for the exact tallies of a [`BalanceSheet`] and for the
/// rounded [`PersonBalance`] rows a report shows, so both can be reduced.
pub trait NetPosition {
    fn person(&self) -> &str;

    /// Positive: the group owes them. Negative: they owe the group.
    fn net(&self) -> Money;
}

impl NetPosition for PersonBalance {
    fn person(&self) -> &str {
        &self.person
    }

    fn net(&self) -> Money {
        self.balance
    }
}

impl NetPosition for (&str, &PersonTally) {
    fn person(&self) -> &str {
        self.0
    }

    fn net(&self) -> Money {
        self.1.net()
    }
}

impl<T: NetPosition + ?Sized> NetPosition for &T {
    fn person(&self) -> &str {
        (**self).person()
    }

    fn net(&self) -> Money {
        (**self).net()
    }
}

// =============================================================================
// Reduction
// =============================================================================

/// One side of the match with what is still open.
#[derive(Debug)]
struct Open {
    person: String,
    remaining: Money,
}

/// Computes the settlement list for a set of net positions.
///
/// Total over any input: no positions, or everyone within ±0.01, gives an
/// empty list.
///
/// ## Example
/// ```rust
/// use tally_core::settlement::reduce;
/// use tally_core::{Money, PersonBalance};
///
/// let row = |p: &str, cents| PersonBalance {
///     person: p.to_string(),
///     spent: Money::ZERO,
///     owed: Money::ZERO,
///     balance: Money::from_cents(cents),
/// };
/// let plan = reduce(&[row("A", 8000), row("B", -4000), row("C", -4000)]);
///
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan[0].to_string(), "B pays A 40.00");
/// assert_eq!(plan[1].to_string(), "C pays A 40.00");
/// ```
pub fn reduce<I, P>(positions: I) -> Vec<Settlement>
where
    I: IntoIterator<Item = P>,
    P: NetPosition,
{
    let tolerance = Money::tolerance();

    let mut entries: Vec<(String, Money)> = positions
        .into_iter()
        .map(|p| (p.person().to_string(), p.net()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut creditors: Vec<Open> = entries
        .iter()
        .filter(|(_, net)| *net > tolerance)
        .map(|(person, net)| Open {
            person: person.clone(),
            remaining: *net,
        })
        .collect();
    let mut debtors: Vec<Open> = entries
        .iter()
        .filter(|(_, net)| *net < -tolerance)
        .map(|(person, net)| Open {
            person: person.clone(),
            remaining: net.abs(),
        })
        .collect();

    // Stable sorts: equal amounts stay in name order.
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut settlements = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < creditors.len() && j < debtors.len() {
        let creditor = &mut creditors[i];
        let debtor = &mut debtors[j];

        let amount = creditor.remaining.min(debtor.remaining);
        if amount > tolerance {
            settlements.push(Settlement {
                from: debtor.person.clone(),
                to: creditor.person.clone(),
                amount: amount.round_half_up(),
            });
        }

        creditor.remaining -= amount;
        debtor.remaining -= amount;

        if creditor.remaining <= tolerance {
            i += 1;
        }
        if debtor.remaining <= tolerance {
            j += 1;
        }
    }

    settlements
}

/// Settles an exact balance sheet.
pub fn settle(sheet: &BalanceSheet) -> Vec<Settlement> {
    reduce(sheet.iter())
}

/// Net balances left after every settlement is paid.
///
/// The payer's balance rises by the amount, the payee's falls by it.
/// A correct plan leaves every entry within ±0.01.
pub fn apply_settlements<I, P>(positions: I, settlements: &[Settlement]) -> BTreeMap<String, Money>
where
    I: IntoIterator<Item = P>,
    P: NetPosition,
{
    let mut nets: BTreeMap<String, Money> = positions
        .into_iter()
        .map(|p| (p.person().to_string(), p.net()))
        .collect();

    for s in settlements {
        *nets.entry(s.from.clone()).or_default() += s.amount;
        *nets.entry(s.to.clone()).or_default() -= s.amount;
    }

    nets
}

// =============================================================================
// Unit Tests
// =============================================================================
