//! Property tests for the ledger engine.
//!
//! Generated records are always valid and divide into whole cents, so the
//! balance rows are exact and the checks below can use the strict ±0.01 band.

use proptest::prelude::*;
use rust_decimal::Decimal;

use tally_core::settlement::apply_settlements;
use tally_core::validation::validate_record;
use tally_core::{aggregate, reduce, settle, summarize, ExpenseRecord, Money, Shares, SplitKind};

const NAMES: [&str; 6] = ["Ana", "Ben", "Cai", "Dee", "Eli", "Fay"];

/// Splits `total` into integer parts proportional to `weights`.
/// The first part absorbs the rounding leftover.
fn distribute(total: i64, weights: &[u32]) -> Vec<i64> {
    let sum: i64 = weights.iter().map(|w| i64::from(*w)).sum();
    let mut parts: Vec<i64> = weights
        .iter()
        .map(|w| total * i64::from(*w) / sum)
        .collect();
    let assigned: i64 = parts.iter().sum();
    parts[0] += total - assigned;
    parts
}

fn shares_from(people: &[&str], values: impl Iterator<Item = Decimal>) -> Shares {
    people.iter().map(|p| p.to_string()).zip(values).collect()
}

fn record_strategy() -> impl Strategy<Value = ExpenseRecord> {
    (
        prop::sample::subsequence(NAMES.to_vec(), 1..=NAMES.len()),
        any::<prop::sample::Index>(),
        0u8..3,
        1i64..=500,
        prop::collection::vec(1u32..=4, NAMES.len()),
    )
        .prop_map(|(people, payer, kind, units, weights)| {
            let n = people.len();
            let payer = people[payer.index(n)];
            let weights = &weights[..n];

            match kind {
                // 0.25 per unit per head keeps every share a whole cent
                0 => ExpenseRecord::equal(
                    Money::from_cents(units * 25 * n as i64),
                    payer,
                    people.iter().copied(),
                ),
                1 => {
                    let pct = distribute(20, weights).into_iter().map(|p| Decimal::from(p * 5));
                    ExpenseRecord::new(
                        Money::from_cents(units * 100),
                        payer,
                        people.iter().copied(),
                        SplitKind::Percentage,
                        shares_from(&people, pct),
                    )
                }
                _ => {
                    let cents = distribute(units * 100, weights)
                        .into_iter()
                        .map(|c| Decimal::new(c, 2));
                    ExpenseRecord::new(
                        Money::from_cents(units * 100),
                        payer,
                        people.iter().copied(),
                        SplitKind::Exact,
                        shares_from(&people, cents),
                    )
                }
            }
        })
}

fn ledger_strategy() -> impl Strategy<Value = Vec<ExpenseRecord>> {
    prop::collection::vec(record_strategy(), 0..20)
}

proptest! {
    #[test]
    fn prop_generated_records_validate_idempotently(record in record_strategy()) {
        let first = validate_record(&record);
        prop_assert!(first.is_ok(), "{first:?}");
        prop_assert_eq!(first, validate_record(&record));
    }

    #[test]
    fn prop_balances_ignore_record_order(
        (records, shuffled) in ledger_strategy()
            .prop_flat_map(|records| (Just(records.clone()), Just(records).prop_shuffle()))
    ) {
        prop_assert_eq!(aggregate(&records).balances(), aggregate(&shuffled).balances());
        prop_assert_eq!(summarize(&records).people, summarize(&shuffled).people);
    }

    #[test]
    fn prop_balances_sum_to_zero(records in ledger_strategy()) {
        let rows = aggregate(&records).balances();
        let total: Money = rows.iter().map(|r| r.balance).sum();
        let band = Money::tolerance() * Decimal::from(rows.len().max(1));
        prop_assert!(total.abs() <= band, "total {}", total);
    }

    #[test]
    fn prop_settlements_clear_every_balance(records in ledger_strategy()) {
        let summary = summarize(&records);
        let residual = apply_settlements(&summary.balances, &summary.settlements);
        for (person, net) in &residual {
            prop_assert!(net.is_within_tolerance(Money::ZERO), "{} left with {}", person, net);
        }

        let sheet = aggregate(&records);
        let plan = settle(&sheet);
        for (person, net) in apply_settlements(sheet.iter(), &plan) {
            prop_assert!(net.is_within_tolerance(Money::ZERO), "{} left with {}", person, net);
        }
    }

    #[test]
    fn prop_settlement_count_is_bounded(records in ledger_strategy()) {
        let rows = aggregate(&records).balances();
        let creditors = rows.iter().filter(|r| r.balance > Money::tolerance()).count();
        let debtors = rows.iter().filter(|r| r.balance < -Money::tolerance()).count();
        let plan = reduce(&rows);

        if creditors == 0 || debtors == 0 {
            prop_assert!(plan.is_empty());
        } else {
            prop_assert!(plan.len() <= creditors + debtors - 1);
        }
    }

    #[test]
    fn prop_settlements_flow_from_debtors_to_creditors(records in ledger_strategy()) {
        let summary = summarize(&records);
        for s in &summary.settlements {
            let from = summary.balances.iter().find(|r| r.person == s.from);
            let to = summary.balances.iter().find(|r| r.person == s.to);
            prop_assert!(s.amount > Money::tolerance());
            prop_assert!(from.is_some_and(|r| r.balance.is_negative()));
            prop_assert!(to.is_some_and(|r| r.balance.is_positive()));
        }
    }
}
