//! # Expense Book
//!
//! In-memory expense store with validated writes and snapshot reads.
//!
//! ## Concurrency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Arc<RwLock<Vec<Expense>>>                              │
//! │                                                                         │
//! │  create / update / delete      balances / settlements / people          │
//! │  ─────────────────────────     ─────────────────────────────────        │
//! │  write lock                    read lock                                │
//! │  validate, then swap in        clone the records, release the lock     │
//! │  (nothing stored on error)     run the pure engine on the snapshot     │
//! │                                                                         │
//! │  A query never sees half of a write: it reads one consistent set.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use tally_core::{summarize, ExpenseRecord, LedgerSummary, PersonBalance, Settlement};

use crate::error::{BookError, BookResult};
use crate::expense::{Expense, ExpensePatch, NewExpense};

/// Shared handle to a set of expenses.
///
/// Cloning is cheap and every clone sees the same expenses.
///
/// ## Usage
/// ```rust,ignore
/// let book = ExpenseBook::new();
///
/// let dinner = book.create(new_expense).await?;
/// let summary = book.summary().await;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExpenseBook {
    expenses: Arc<RwLock<Vec<Expense>>>,
}

impl ExpenseBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Validates and stores a new expense.
    pub async fn create(&self, new: NewExpense) -> BookResult<Expense> {
        let expense = match new.into_expense(Uuid::new_v4(), Utc::now()) {
            Ok(expense) => expense,
            Err(err) => {
                warn!(error = %err, "Rejected new expense");
                return Err(err.into());
            }
        };

        self.expenses.write().await.push(expense.clone());

        info!(
            id = %expense.id,
            amount = %expense.record.amount,
            payer = %expense.record.payer,
            split = %expense.record.split,
            "Created expense"
        );
        Ok(expense)
    }

    /// Applies a partial update.
    ///
    /// The patch is merged onto the stored expense and the merged result is
    /// validated in full. On any error the stored expense is untouched.
    pub async fn update(&self, id: Uuid, patch: ExpensePatch) -> BookResult<Expense> {
        let mut expenses = self.expenses.write().await;

        let slot = expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| BookError::not_found(id))?;

        let merged = match patch.apply_to(slot) {
            Ok(merged) => merged,
            Err(err) => {
                warn!(id = %id, error = %err, "Rejected expense update");
                return Err(err.into());
            }
        };

        *slot = merged.clone();

        info!(id = %id, "Updated expense");
        Ok(merged)
    }

    /// Removes an expense and returns it.
    pub async fn delete(&self, id: Uuid) -> BookResult<Expense> {
        let mut expenses = self.expenses.write().await;

        let index = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| BookError::not_found(id))?;
        let removed = expenses.remove(index);

        info!(id = %id, "Deleted expense");
        Ok(removed)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets one expense by ID.
    pub async fn get(&self, id: Uuid) -> BookResult<Expense> {
        self.expenses
            .read()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| BookError::not_found(id))
    }

    /// All expenses, newest first.
    ///
    /// Expenses created in the same instant list the later insert first.
    pub async fn list(&self) -> Vec<Expense> {
        let mut expenses: Vec<Expense> = self.expenses.read().await.iter().rev().cloned().collect();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!(count = expenses.len(), "Listed expenses");
        expenses
    }

    pub async fn len(&self) -> usize {
        self.expenses.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.expenses.read().await.is_empty()
    }

    /// The engine records, copied out under one read lock.
    pub async fn records(&self) -> Vec<ExpenseRecord> {
        self.expenses
            .read()
            .await
            .iter()
            .map(|e| e.record.clone())
            .collect()
    }

    // =========================================================================
    // Ledger Queries
    // =========================================================================

    /// People, balances and settlements from one snapshot.
    pub async fn summary(&self) -> LedgerSummary {
        let records = self.records().await;
        let summary = summarize(&records);

        debug!(
            expenses = records.len(),
            people = summary.people.len(),
            settlements = summary.settlements.len(),
            "Computed ledger summary"
        );
        summary
    }

    /// One balance row per person, sorted by name.
    pub async fn balances(&self) -> Vec<PersonBalance> {
        self.summary().await.balances
    }

    /// Who pays whom to clear every balance.
    pub async fn settlements(&self) -> Vec<Settlement> {
        self.summary().await.settlements
    }

    /// Everyone who paid for or shares any expense, sorted.
    pub async fn people(&self) -> Vec<String> {
        let records = self.records().await;
        tally_core::balance::people(&records)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
