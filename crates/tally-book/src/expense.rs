//! # Expense Entity
//!
//! The stored expense and the two shapes that change it: [`NewExpense`] for
//! creation and [`ExpensePatch`] for partial updates.
//!
//! ## Update Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Merge, Then Validate                               │
//! │                                                                         │
//! │  stored Expense          ExpensePatch                                   │
//! │  amount      120.00      amount      -                                  │
//! │  split       equal       split       -                                  │
//! │  category    -           category    "food"   ← only this changes      │
//! │       │                       │                                         │
//! │       └──────────┬────────────┘                                         │
//! │                  ▼                                                      │
//! │           merged candidate ──► validate_record() on ALL fields          │
//! │                                                                         │
//! │  A patch never skips validation because its own fields look harmless.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tally_core::validation::{dedupe_participants, validate_description};
use tally_core::{validate_record, CoreResult, ExpenseRecord, Money, Shares, SplitKind};

// =============================================================================
// Expense
// =============================================================================

/// A stored expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Generated on creation, never reused.
    pub id: Uuid,

    /// What the money was spent on. Never blank.
    pub description: String,

    /// Free-form grouping such as "food" or "travel".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// The part the ledger engine reads.
    #[serde(flatten)]
    pub record: ExpenseRecord,

    /// Set once on creation.
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Checks every field of the expense, not just the record.
    pub fn validate(&self) -> CoreResult<()> {
        validate_description(&self.description)?;
        validate_record(&self.record)?;
        Ok(())
    }
}

/// Blank categories are stored as no category.
fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

// =============================================================================
// New Expense
// =============================================================================

/// Input for creating an expense.
///
/// `shares: None` and an empty map mean the same thing: no shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: Money,
    pub description: String,
    pub payer: String,
    pub participants: Vec<String>,
    #[serde(default)]
    pub split: SplitKind,
    #[serde(default)]
    pub shares: Option<Shares>,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewExpense {
    /// Starts an equal split; use the `with_*` methods for the rest.
    pub fn equal<I, S>(
        amount: Money,
        description: impl Into<String>,
        payer: impl Into<String>,
        participants: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NewExpense {
            amount,
            description: description.into(),
            payer: payer.into(),
            participants: participants.into_iter().map(Into::into).collect(),
            split: SplitKind::Equal,
            shares: None,
            category: None,
        }
    }

    /// Switches to a share-based split.
    pub fn with_shares(mut self, split: SplitKind, shares: Shares) -> Self {
        self.split = split;
        self.shares = Some(shares);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builds the engine record, participants de-duplicated.
    pub fn to_record(&self) -> ExpenseRecord {
        ExpenseRecord::new(
            self.amount,
            self.payer.clone(),
            self.participants.iter().cloned(),
            self.split,
            self.shares.clone().unwrap_or_default(),
        )
    }

    /// Validates and stamps a new expense.
    pub fn into_expense(self, id: Uuid, created_at: DateTime<Utc>) -> CoreResult<Expense> {
        let expense = Expense {
            id,
            record: self.to_record(),
            description: self.description.trim().to_string(),
            category: normalize_category(self.category),
            created_at,
        };
        expense.validate()?;
        Ok(expense)
    }
}

// =============================================================================
// Expense Patch
// =============================================================================

/// A partial update. `None` leaves the stored value alone.
///
/// ## Clearing
/// - `shares: Some(Shares::new())` removes the stored shares, which is what
///   switching a percentage or exact split back to equal needs.
/// - `category: Some(None)` removes the category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub payer: Option<String>,
    pub participants: Option<Vec<String>>,
    pub split: Option<SplitKind>,
    pub shares: Option<Shares>,
    pub category: Option<Option<String>>,
}

impl ExpensePatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == ExpensePatch::default()
    }

    /// Merges the patch onto `current` and validates the whole result.
    ///
    /// `id` and `created_at` are carried over. `current` is never modified.
    pub fn apply_to(&self, current: &Expense) -> CoreResult<Expense> {
        let mut merged = current.clone();

        if let Some(amount) = self.amount {
            merged.record.amount = amount;
        }
        if let Some(description) = &self.description {
            merged.description = description.trim().to_string();
        }
        if let Some(payer) = &self.payer {
            merged.record.payer = payer.clone();
        }
        if let Some(participants) = &self.participants {
            merged.record.participants = dedupe_participants(participants.iter().cloned());
        }
        if let Some(split) = self.split {
            merged.record.split = split;
        }
        if let Some(shares) = &self.shares {
            merged.record.shares = shares.clone();
        }
        if let Some(category) = &self.category {
            merged.category = normalize_category(category.clone());
        }

        merged.validate()?;
        Ok(merged)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
