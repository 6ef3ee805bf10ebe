//! # Ledger File
//!
//! Reads `[[expense]]` entries from TOML and feeds them to an [`ExpenseBook`].
//!
//! ## File Format
//! ```toml
//! [[expense]]
//! description = "Dinner"
//! amount = "120.00"
//! paid_by = "Alice"
//! participants = ["Alice", "Bob", "Charlie"]
//!
//! [[expense]]
//! description = "Museum"
//! amount = 100
//! paid_by = "Bob"
//! participants = ["Alice", "Bob", "Charlie"]
//! split = "percentage"
//! shares = { Alice = 40, Bob = 40, Charlie = 20 }
//! category = "culture"
//! ```
//!
//! Amounts and shares may be strings or numbers. Strings are exact; TOML
//! floats go through `f64` first.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use tally_book::{BookError, ExpenseBook, NewExpense};
use tally_core::{Money, Shares, SplitKind};

use crate::error::{CliError, CliResult};

// =============================================================================
// File Shape
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerFile {
    #[serde(default, rename = "expense")]
    pub expenses: Vec<LedgerEntry>,
}

/// One `[[expense]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerEntry {
    pub amount: Money,
    pub description: String,
    pub paid_by: String,
    pub participants: Vec<String>,
    #[serde(default)]
    pub split: SplitKind,
    #[serde(default)]
    pub shares: Option<Shares>,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<LedgerEntry> for NewExpense {
    fn from(entry: LedgerEntry) -> Self {
        NewExpense {
            amount: entry.amount,
            description: entry.description,
            payer: entry.paid_by,
            participants: entry.participants,
            split: entry.split,
            shares: entry.shares,
            category: entry.category,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Reads and parses a ledger file.
pub fn read_ledger(path: &Path) -> CliResult<LedgerFile> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::LedgerRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_ledger(&contents, path)
}

/// Parses ledger TOML. `path` is only used in error messages.
pub fn parse_ledger(contents: &str, path: &Path) -> CliResult<LedgerFile> {
    let ledger: LedgerFile = toml::from_str(contents).map_err(|e| CliError::LedgerParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    debug!(entries = ledger.expenses.len(), "Parsed ledger file");
    Ok(ledger)
}

/// Outcome of feeding a ledger into a book.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,

    /// 1-based entry number and why it was refused.
    pub skipped: Vec<(usize, BookError)>,
}

/// Creates every entry through the book. Invalid entries are skipped.
pub async fn load_into(book: &ExpenseBook, ledger: LedgerFile) -> LoadReport {
    let mut report = LoadReport::default();

    for (index, entry) in ledger.expenses.into_iter().enumerate() {
        let number = index + 1;
        match book.create(entry.into()).await {
            Ok(_) => report.loaded += 1,
            Err(err) => {
                warn!(entry = number, error = %err, "Skipping ledger entry");
                report.skipped.push((number, err));
            }
        }
    }

    info!(
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "Ledger loaded"
    );
    report
}
