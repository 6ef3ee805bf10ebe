//! # Book Error Types
//!
//! Error types for expense book operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SplitError / ValidationError (tally-core)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError ──► BookError::Rejected  ← write aborted, book unchanged    │
//! │                                                                         │
//! │  unknown id ──► BookError::NotFound                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (tally binary) ← printed with the ledger entry index         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::{CoreError, SplitError, ValidationError};
use thiserror::Error;
use uuid::Uuid;

/// Expense book errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// No expense with this ID.
    ///
    /// ## When This Occurs
    /// - `get`, `update` or `delete` with an unknown ID
    /// - ID of an expense that was already deleted
    #[error("Expense not found: {id}")]
    NotFound { id: Uuid },

    /// The write would have stored an invalid expense.
    #[error("Expense rejected: {0}")]
    Rejected(#[from] CoreError),
}

impl BookError {
    /// Creates a NotFound error for an expense ID.
    pub fn not_found(id: Uuid) -> Self {
        BookError::NotFound { id }
    }

    /// True when the error came from validation rather than a lookup.
    pub fn is_rejection(&self) -> bool {
        matches!(self, BookError::Rejected(_))
    }
}

impl From<SplitError> for BookError {
    fn from(err: SplitError) -> Self {
        BookError::Rejected(err.into())
    }
}

impl From<ValidationError> for BookError {
    fn from(err: ValidationError) -> Self {
        BookError::Rejected(err.into())
    }
}

/// Result type for book operations.
pub type BookResult<T> = Result<T, BookError>;
