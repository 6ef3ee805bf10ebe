//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Anything that rejects a write                   │
//! │  ├── SplitError       - The split definition is inconsistent            │
//! │  └── ValidationError  - A single field is malformed                     │
//! │                                                                         │
//! │  tally-book errors (separate crate)                                    │
//! │  └── BookError        - Not found / rejected write                      │
//! │                                                                         │
//! │  Flow: SplitError → CoreError → BookError → CLI message                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Balance aggregation and settlement reduction never return these. They
//! are raised only on the validation boundary, before a record is stored.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::money::Money;
use crate::types::SplitKind;

// =============================================================================
// Core Error
// =============================================================================

/// Errors that reject an expense write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The split definition is inconsistent (wraps SplitError).
    #[error("Invalid split: {0}")]
    InvalidSplit(#[from] SplitError),

    /// A field failed validation (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Split Error
// =============================================================================

/// Reasons an expense's split configuration is rejected.
///
/// ## User Workflow
/// ```text
/// Add expense: 90.00 exact, shares {A: 50, B: 50}
///      │
///      ▼
/// validate_record()
///      │
///      ▼
/// ShareSumMismatch { kind: Exact, expected: 90, actual: 100 }
///      │
///      ▼
/// UI shows: "exact shares must sum to 90, got 100"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Amount is zero or negative.
    #[error("Amount must be positive, got {amount}")]
    InvalidAmount { amount: Money },

    /// Amount is larger than the ledger can total without overflow.
    #[error("Amount must be at most {max}, got {amount}")]
    AmountTooLarge { amount: Money, max: Money },

    /// No participants at all.
    #[error("At least one participant is required")]
    EmptyParticipants,

    /// A payer or participant name is empty or whitespace.
    #[error("{field} must not be blank")]
    BlankName { field: String },

    /// Payer is not one of the participants.
    #[error("Payer '{payer}' must be one of the participants")]
    PayerNotParticipant { payer: String },

    /// Shares were supplied for an equal split.
    #[error("Shares should not be provided for an equal split")]
    UnexpectedShares,

    /// Some participants have no share.
    #[error("Missing shares for participants: {}", .names.join(", "))]
    MissingShares { names: Vec<String> },

    /// Shares name people who are not participants.
    #[error("Shares provided for non-participants: {}", .names.join(", "))]
    ExtraShares { names: Vec<String> },

    /// A share is too large in magnitude to compute with.
    #[error("Share for '{name}' must be between -{max} and {max}, got {value}")]
    ShareOutOfRange {
        name: String,
        value: Decimal,
        max: Money,
    },

    /// Shares do not add up to 100 (percentage) or the amount (exact).
    #[error("{kind} shares must sum to {expected}, got {actual}")]
    ShareSumMismatch {
        kind: SplitKind,
        expected: Money,
        actual: Money,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g. an amount that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result of a split check.
pub type SplitResult<T> = Result<T, SplitError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_error_messages() {
        let err = SplitError::ShareSumMismatch {
            kind: SplitKind::Exact,
            expected: Money::from_cents(9000),
            actual: Money::from_cents(10000),
        };
        assert_eq!(err.to_string(), "exact shares must sum to 90.00, got 100.00");

        let err = SplitError::MissingShares {
            names: vec!["Bob".to_string(), "Carol".to_string()],
        };
        assert_eq!(err.to_string(), "Missing shares for participants: Bob, Carol");

        let err = SplitError::PayerNotParticipant {
            payer: "Dave".to_string(),
        };
        assert_eq!(err.to_string(), "Payer 'Dave' must be one of the participants");

        let err = SplitError::AmountTooLarge {
            amount: Money::from_cents(500),
            max: Money::from_cents(100),
        };
        assert_eq!(err.to_string(), "Amount must be at most 1.00, got 5.00");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "description".to_string(),
        };
        assert_eq!(err.to_string(), "description is required");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core: CoreError = SplitError::UnexpectedShares.into();
        assert!(matches!(core, CoreError::InvalidSplit(SplitError::UnexpectedShares)));

        let core: CoreError = ValidationError::Required {
            field: "description".to_string(),
        }
        .into();
        assert!(matches!(core, CoreError::Validation(_)));
    }
}
