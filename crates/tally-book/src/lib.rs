//! # tally-book: Expense Book for Tally
//!
//! This crate owns the expense records. Every write goes through the split
//! validator from `tally-core`; every query runs the pure engine on a
//! consistent snapshot.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Data Flow                                  │
//! │                                                                         │
//! │  tally CLI (ledger file entries)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tally-book (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  ExpenseBook  │    │    Expense    │    │  BookError   │  │   │
//! │  │   │   (book.rs)   │    │ (expense.rs)  │    │  (error.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ RwLock<Vec>   │◄───│ NewExpense    │    │ NotFound     │  │   │
//! │  │   │ create/update │    │ ExpensePatch  │    │ Rejected     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │ snapshot                                                       │
//! │       ▼                                                                 │
//! │  tally-core::summarize()                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_book::{ExpenseBook, NewExpense};
//! use tally_core::Money;
//!
//! let book = ExpenseBook::new();
//! book.create(NewExpense::equal(Money::from_cents(12000), "Dinner", "A", ["A", "B", "C"])).await?;
//!
//! for s in book.settlements().await {
//!     println!("{s}");
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod book;
pub mod error;
pub mod expense;

// =============================================================================
// Re-exports
// =============================================================================

pub use book::ExpenseBook;
pub use error::{BookError, BookResult};
pub use expense::{Expense, ExpensePatch, NewExpense};
