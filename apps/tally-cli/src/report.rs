//! # Report Rendering
//!
//! Turns a [`LedgerSummary`] into text tables or a JSON document.
//!
//! ```text
//! People: A, B, C
//!
//! Balances
//!   Person       Spent       Owed    Balance
//!   A           120.00      40.00      80.00
//!   B             0.00      40.00     -40.00
//!   C             0.00      40.00     -40.00
//!
//! Settlements
//!   B pays A 40.00
//!   C pays A 40.00
//! ```

use std::fmt::Write;

use tally_core::LedgerSummary;

use crate::config::ReportFormat;
use crate::error::{CliError, CliResult};

const AMOUNT_WIDTH: usize = 10;

/// Renders the summary in the requested format.
pub fn render(summary: &LedgerSummary, format: ReportFormat) -> CliResult<String> {
    match format {
        ReportFormat::Text => render_text(summary),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
    }
}

fn render_text(summary: &LedgerSummary) -> CliResult<String> {
    let mut out = String::new();
    text(&mut out, summary).map_err(|e| CliError::Render(e.to_string()))?;
    Ok(out)
}

fn text(out: &mut String, summary: &LedgerSummary) -> std::fmt::Result {
    if summary.people.is_empty() {
        return writeln!(out, "No expenses recorded.");
    }

    writeln!(out, "People: {}", summary.people.join(", "))?;
    writeln!(out)?;

    let name_width = summary
        .balances
        .iter()
        .map(|row| row.person.chars().count())
        .chain(std::iter::once("Person".len()))
        .max()
        .unwrap_or(0);

    writeln!(out, "Balances")?;
    writeln!(
        out,
        "  {:<name_width$} {:>w$} {:>w$} {:>w$}",
        "Person",
        "Spent",
        "Owed",
        "Balance",
        w = AMOUNT_WIDTH
    )?;
    for row in &summary.balances {
        writeln!(
            out,
            "  {:<name_width$} {:>w$} {:>w$} {:>w$}",
            row.person,
            row.spent.to_string(),
            row.owed.to_string(),
            row.balance.to_string(),
            w = AMOUNT_WIDTH
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Settlements")?;
    if summary.settlements.is_empty() {
        writeln!(out, "  All settled.")?;
    }
    for settlement in &summary.settlements {
        writeln!(out, "  {}", settlement)?;
    }

    Ok(())
}
