//! # tally
//!
//! Prints balances and settlements for a ledger file.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        tally Startup                                    │
//! │                                                                         │
//! │  1. Parse flags ──► 2. Load TallyConfig ──► 3. Init tracing            │
//! │                         (file + env)            (stderr)               │
//! │                                                                         │
//! │  4. Read ledger ──► 5. ExpenseBook::create per entry                   │
//! │                        (invalid entries reported, skipped)             │
//! │                                                                         │
//! │  6. book.summary() ──► 7. Render text / JSON to stdout                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod ledger_file;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use tally_book::ExpenseBook;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{ReportFormat, TallyConfig};
use crate::error::{CliError, CliResult};

// =============================================================================
// Arguments
// =============================================================================

/// Parsed command-line flags. `None` means "use the config value".
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    ledger: Option<PathBuf>,
    format: Option<ReportFormat>,
    help: bool,
}

const USAGE: &str = "\
Tally - shared expense ledger

Usage: tally [OPTIONS]

Options:
  -c, --config <PATH>    Config file (default: platform config dir/tally.toml)
  -l, --ledger <PATH>    Ledger file with [[expense]] entries (default: ledger.toml)
  -f, --format <FORMAT>  Report format: text or json (default: text)
  -h, --help             Show this help message

Environment:
  TALLY_LEDGER, TALLY_FORMAT, TALLY_LOG, RUST_LOG";

fn parse_args<I>(args: I) -> CliResult<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => parsed.config = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--ledger" | "-l" => parsed.ledger = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--format" | "-f" => parsed.format = Some(value_for(&arg, args.next())?.parse()?),
            "--help" | "-h" => parsed.help = true,
            other => return Err(CliError::Usage(format!("Unknown option: {}", other))),
        }
    }

    Ok(parsed)
}

fn value_for(flag: &str, value: Option<String>) -> CliResult<String> {
    value.ok_or_else(|| CliError::Usage(format!("{} needs a value", flag)))
}

// =============================================================================
// Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    match run(std::env::args().skip(1)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run<I>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = String>,
{
    let args = parse_args(args)?;
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let mut config = TallyConfig::load(args.config.as_deref())?;
    if let Some(ledger) = args.ledger {
        config.ledger.path = ledger;
    }
    if let Some(format) = args.format {
        config.report.format = format;
    }
    config.validate()?;

    init_tracing(&config.logging.filter);
    info!(
        ledger = %config.ledger.path.display(),
        format = %config.report.format,
        "Configuration loaded"
    );

    let ledger = ledger_file::read_ledger(&config.ledger.path)?;
    let book = ExpenseBook::new();
    let loaded = ledger_file::load_into(&book, ledger).await;
    for (number, err) in &loaded.skipped {
        eprintln!("skipped expense #{}: {}", number, err);
    }

    let summary = book.summary().await;
    debug!(people = summary.people.len(), "Rendering report");
    println!("{}", report::render(&summary, config.report.format)?.trim_end());

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - otherwise the `[logging] filter` / `TALLY_LOG` value
/// - Default: `info,tally=debug`
///
/// Logs go to stderr so JSON reports on stdout stay parseable.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_all_flags() {
        let parsed = parse_args(args(&["-c", "my.toml", "--ledger", "trip.toml", "-f", "json"])).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("my.toml")));
        assert_eq!(parsed.ledger, Some(PathBuf::from("trip.toml")));
        assert_eq!(parsed.format, Some(ReportFormat::Json));
        assert!(!parsed.help);
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(parse_args(args(&[])).unwrap(), CliArgs::default());
        assert!(parse_args(args(&["-h"])).unwrap().help);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_args(args(&["--ledger"])), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args(&["--verbose"])), Err(CliError::Usage(_))));
        assert!(matches!(
            parse_args(args(&["--format", "yaml"])),
            Err(CliError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_help_short_circuits() {
        assert!(run(args(&["--help"])).await.is_ok());
    }
}
