//! # CLI Error Types
//!
//! Everything that can stop the `tally` binary before it prints a report.
//!
//! Invalid ledger entries are not here: they are reported one by one and
//! skipped, the rest of the ledger still gets a report.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for the binary.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Bad command-line arguments.
    #[error("{0}\nRun `tally --help` for usage.")]
    Usage(String),

    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Config parsed but makes no sense.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Ledger Errors
    // =========================================================================
    /// Ledger file could not be read.
    #[error("Failed to read ledger {path}: {source}")]
    LedgerRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ledger file is not valid TOML or has the wrong shape.
    #[error("Failed to parse ledger {path}: {message}")]
    LedgerParse { path: PathBuf, message: String },

    // =========================================================================
    // Output Errors
    // =========================================================================
    #[error("Failed to render report: {0}")]
    Render(String),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ConfigLoadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_points_at_help() {
        let err = CliError::Usage("Unknown option: --nope".into());
        assert!(err.to_string().ends_with("Run `tally --help` for usage."));
    }

    #[test]
    fn test_toml_error_is_config_failure() {
        let err: CliError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(matches!(err, CliError::ConfigLoadFailed(_)));
    }
}
