//! # Tally Configuration
//!
//! Where the ledger lives, how the report is printed and what gets logged.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --ledger trip.toml  --format json                                  │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TALLY_LEDGER=trip.toml                                             │
//! │     TALLY_FORMAT=json                                                  │
//! │     TALLY_LOG=debug                                                    │
//! │                                                                         │
//! │  3. TOML Config File (--config, or the platform config dir)            │
//! │     ~/.config/tally/tally.toml (Linux)                                 │
//! │     ~/Library/Application Support/dev.tally.tally/tally.toml (macOS)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     ledger.toml, text report, info logging                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tally.toml
//! [ledger]
//! path = "~/trips/lisbon.toml"
//!
//! [report]
//! format = "text"  # text | json
//!
//! [logging]
//! filter = "info,tally=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Report Format
// =============================================================================

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Aligned tables for a terminal.
    #[default]
    Text,

    /// One pretty-printed JSON document.
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "table" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(CliError::InvalidConfig(format!(
                "Unknown report format: {} (expected text or json)",
                s
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Ledger file with `[[expense]]` entries.
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("ledger.toml")
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default)]
    pub format: ReportFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives. `RUST_LOG` wins over this when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

pub fn default_log_filter() -> String {
    "info,tally=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Tally Config
// =============================================================================

/// Complete configuration for the `tally` binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub ledger: LedgerSettings,

    #[serde(default)]
    pub report: ReportSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl TallyConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`tally.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file at the default location is not.
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses one TOML config file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CliError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.ledger.path.as_os_str().is_empty() {
            return Err(CliError::InvalidConfig("ledger path must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `TALLY_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any variable source.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides_from<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("TALLY_LEDGER") {
            debug!(path = %path, "Overriding ledger path from environment");
            self.ledger.path = PathBuf::from(path);
        }

        if let Some(format) = var("TALLY_FORMAT") {
            match format.parse() {
                Ok(parsed) => {
                    debug!(format = %format, "Overriding report format from environment");
                    self.report.format = parsed;
                }
                Err(_) => warn!(format = %format, "Unknown report format in environment"),
            }
        }

        if let Some(filter) = var("TALLY_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "tally", "tally")
            .map(|dirs| dirs.config_dir().join("tally.toml"))
    }
}
