//! Error handling for the CLI.
//!
//! [`CliError`] wraps the library errors and adds the failures only the
//! command line can produce (bad arguments, missing files). Commands return
//! it and `main` turns it into a miette report.
//!
//! # Example
//!
//! ```rust,no_run
//! use swa_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_map(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).context(format!("Failed to read {}", path.display()))
//! }
//! ```

mod report;

use std::path::PathBuf;

use thiserror::Error;

pub use report::{adapter_error_to_miette, cli_error_to_miette};

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating adapter options failed.
    #[error("Configuration error: {0}")]
    Config(#[from] swa_config::ConfigError),

    /// The adapter pipeline failed.
    #[error("Adapter error: {0}")]
    Adapter(#[from] swa_adapter::AdapterError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swa_adapter::AdapterError;
    use swa_config::ConfigError;

    #[test]
    fn config_errors_convert() {
        let err: CliError = ConfigError::InvalidCustomConfig {
            field: "navigationFallback".into(),
        }
        .into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("cannot override navigationFallback"));
    }

    #[test]
    fn adapter_errors_convert() {
        let err: CliError = AdapterError::ConflictingRoutes {
            routes: vec!["/api/blog".into()],
        }
        .into();
        assert!(matches!(err, CliError::Adapter(_)));
    }

    #[test]
    fn context_prefixes() {
        let result: std::result::Result<(), ConfigError> = Err(ConfigError::NotFound);
        let msg = result.context("Failed to load options").unwrap_err().to_string();
        assert!(msg.starts_with("Failed to load options: "));
    }

    #[test]
    fn anyhow_errors_are_transparent() {
        let err: CliError = anyhow::anyhow!("no working directory").into();
        assert_eq!(err.to_string(), "no working directory");
    }
}
