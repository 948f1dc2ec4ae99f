//! Error types for configuration loading, merging and validation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The caller's Static Web Apps config tried to set a field the adapter owns.
    #[error("customStaticWebAppConfig cannot override {field}.")]
    InvalidCustomConfig { field: String },

    // Config parsing/loading errors
    #[error("config not found")]
    NotFound,

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, hint: impl ToString) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            hint: hint.to_string(),
        }
    }
}
