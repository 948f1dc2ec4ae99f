/// Error types for adapter operations.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// App routes collide with the platform's reserved `/api` prefix.
    #[error("Conflicting routes detected. Please rename the routes listed above.")]
    ConflictingRoutes { routes: Vec<String> },

    /// Invalid adapter or platform configuration.
    #[error(transparent)]
    Config(#[from] swa_config::ConfigError),

    /// The bundler ran but reported failure.
    #[error("Bundling failed: {message}")]
    BundleFailed { message: String },

    /// No bundler executable could be located.
    #[error("esbuild executable not found (searched: {searched})")]
    BundlerNotFound { searched: String },

    /// The bundle config cannot be expressed for this bundler.
    #[error("Unsupported bundle config: {0}")]
    UnsupportedConfig(String),

    /// The framework server manifest could not be produced.
    #[error("Manifest generation failed: {0}")]
    Manifest(String),

    /// An embedded template is missing from the binary.
    #[error("Template not found: {0}")]
    Template(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error with context message.
    #[error("{message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

impl AdapterError {
    pub(crate) fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        AdapterError::IoError {
            message: message.into(),
            source,
        }
    }

    pub(crate) fn bundle_failed(message: impl Into<String>) -> Self {
        AdapterError::BundleFailed {
            message: message.into(),
        }
    }
}
