//! File-based config discovery for CLI use.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::options::AdapterOptions;

pub const TOML_CONFIG_FILE: &str = "swa-adapter.toml";
pub const JSON_CONFIG_FILE: &str = "swa-adapter.config.json";
pub const PACKAGE_JSON_FIELD: &str = "swaAdapter";

/// Searches a project root for adapter configuration.
///
/// # Example
///
/// ```no_run
/// use swa_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let options = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory.
    ///
    /// Searches in this order:
    /// 1. `swa-adapter.toml`
    /// 2. `swa-adapter.config.json`
    /// 3. `package.json` with a non-null `swaAdapter` field
    pub fn find(&self) -> Option<PathBuf> {
        for name in [TOML_CONFIG_FILE, JSON_CONFIG_FILE] {
            let path = self.root.join(name);
            if path.is_file() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join("package.json");
        let has_field = fs::read_to_string(&pkg_path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .is_some_and(|parsed| {
                parsed
                    .get(PACKAGE_JSON_FIELD)
                    .is_some_and(|field| !field.is_null())
            });
        has_field.then_some(pkg_path)
    }

    /// Raw JSON value of the discovered config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load_value(&self) -> Result<(PathBuf, Value)> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        debug!(path = %path.display(), "loading adapter config");
        let value = load_file(&path)?;
        Ok((path, value))
    }

    pub fn load(&self) -> Result<AdapterOptions> {
        let (_, value) = self.load_value()?;
        AdapterOptions::from_value(value)
    }
}

/// Load a single config file as JSON, picking the parser from its name.
pub fn load_file(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    if path.file_name() == Some(OsStr::new("package.json")) {
        let parsed: Value = serde_json::from_str(&content)
            .map_err(|e| ConfigError::invalid("package.json", format!("invalid JSON: {e}")))?;
        return match parsed.get(PACKAGE_JSON_FIELD) {
            Some(value) if !value.is_null() => Ok(value.clone()),
            _ => Err(ConfigError::invalid(
                PACKAGE_JSON_FIELD,
                "add a 'swaAdapter' field to your package.json",
            )),
        };
    }

    match path.extension().and_then(OsStr::to_str) {
        Some("toml") => {
            let parsed: toml::Value = toml::from_str(&content)
                .map_err(|e| ConfigError::invalid("toml", format!("invalid TOML syntax: {e}")))?;
            serde_json::to_value(parsed).map_err(|e| {
                ConfigError::invalid("toml", format!("TOML to JSON conversion failed: {e}"))
            })
        }
        Some("json") => serde_json::from_str(&content)
            .map_err(|e| ConfigError::invalid("json", format!("invalid JSON: {e}"))),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or_default().to_string(),
        )),
    }
}

/// Discover and load options from the current directory.
pub fn discover() -> Result<AdapterOptions> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(root).load()
}
