use std::ffi::OsStr;
use std::path::Path;

use figment::{
    providers::{Env, Format as _, Json, Serialized, Toml},
    Figment,
};
use swa_config::{ConfigDiscovery, ConfigError};
use tracing::debug;

use crate::commands::utils::resolve_path;
use crate::config::{CliConfig, CliOverrides};
use crate::error::{CliError, Result};

/// Prefix of environment variables read as options (`SWA_ADAPTER_API_DIR`).
pub const ENV_PREFIX: &str = "SWA_ADAPTER_";

impl CliConfig {
    /// Load options for the project at `root`.
    /// Priority: CLI flags > environment variables > config file > defaults
    ///
    /// `config_path` is resolved against `root` and must exist; without it
    /// the root is searched with [`ConfigDiscovery`].
    pub fn load(root: &Path, config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) => {
                let path = resolve_path(path, root);
                if !path.is_file() {
                    return Err(CliError::FileNotFound(path));
                }
                Some(path)
            }
            None => ConfigDiscovery::new(root).find(),
        };

        if let Some(path) = &config_file {
            debug!(path = %path.display(), "loading adapter config");
            figment = merge_file(figment, path)?;
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| env_key_to_field(key.as_str()).into())
                .lowercase(false),
        );

        figment = figment.merge(Serialized::defaults(overrides));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                hint: e.to_string(),
            }
            .into()
        })
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if path.file_name() == Some(OsStr::new("package.json")) {
        let value = swa_config::load_file(path)?;
        return Ok(figment.merge(Serialized::defaults(value)));
    }

    match path.extension().and_then(OsStr::to_str) {
        Some("toml") => Ok(figment.merge(Toml::file(path))),
        Some("json") => Ok(figment.merge(Json::file(path))),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string()).into()),
    }
}

/// Map an environment key (prefix stripped) to its camelCase option name.
///
/// ```
/// use swa_cli::config::env_key_to_field;
///
/// assert_eq!(env_key_to_field("API_DIR"), "apiDir");
/// assert_eq!(env_key_to_field("ALLOW_RESERVED_SWA_ROUTES"), "allowReservedSwaRoutes");
/// ```
pub fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' {
            upper = !field.is_empty();
            continue;
        }
        if upper {
            field.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            field.push(ch.to_ascii_lowercase());
        }
    }
    field
}
