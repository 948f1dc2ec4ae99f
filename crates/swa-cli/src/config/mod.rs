//! Layered adapter options for the CLI.
//!
//! Sources, lowest priority first: built-in defaults, the discovered (or
//! `--config`) file, `SWA_ADAPTER_*` environment variables, command-line
//! flags. Unlike the library types, unknown keys are rejected here so typos
//! in a config file surface as errors.

mod loading;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use swa_config::{
    AdapterOptions, CustomStaticWebAppConfig, EmulateOptions, EmulateRole, WarningFilter,
};

use crate::error::Result;

pub use loading::{env_key_to_field, ENV_PREFIX};

/// Adapter options as written in a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub debug: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_api_dir: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_static_dir: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub alias: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppress_warnings: Vec<WarningFilter>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub add_dependencies: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_static_web_app_config: Option<CustomStaticWebAppConfig>,

    #[serde(default)]
    pub allow_reserved_swa_routes: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emulate: Option<EmulateOptions>,
}

/// Values given on the command line. Only flags that were actually passed
/// are serialized, so unset flags never mask file or environment values.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_dir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_api_dir: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_static_dir: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_reserved_swa_routes: Option<bool>,
}

impl CliOverrides {
    pub fn from_build_args(args: &crate::cli::BuildArgs) -> Self {
        Self {
            debug: args.debug.then_some(true),
            api_dir: args.api_dir.clone(),
            clean_api_dir: args.no_clean_api_dir.then_some(false),
            static_dir: args.static_dir.clone(),
            clean_static_dir: args.no_clean_static_dir.then_some(false),
            external: (!args.external.is_empty()).then(|| args.external.clone()),
            allow_reserved_swa_routes: args.allow_reserved_swa_routes.then_some(true),
        }
    }
}

impl CliConfig {
    /// Convert into the library's options type.
    pub fn into_options(self) -> Result<AdapterOptions> {
        let value = serde_json::to_value(self)?;
        Ok(AdapterOptions::from_value(value)?)
    }

    /// Set `emulate.role`, keeping any configured client principal.
    pub fn set_emulate_role(&mut self, role: EmulateRole) {
        self.emulate.get_or_insert_with(EmulateOptions::default).role = Some(role);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::BuildArgs;
    use serde_json::json;

    #[test]
    fn unset_flags_are_not_serialized() {
        let overrides = CliOverrides::from_build_args(&BuildArgs::default());
        assert_eq!(serde_json::to_value(overrides).unwrap(), json!({}));
    }

    #[test]
    fn negative_flags_disable_cleaning() {
        let args = BuildArgs {
            no_clean_static_dir: true,
            debug: true,
            ..Default::default()
        };
        let overrides = serde_json::to_value(CliOverrides::from_build_args(&args)).unwrap();
        assert_eq!(overrides, json!({ "debug": true, "cleanStaticDir": false }));
    }

    #[test]
    fn converts_to_adapter_options() {
        let config = CliConfig {
            api_dir: Some("functions".into()),
            add_dependencies: IndexMap::from([("pg".to_string(), "^8.11.0".to_string())]),
            ..Default::default()
        };
        let options = config.into_options().unwrap();
        assert_eq!(options.api_dir.as_deref(), Some("functions"));
        assert_eq!(options.add_dependencies.get("pg").map(String::as_str), Some("^8.11.0"));
    }
}
