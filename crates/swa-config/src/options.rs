//! Adapter options.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bundle::{BundleTransform, WarningFilter};
use crate::error::{ConfigError, Result};
use crate::helpers::{is_empty_map, is_false};
use crate::swa::{CustomStaticWebAppConfig, DEFAULT_API_RUNTIME};

/// Options accepted by the adapter.
///
/// Every field is optional; an empty object (or `AdapterOptions::default()`)
/// produces the standard layout under `build/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdapterOptions {
    /// Enables debug output in the generated server function.
    #[serde(skip_serializing_if = "is_false")]
    pub debug: bool,

    /// Output directory for the server function (default `build/server`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_dir: Option<String>,

    /// Whether a custom `apiDir` is cleaned before writing. Defaults to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_api_dir: Option<bool>,

    /// Output directory for static assets (default `build/static`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<String>,

    /// Whether a custom `staticDir` is cleaned before writing. Defaults to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_static_dir: Option<bool>,

    /// Extra module ids left out of the server bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external: Option<Vec<String>>,

    /// Module aliases applied when bundling the server function.
    #[serde(skip_serializing_if = "is_empty_map")]
    pub alias: IndexMap<String, String>,

    /// Bundler warnings to drop in addition to the built-in suppressions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suppress_warnings: Vec<WarningFilter>,

    /// Extra dependencies written into the generated function `package.json`.
    #[serde(skip_serializing_if = "is_empty_map")]
    pub add_dependencies: IndexMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_static_web_app_config: Option<CustomStaticWebAppConfig>,

    /// Permit app routes under `/api`, which the platform reserves.
    #[serde(skip_serializing_if = "is_false")]
    pub allow_reserved_swa_routes: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emulate: Option<EmulateOptions>,

    /// Post-merge hook over the server bundle config. Programmatic only.
    #[serde(skip)]
    pub server_bundle: Option<BundleTransform>,
}

impl AdapterOptions {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid("options", e))
    }

    pub fn should_clean_api_dir(&self) -> bool {
        self.clean_api_dir.unwrap_or(true)
    }

    pub fn should_clean_static_dir(&self) -> bool {
        self.clean_static_dir.unwrap_or(true)
    }

    /// `platform.apiRuntime` from the custom config, or the default runtime.
    pub fn api_runtime(&self) -> String {
        self.custom_static_web_app_config
            .as_ref()
            .and_then(|c| c.platform.as_ref())
            .and_then(|p| p.get("apiRuntime"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_API_RUNTIME)
            .to_string()
    }

    /// Bundler target derived from the API runtime (`node:20` -> `node20`).
    pub fn bundle_target(&self) -> String {
        self.api_runtime().replace(':', "")
    }

    pub fn external(&self) -> &[String] {
        self.external.as_deref().unwrap_or(&[])
    }
}

/// Local emulation of the platform's request context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmulateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<EmulateRole>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_principal: Option<ClientPrincipal>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmulateRole {
    #[default]
    Anonymous,
    Authenticated,
}

/// Identity information the platform attaches to a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPrincipal {
    pub identity_provider: String,
    pub user_id: String,
    pub user_details: String,
    #[serde(default)]
    pub user_roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims: Option<Vec<ClientPrincipalClaim>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPrincipalClaim {
    pub typ: String,
    pub val: String,
}
