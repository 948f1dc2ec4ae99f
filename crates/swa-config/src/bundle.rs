//! Bundler configuration tree and the merge rules used to build it.
//!
//! A [`BundleConfig`] is the plain key/value object handed to the bundler:
//! `input`, `output`, `plugins`, `external`, `suppressWarnings`, `platform`
//! and `target`. Each bundling pass starts from a tool default and layers a
//! call-specific config on top with [`BundleConfig::merge`]:
//!
//! | base    | overlay | result                          |
//! |---------|---------|---------------------------------|
//! | object  | object  | merged key by key (recursive)   |
//! | list    | list    | `base ++ overlay`               |
//! | any     | absent  | base kept                       |
//! | any     | other   | overlay replaces (incl. `null`) |
//!
//! Type mismatches never fail: the overlay wins outright.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{ConfigError, Result};

const EXTERNAL: &str = "external";
const PLUGINS: &str = "plugins";
const OUTPUT: &str = "output";
const SUPPRESS_WARNINGS: &str = "suppressWarnings";

/// Merge `overlay` into `target` in place.
///
/// Objects merge recursively, two lists concatenate with the target's items
/// first, and every other combination replaces the target with the overlay.
pub fn merge_values(target: &mut Value, overlay: &Value) {
    match (target, overlay) {
        (Value::Object(target_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match target_map.get_mut(key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target_items), Value::Array(overlay_items)) => {
            target_items.extend(overlay_items.iter().cloned());
        }
        (target_slot, _) => {
            *target_slot = overlay.clone();
        }
    }
}

/// Build a plugin descriptor (`{"name": .., "options": ..}`).
pub fn plugin(name: &str, options: Value) -> Value {
    json!({ "name": name, "options": options })
}

/// Configuration object passed to a bundler invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleConfig(Map<String, Value>);

impl BundleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a JSON value. Only objects are accepted.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ConfigError::invalid(
                "bundle",
                format!("expected an object, found {other}"),
            )),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merge `overlay` on top of this config (base first, overlay second).
    pub fn merge(mut self, overlay: &BundleConfig) -> Self {
        for (key, value) in &overlay.0 {
            match self.0.get_mut(key) {
                Some(slot) => merge_values(slot, value),
                None => {
                    self.0.insert(key.clone(), value.clone());
                }
            }
        }
        self
    }

    /// Produce the config for one bundler invocation.
    ///
    /// `defaults` and `overlay` are merged, then `external` is recomputed as
    /// the merged list followed by `caller_externals` (duplicates kept), and
    /// finally `transform` may replace the whole result.
    pub fn resolve(
        defaults: BundleConfig,
        overlay: &BundleConfig,
        caller_externals: &[String],
        transform: Option<&BundleTransform>,
    ) -> BundleConfig {
        let mut merged = defaults.merge(overlay);

        let mut external = merged.external();
        external.extend(caller_externals.iter().cloned());
        merged.set_external(external);

        match transform {
            Some(transform) => transform.apply(merged),
            None => merged,
        }
    }

    /// Externalized module ids. A bare string counts as a one-item list.
    pub fn external(&self) -> Vec<String> {
        match self.0.get(EXTERNAL) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(single)) => vec![single.clone()],
            _ => Vec::new(),
        }
    }

    pub fn set_external(&mut self, external: Vec<String>) {
        self.0.insert(
            EXTERNAL.to_string(),
            Value::Array(external.into_iter().map(Value::String).collect()),
        );
    }

    pub fn output(&self) -> Option<&Map<String, Value>> {
        self.0.get(OUTPUT).and_then(Value::as_object)
    }

    /// String field of the `output` block.
    pub fn output_str(&self, key: &str) -> Option<&str> {
        self.output()?.get(key)?.as_str()
    }

    pub fn plugins(&self) -> &[Value] {
        self.0
            .get(PLUGINS)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Options of the first plugin descriptor named `name`.
    pub fn plugin_options(&self, name: &str) -> Option<&Value> {
        self.plugins()
            .iter()
            .find(|p| p.get("name").and_then(Value::as_str) == Some(name))
            .and_then(|p| p.get("options"))
    }

    /// Plugin descriptors with the given name, in order.
    pub fn plugins_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.plugins()
            .iter()
            .filter(move |p| p.get("name").and_then(Value::as_str) == Some(name))
    }

    /// Warning filters from `suppressWarnings`. Malformed entries are skipped.
    pub fn warning_filters(&self) -> Vec<WarningFilter> {
        self.0
            .get(SUPPRESS_WARNINGS)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether a warning with this code/plugin is suppressed by the config.
    pub fn suppresses(&self, code: Option<&str>, plugin: Option<&str>) -> bool {
        self.warning_filters()
            .iter()
            .any(|filter| filter.matches(code, plugin))
    }
}

impl From<Map<String, Value>> for BundleConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Suppresses bundler warnings by code and/or originating plugin.
///
/// Every field that is set must match; a filter with no fields matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
}

impl WarningFilter {
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            plugin: None,
        }
    }

    pub fn plugin_code(plugin: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            plugin: Some(plugin.into()),
        }
    }

    pub fn matches(&self, code: Option<&str>, plugin: Option<&str>) -> bool {
        if self.code.is_none() && self.plugin.is_none() {
            return false;
        }
        let code_ok = self.code.as_deref().is_none_or(|c| code == Some(c));
        let plugin_ok = self.plugin.as_deref().is_none_or(|p| plugin == Some(p));
        code_ok && plugin_ok
    }
}

/// Caller hook run on the merged config; a `Some` non-empty return value
/// replaces it in full.
#[derive(Clone)]
pub struct BundleTransform(Arc<dyn Fn(&BundleConfig) -> Option<BundleConfig> + Send + Sync>);

impl BundleTransform {
    pub fn new(f: impl Fn(&BundleConfig) -> Option<BundleConfig> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn apply(&self, config: BundleConfig) -> BundleConfig {
        match (self.0)(&config) {
            Some(replaced) if !replaced.is_empty() => replaced,
            _ => config,
        }
    }
}

impl fmt::Debug for BundleTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BundleTransform(..)")
    }
}
