//! `staticwebapp.config.json` generation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// Directory (and function name) of the generated server function.
pub const SERVER_FUNC_DIR_NAME: &str = "sk_render";

/// Route every dynamic request is rewritten to.
pub const SSR_FUNC_ROUTE: &str = "/api/sk_render";

pub const DEFAULT_API_RUNTIME: &str = "node:20";

pub const IMMUTABLE_CACHE_CONTROL: &str = "public, immutable, max-age=31536000";

/// A single routing rule of the platform config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub route: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_roles: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Route {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Self::default()
        }
    }

    pub fn rewrite_to(route: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            rewrite: Some(target.into()),
            ..Self::new(route)
        }
    }
}

/// Caller-supplied platform config. Keys other than the named ones are
/// passed through to the generated file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomStaticWebAppConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<Route>>,

    /// Owned by the adapter; presence is rejected, even as `null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub navigation_fallback: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationFallback {
    pub rewrite: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

/// Generated `staticwebapp.config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticWebAppConfig {
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    pub routes: Vec<Route>,

    pub navigation_fallback: NavigationFallback,

    pub platform: Map<String, Value>,
}

/// Reject caller config that overrides settings the adapter relies on.
pub fn validate_custom_config(config: &CustomStaticWebAppConfig) -> Result<()> {
    if config.navigation_fallback.is_some() {
        return Err(ConfigError::InvalidCustomConfig {
            field: "navigationFallback".to_string(),
        });
    }
    let overrides_wildcard = config
        .routes
        .iter()
        .flatten()
        .any(|route| route.route == "*");
    if overrides_wildcard {
        return Err(ConfigError::InvalidCustomConfig {
            field: "'*' route".to_string(),
        });
    }
    Ok(())
}

/// Build the platform config from the caller's custom config.
///
/// Caller routes come first, followed by the reserved API routes, the
/// mutating-method rewrite, and the immutable asset cache header under
/// `/<app_dir>/immutable/*`.
pub fn generate_config(
    custom: &CustomStaticWebAppConfig,
    app_dir: &str,
) -> Result<StaticWebAppConfig> {
    validate_custom_config(custom)?;

    let mut routes = custom.routes.clone().unwrap_or_default();
    routes.push(Route::new("/api/*"));
    routes.push(Route::new("/data-api/*"));
    routes.push(Route {
        methods: Some(vec!["POST".into(), "PUT".into(), "DELETE".into()]),
        ..Route::rewrite_to("*", SSR_FUNC_ROUTE)
    });
    routes.push(Route {
        headers: Some(IndexMap::from([(
            "cache-control".to_string(),
            IMMUTABLE_CACHE_CONTROL.to_string(),
        )])),
        ..Route::new(format!("/{}/immutable/*", app_dir.trim_start_matches('/')))
    });

    let mut platform = Map::new();
    platform.insert("apiRuntime".into(), Value::from(DEFAULT_API_RUNTIME));
    if let Some(custom_platform) = &custom.platform {
        for (key, value) in custom_platform {
            platform.insert(key.clone(), value.clone());
        }
    }

    Ok(StaticWebAppConfig {
        extra: custom.extra.clone(),
        routes,
        navigation_fallback: NavigationFallback {
            rewrite: SSR_FUNC_ROUTE.to_string(),
            exclude: None,
        },
        platform,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_config_has_adapter_routes() {
        let config = generate_config(&CustomStaticWebAppConfig::default(), "_app").unwrap();

        let routes: Vec<_> = config.routes.iter().map(|r| r.route.as_str()).collect();
        assert_eq!(
            routes,
            ["/api/*", "/data-api/*", "*", "/_app/immutable/*"]
        );
        assert_eq!(config.navigation_fallback.rewrite, SSR_FUNC_ROUTE);
        assert_eq!(config.platform.get("apiRuntime"), Some(&json!("node:20")));
    }

    #[test]
    fn wildcard_route_is_rejected() {
        let custom = CustomStaticWebAppConfig {
            routes: Some(vec![Route::new("*")]),
            ..Default::default()
        };
        let err = generate_config(&custom, "_app").unwrap_err();
        assert_eq!(err.to_string(), "customStaticWebAppConfig cannot override '*' route.");
    }

    #[test]
    fn null_navigation_fallback_is_rejected() {
        let custom: CustomStaticWebAppConfig =
            serde_json::from_value(json!({ "navigationFallback": null })).unwrap();
        let err = generate_config(&custom, "_app").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidCustomConfig { ref field } if field == "navigationFallback"
        ));
    }

    #[test]
    fn leading_slash_in_app_dir_is_trimmed() {
        let config = generate_config(&CustomStaticWebAppConfig::default(), "/_app").unwrap();
        assert_eq!(config.routes[3].route, "/_app/immutable/*");
    }
}
