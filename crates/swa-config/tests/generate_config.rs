//! staticwebapp.config.json generation from caller config.

use serde_json::{json, Value};
use swa_config::{generate_config, ConfigError, CustomStaticWebAppConfig, SSR_FUNC_ROUTE};

fn custom(value: Value) -> CustomStaticWebAppConfig {
    serde_json::from_value(value).unwrap()
}

#[test]
fn caller_routes_come_first() {
    let config = generate_config(
        &custom(json!({
            "routes": [{ "route": "/login", "redirect": "/.auth/login/github" }]
        })),
        "_app",
    )
    .unwrap();

    let routes: Vec<_> = config.routes.iter().map(|r| r.route.as_str()).collect();
    assert_eq!(
        routes,
        ["/login", "/api/*", "/data-api/*", "*", "/_app/immutable/*"]
    );
    assert_eq!(config.routes[0].redirect.as_deref(), Some("/.auth/login/github"));
}

#[test]
fn serialised_shape_matches_platform_format() {
    let config = generate_config(&CustomStaticWebAppConfig::default(), "_app").unwrap();

    assert_eq!(
        serde_json::to_value(&config).unwrap(),
        json!({
            "routes": [
                { "route": "/api/*" },
                { "route": "/data-api/*" },
                { "route": "*", "methods": ["POST", "PUT", "DELETE"], "rewrite": SSR_FUNC_ROUTE },
                {
                    "route": "/_app/immutable/*",
                    "headers": { "cache-control": "public, immutable, max-age=31536000" }
                }
            ],
            "navigationFallback": { "rewrite": SSR_FUNC_ROUTE },
            "platform": { "apiRuntime": "node:20" }
        })
    );
}

#[test]
fn caller_platform_overrides_runtime_and_extra_keys_pass_through() {
    let config = generate_config(
        &custom(json!({
            "platform": { "apiRuntime": "node:18", "extra": 1 },
            "globalHeaders": { "x-frame-options": "DENY" }
        })),
        "_app",
    )
    .unwrap();

    assert_eq!(config.platform.get("apiRuntime"), Some(&json!("node:18")));
    assert_eq!(config.platform.get("extra"), Some(&json!(1)));

    let out = serde_json::to_value(&config).unwrap();
    assert_eq!(out["globalHeaders"], json!({ "x-frame-options": "DENY" }));
}

#[test]
fn navigation_fallback_override_is_rejected() {
    let err = generate_config(
        &custom(json!({ "navigationFallback": { "rewrite": "/index.html" } })),
        "_app",
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::InvalidCustomConfig { .. }));
    assert_eq!(
        err.to_string(),
        "customStaticWebAppConfig cannot override navigationFallback."
    );
}

#[test]
fn non_wildcard_catch_alls_are_allowed() {
    let config = generate_config(&custom(json!({ "routes": [{ "route": "/*" }] })), "_app");
    assert!(config.is_ok());
}
