//! `staticwebapp.config.json` output.

use std::fs;
use std::path::Path;

use swa_config::{generate_config, AdapterOptions, Route, StaticWebAppConfig, SSR_FUNC_ROUTE};
use tracing::info;

use crate::builder::Builder;
use crate::error::{AdapterError, Result};

pub const SWA_CONFIG_FILE: &str = "staticwebapp.config.json";

/// Write `staticwebapp.config.json` into the static directory.
///
/// The platform needs an `index.html` at the root; when `/` was not
/// prerendered an empty placeholder is written and both `/index.html` and
/// `/` are routed to the server function.
pub fn write_swa_config(
    builder: &dyn Builder,
    out_dir: &Path,
    options: &AdapterOptions,
) -> Result<StaticWebAppConfig> {
    info!("Writing {SWA_CONFIG_FILE} to {}", out_dir.display());

    let custom = options.custom_static_web_app_config.clone().unwrap_or_default();
    let mut config = generate_config(&custom, builder.app_dir())?;

    builder.mkdirp(out_dir)?;
    if !builder.prerendered_paths().iter().any(|p| p == "/") {
        let index = out_dir.join("index.html");
        fs::write(&index, "")
            .map_err(|e| AdapterError::io(format!("Failed to write {}", index.display()), e))?;
        config.routes.push(Route::rewrite_to("/index.html", SSR_FUNC_ROUTE));
        config.routes.push(Route::rewrite_to("/", SSR_FUNC_ROUTE));
    }

    let target = out_dir.join(SWA_CONFIG_FILE);
    fs::write(&target, serde_json::to_string_pretty(&config)?)
        .map_err(|e| AdapterError::io(format!("Failed to write {}", target.display()), e))?;
    Ok(config)
}
