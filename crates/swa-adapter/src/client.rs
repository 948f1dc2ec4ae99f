//! Static asset staging.
//!
//! Copies prerendered pages and client assets into the static directory,
//! then re-runs the bundler over the client scripts so their source maps
//! point back at the original sources.

use std::path::Path;

use serde_json::{json, Map, Value};
use swa_config::{plugin, AdapterOptions, BundleConfig};
use tracing::info;

use crate::builder::Builder;
use crate::bundler::{report_warnings, BundleOutput, Bundler};
use crate::error::Result;
use crate::sourcemap::list_files;

pub const CLIENT_EXTERNAL: &[&str] = &["@azure/functions"];

/// Bundle config re-processing every `*.js` under `client_dir` into `out_dir`.
///
/// Each script becomes an entry named by its path without extension, so
/// `nested/foo.js` is written back to `<out_dir>/nested/foo.js`. Scripts
/// are transformed one by one rather than bundled together.
pub fn client_bundle_config(client_dir: &Path, out_dir: &Path) -> BundleConfig {
    let defaults = BundleConfig::from(object(json!({
        "external": CLIENT_EXTERNAL,
        "output": {
            "format": "esm",
            "sourcemap": true
        },
        "plugins": [plugin("sourcemaps", json!({}))]
    })));

    let input: Map<String, Value> = list_files(client_dir, |f| f.ends_with(".js"))
        .into_iter()
        .map(|file| {
            let name = file.strip_suffix(".js").unwrap_or(&file).to_string();
            let path = client_dir.join(&file).to_string_lossy().into_owned();
            (name, Value::from(path))
        })
        .collect();

    let call = BundleConfig::from(object(json!({
        "input": input,
        "output": { "dir": out_dir.to_string_lossy() },
        "bundle": false
    })));

    defaults.merge(&call)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Stage static assets into `out_dir`.
pub async fn bundle_client(
    builder: &dyn Builder,
    bundler: &dyn Bundler,
    out_dir: &Path,
    options: &AdapterOptions,
) -> Result<BundleOutput> {
    clean_out_dir(builder, out_dir, options)?;

    info!("Writing prerendered files to {}", out_dir.display());
    builder.write_prerendered(out_dir)?;

    info!("Writing client files to {}", out_dir.display());
    builder.write_client(out_dir)?;

    let config = client_bundle_config(&builder.client_dir(), out_dir);
    let has_scripts = config
        .get("input")
        .and_then(Value::as_object)
        .is_some_and(|input| !input.is_empty());
    if !has_scripts {
        info!("No client scripts to re-bundle");
        return Ok(BundleOutput::default());
    }

    info!("Re-bundling client to correct sourcemaps in {}", out_dir.display());
    let output = bundler.bundle(&config).await?;
    report_warnings(&config, &output);
    Ok(output)
}

fn clean_out_dir(builder: &dyn Builder, out_dir: &Path, options: &AdapterOptions) -> Result<()> {
    match &options.static_dir {
        Some(_) if options.should_clean_static_dir() => {
            info!("Cleaning up custom static output directory: {}", out_dir.display());
            builder.rimraf(out_dir)
        }
        Some(_) => Ok(()),
        None => builder.rimraf(out_dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn inputs_are_keyed_by_path_without_extension() {
        let tmp = TempDir::new().unwrap();
        let client = tmp.path().join("client");
        fs::create_dir_all(client.join("_app/immutable/nodes")).unwrap();
        fs::write(client.join("_app/immutable/nodes/0.js"), "").unwrap();
        fs::write(client.join("_app/version.json"), "{}").unwrap();
        fs::write(client.join("sw.js"), "").unwrap();

        let config = client_bundle_config(&client, &tmp.path().join("out"));
        let input = config.get("input").and_then(Value::as_object).unwrap();

        let keys: Vec<_> = input.keys().map(String::as_str).collect();
        assert_eq!(keys, ["_app/immutable/nodes/0", "sw"]);
        assert_eq!(
            input["sw"],
            json!(client.join("sw.js").to_string_lossy())
        );
        assert_eq!(config.external(), CLIENT_EXTERNAL);
        assert_eq!(config.output_str("format"), Some("esm"));
        assert_eq!(config.get("bundle"), Some(&json!(false)));
    }
}
