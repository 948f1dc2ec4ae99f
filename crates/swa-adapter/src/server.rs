//! Server function staging.
//!
//! Produces `<api_dir>/sk_render/index.js`: the framework server bundled
//! together with an Azure Functions HTTP entry. With the default API
//! directory the Functions app skeleton (`host.json`, `package.json`) is
//! written next to it.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use swa_config::{plugin, AdapterOptions, BundleConfig, WarningFilter, SERVER_FUNC_DIR_NAME};
use tracing::{info, warn};

use crate::builder::Builder;
use crate::bundler::{report_warnings, BundleOutput, Bundler};
use crate::error::{AdapterError, Result};
use crate::paths::relative_posix;
use crate::templates::{self, ENTRY_FILE, ENTRY_TEMPLATE, FUNCTIONS_TEMPLATE, PACKAGE_JSON};

pub const REQUIRED_EXTERNAL: &[&str] = &["fsevents", "@azure/functions"];

/// Warnings that are noise for a server bundle of framework output.
pub fn default_suppressions() -> Vec<WarningFilter> {
    vec![
        WarningFilter::code("THIS_IS_UNDEFINED"),
        WarningFilter::code("CIRCULAR_DEPENDENCY"),
        WarningFilter::code("SOURCEMAP_ERROR"),
        WarningFilter::plugin_code("sourcemaps", "PLUGIN_WARNING"),
    ]
}

/// Files involved in one server build, all under the scratch directory
/// except the framework's own server output.
#[derive(Debug, Clone)]
pub struct ServerPaths {
    pub server_dir: PathBuf,
    pub server_file: PathBuf,
    /// `server_dir` relative to the scratch directory, `/`-separated.
    pub server_relative_dir: String,
    pub manifest_file: PathBuf,
    pub env_file: PathBuf,
    pub entry_dir: PathBuf,
    pub functions_dir: PathBuf,
}

impl ServerPaths {
    pub fn new(builder: &dyn Builder, tmp_dir: &Path) -> Self {
        let server_dir = builder.server_dir();
        Self {
            server_file: server_dir.join("index.js"),
            server_relative_dir: relative_posix(tmp_dir, &server_dir),
            server_dir,
            manifest_file: tmp_dir.join("manifest.js"),
            env_file: tmp_dir.join("env.js"),
            entry_dir: tmp_dir.join(ENTRY_TEMPLATE),
            functions_dir: tmp_dir.join(FUNCTIONS_TEMPLATE),
        }
    }

    pub fn entry_file(&self) -> PathBuf {
        self.entry_dir.join(ENTRY_FILE)
    }
}

/// Bundle config for the server function.
///
/// Defaults (required externals, ES output with source maps, node platform,
/// target from the API runtime) are merged with the call config (entry,
/// output location, module aliases, warning suppressions). Caller externals
/// are appended afterwards and the `serverBundle` hook runs last.
pub fn server_bundle_config(
    paths: &ServerPaths,
    out_dir: &Path,
    options: &AdapterOptions,
) -> BundleConfig {
    let defaults = json!({
        "external": REQUIRED_EXTERNAL,
        "output": {
            "format": "es",
            "sourcemap": true
        },
        "plugins": [
            plugin("sourcemaps", json!({})),
            plugin("node-resolve", json!({ "preferBuiltins": true, "browser": false })),
            plugin("commonjs", json!({ "strictRequires": true })),
            plugin("json", json!({}))
        ],
        "platform": "node",
        "target": options.bundle_target()
    });

    let mut aliases = Map::new();
    aliases.insert("MANIFEST".into(), path_value(&paths.manifest_file));
    aliases.insert("SERVER".into(), path_value(&paths.server_file));
    aliases.insert("ENV".into(), path_value(&paths.env_file));
    for (find, replacement) in &options.alias {
        aliases.insert(find.clone(), Value::from(replacement.as_str()));
    }

    let mut suppress = default_suppressions();
    suppress.extend(options.suppress_warnings.iter().cloned());

    let call = json!({
        "input": path_value(&paths.entry_file()),
        "output": {
            "dir": path_value(&out_dir.join(SERVER_FUNC_DIR_NAME)),
            "entryFileNames": ENTRY_FILE
        },
        "plugins": [plugin("alias", json!({ "entries": aliases }))],
        "suppressWarnings": suppress
    });

    BundleConfig::resolve(
        bundle_config(defaults),
        &bundle_config(call),
        options.external(),
        options.server_bundle.as_ref(),
    )
}

fn bundle_config(value: Value) -> BundleConfig {
    match value {
        Value::Object(map) => BundleConfig::from(map),
        _ => BundleConfig::new(),
    }
}

fn path_value(path: &Path) -> Value {
    Value::from(path.to_string_lossy().into_owned())
}

/// Stage and bundle the server function into `out_dir`.
pub async fn bundle_server(
    builder: &dyn Builder,
    bundler: &dyn Bundler,
    out_dir: &Path,
    tmp_dir: &Path,
    options: &AdapterOptions,
) -> Result<BundleOutput> {
    let paths = ServerPaths::new(builder, tmp_dir);

    clean_out_dir(builder, out_dir, options)?;
    write_manifest(builder, &paths)?;
    write_environment(&paths, options)?;
    templates::materialize(ENTRY_TEMPLATE, &paths.entry_dir)?;

    if options.api_dir.is_none() {
        write_functions_app(builder, &paths, out_dir, options)?;
    }

    let function_dir = out_dir.join(SERVER_FUNC_DIR_NAME);
    info!("Building server function to {}", function_dir.display());
    let config = server_bundle_config(&paths, out_dir, options);
    let output = bundler.bundle(&config).await?;
    report_warnings(&config, &output);
    Ok(output)
}

fn clean_out_dir(builder: &dyn Builder, out_dir: &Path, options: &AdapterOptions) -> Result<()> {
    match &options.api_dir {
        Some(_) if options.should_clean_api_dir() => {
            let function_dir = out_dir.join(SERVER_FUNC_DIR_NAME);
            info!(
                "Cleaning up custom Azure Functions output directory: {}",
                function_dir.display()
            );
            builder.rimraf(&function_dir)
        }
        Some(_) => Ok(()),
        None => builder.rimraf(out_dir),
    }
}

fn write_manifest(builder: &dyn Builder, paths: &ServerPaths) -> Result<()> {
    let manifest = builder.generate_manifest(&paths.server_relative_dir)?;
    write_file(
        &paths.manifest_file,
        format!("export const manifest = {manifest};\n"),
    )
}

fn write_environment(paths: &ServerPaths, options: &AdapterOptions) -> Result<()> {
    write_file(
        &paths.env_file,
        format!("export const debug = {};\n", options.debug),
    )
}

fn write_functions_app(
    builder: &dyn Builder,
    paths: &ServerPaths,
    out_dir: &Path,
    options: &AdapterOptions,
) -> Result<()> {
    templates::materialize(FUNCTIONS_TEMPLATE, &paths.functions_dir)?;

    info!("Copying template server files to {}", out_dir.display());
    let skip_package_json = |name: &str| name != PACKAGE_JSON;
    builder.copy(&paths.functions_dir, out_dir, Some(&skip_package_json))?;

    let target = out_dir.join(PACKAGE_JSON);
    if options.external.is_none() && options.add_dependencies.is_empty() {
        info!("Copying standard package.json to {}", target.display());
        builder.copy(&paths.functions_dir.join(PACKAGE_JSON), &target, None)?;
        return Ok(());
    }

    info!("Preparing package.json file for Azure Functions in {}", out_dir.display());
    let package_json = functions_package_json(builder.cwd(), options)?;
    write_file(&target, serde_json::to_string_pretty(&package_json)?)
}

/// Stock Functions `package.json` plus the caller's externals (at the
/// versions the project declares) and `addDependencies`.
pub fn functions_package_json(project_root: &Path, options: &AdapterOptions) -> Result<Value> {
    let mut package_json = templates::standard_package_json()?;
    let user_dependencies = project_dependencies(project_root);

    let mut dependencies = package_json
        .get("dependencies")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    for dep in options.external() {
        match user_dependencies.get(dep) {
            Some(version) if version.as_str().is_some_and(|v| !v.is_empty()) => {
                info!("Adding externalized dependency to package.json: {dep}");
                dependencies.insert(dep.clone(), version.clone());
            }
            _ => warn!("External dependency {dep} is not listed in the project package.json"),
        }
    }
    for (name, version) in &options.add_dependencies {
        dependencies.insert(name.clone(), Value::from(version.as_str()));
    }

    if let Some(object) = package_json.as_object_mut() {
        object.insert("dependencies".into(), Value::Object(dependencies));
    }
    Ok(package_json)
}

fn project_dependencies(project_root: &Path) -> Map<String, Value> {
    let path = project_root.join(PACKAGE_JSON);
    let parsed = fs::read_to_string(&path)
        .ok()
        .and_then(|content| serde_json::from_str::<Value>(&content).ok());
    match parsed {
        Some(Value::Object(mut pkg)) => match pkg.remove("dependencies") {
            Some(Value::Object(deps)) => deps,
            _ => Map::new(),
        },
        _ => {
            warn!("Could not read {}", path.display());
            Map::new()
        }
    }
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AdapterError::io(format!("Failed to create {}", parent.display()), e))?;
    }
    fs::write(path, contents)
        .map_err(|e| AdapterError::io(format!("Failed to write {}", path.display()), e))
}
