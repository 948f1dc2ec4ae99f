// esbuild integration - runs the esbuild CLI for each bundling pass

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use swa_config::BundleConfig;
use tokio::process::Command;
use tracing::debug;
use which::which;

use super::{BundleOutput, BundleWarning, Bundler};
use crate::error::{AdapterError, Result};

/// Plugins esbuild covers natively; they need no translation.
///
/// `commonjs` is covered only together with [`NODE_ESM_REQUIRE_BANNER`].
const BUILTIN_PLUGINS: &[&str] = &["sourcemaps", "node-resolve", "commonjs", "json"];

/// Gives bundled CommonJS dependencies a working `require` for Node
/// builtins inside an ES module bundle.
pub const NODE_ESM_REQUIRE_BANNER: &str =
    "import { createRequire } from 'node:module'; const require = createRequire(import.meta.url);";

/// [`Bundler`] backed by the esbuild executable.
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    esbuild_path: PathBuf,
}

impl EsbuildBundler {
    /// Use a specific esbuild executable.
    pub fn with_esbuild_path(esbuild_path: impl Into<PathBuf>) -> Self {
        Self {
            esbuild_path: esbuild_path.into(),
        }
    }

    /// Locate esbuild: `explicit` if given, then the project's
    /// `node_modules/.bin`, then `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::BundlerNotFound` if none of them has it.
    pub fn locate(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok(Self::with_esbuild_path(path));
            }
            return Err(AdapterError::BundlerNotFound {
                searched: path.display().to_string(),
            });
        }

        let bin_dir = project_root.join("node_modules").join(".bin");
        let local = bin_dir.join(if cfg!(windows) { "esbuild.cmd" } else { "esbuild" });
        if local.is_file() {
            debug!(path = %local.display(), "using project esbuild");
            return Ok(Self::with_esbuild_path(local));
        }

        which("esbuild")
            .map(Self::with_esbuild_path)
            .map_err(|_| AdapterError::BundlerNotFound {
                searched: format!("{}, PATH", bin_dir.display()),
            })
    }

    pub fn esbuild_path(&self) -> &Path {
        &self.esbuild_path
    }

    /// Translate a bundle config into esbuild command-line arguments.
    pub fn args_for(config: &BundleConfig) -> Result<Vec<String>> {
        let mut args = Vec::new();
        let bundle = config.get("bundle").and_then(Value::as_bool).unwrap_or(true);

        let entries = entry_points(config.get("input"))?;
        if entries.is_empty() {
            return Err(AdapterError::UnsupportedConfig("no input entries".to_string()));
        }
        let single_entry = entries.len() == 1;
        args.extend(entries);

        if bundle {
            args.push("--bundle".to_string());
        }

        let mut esm = false;
        if let Some(format) = config.output_str("format") {
            let format = match format {
                "es" | "esm" | "module" => "esm",
                "cjs" | "commonjs" => "cjs",
                "iife" => "iife",
                other => {
                    return Err(AdapterError::UnsupportedConfig(format!(
                        "output format '{other}'"
                    )));
                }
            };
            esm = format == "esm";
            args.push(format!("--format={format}"));
        }

        match config.output().and_then(|o| o.get("sourcemap")) {
            Some(Value::Bool(true)) => args.push("--sourcemap".to_string()),
            Some(Value::String(kind)) => args.push(format!("--sourcemap={kind}")),
            _ => {}
        }

        let out_dir = config.output_str("dir");
        let entry_file = config.output_str("entryFileNames");
        match (config.output_str("file"), out_dir, entry_file) {
            (Some(file), _, _) => args.push(format!("--outfile={file}")),
            (None, Some(dir), Some(name)) if single_entry && !name.contains('[') => {
                args.push(format!("--outfile={}", Path::new(dir).join(name).display()));
            }
            (None, Some(dir), _) => args.push(format!("--outdir={dir}")),
            (None, None, _) => {}
        }

        let platform = config.get("platform").and_then(Value::as_str);
        if let Some(platform) = platform {
            args.push(format!("--platform={platform}"));
        }
        if bundle && esm && platform == Some("node") {
            args.push(format!("--banner:js={NODE_ESM_REQUIRE_BANNER}"));
        }
        if let Some(target) = config.get("target").and_then(Value::as_str) {
            args.push(format!("--target={target}"));
        }

        // esbuild rejects externals outside bundle mode
        if bundle {
            for external in config.external() {
                args.push(format!("--external:{external}"));
            }
        }

        for plugin in config.plugins() {
            let name = plugin.get("name").and_then(Value::as_str).unwrap_or_default();
            match name {
                "alias" => {
                    let entries = plugin
                        .get("options")
                        .and_then(|o| o.get("entries"))
                        .and_then(Value::as_object);
                    for (find, replacement) in entries.into_iter().flatten() {
                        if let Some(replacement) = replacement.as_str() {
                            args.push(format!("--alias:{find}={replacement}"));
                        }
                    }
                }
                name if BUILTIN_PLUGINS.contains(&name) => {}
                other => debug!(plugin = other, "plugin has no esbuild equivalent, ignoring"),
            }
        }

        args.push("--log-level=warning".to_string());
        args.push("--log-limit=0".to_string());
        args.push("--color=false".to_string());
        Ok(args)
    }
}

fn entry_points(input: Option<&Value>) -> Result<Vec<String>> {
    match input {
        Some(Value::String(path)) => Ok(vec![path.clone()]),
        Some(Value::Array(paths)) => Ok(paths
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()),
        Some(Value::Object(named)) => Ok(named
            .iter()
            .filter_map(|(name, path)| path.as_str().map(|p| format!("{name}={p}")))
            .collect()),
        Some(other) => Err(AdapterError::UnsupportedConfig(format!("input {other}"))),
        None => Ok(Vec::new()),
    }
}

/// Parse esbuild's `▲ [WARNING] message [code]` diagnostics from stderr.
pub(crate) fn parse_warnings(stderr: &str) -> Vec<BundleWarning> {
    stderr
        .lines()
        .filter_map(|line| {
            let (_, rest) = line.split_once("[WARNING]")?;
            let mut message = rest.trim();

            let mut plugin = None;
            if let Some(stripped) = message.strip_prefix("[plugin ") {
                if let Some((name, tail)) = stripped.split_once(']') {
                    plugin = Some(name.trim().to_string());
                    message = tail.trim();
                }
            }

            let mut code = None;
            if message.ends_with(']') {
                if let Some(open) = message.rfind(" [") {
                    code = Some(message[open + 2..message.len() - 1].to_string());
                    message = message[..open].trim_end();
                }
            }

            Some(BundleWarning {
                code,
                plugin,
                message: message.to_string(),
            })
        })
        .collect()
}

#[async_trait]
impl Bundler for EsbuildBundler {
    async fn bundle(&self, config: &BundleConfig) -> Result<BundleOutput> {
        let args = Self::args_for(config)?;
        debug!(esbuild = %self.esbuild_path.display(), ?args, "running esbuild");

        let start = Instant::now();
        let output = Command::new(&self.esbuild_path)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                AdapterError::bundle_failed(format!(
                    "failed to execute {}: {e}",
                    self.esbuild_path.display()
                ))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(AdapterError::bundle_failed(format!(
                "esbuild exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(BundleOutput {
            warnings: parse_warnings(&stderr),
            duration: start.elapsed(),
        })
    }
}
