//! Test doubles for the adapter pipeline.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use swa_adapter::builder::fs_ops;
use swa_adapter::{
    AdapterError, BundleOutput, BundleWarning, Builder, Bundler, CopyFilter, Result,
    RouteDefinition,
};
use swa_config::BundleConfig;
use tempfile::TempDir;

/// Builder over a temporary project that records every call it receives.
pub struct MockBuilder {
    pub root: TempDir,
    pub routes: Option<Vec<RouteDefinition>>,
    pub prerendered: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl MockBuilder {
    /// A project with one client script, one prerendered page and a
    /// compiled server.
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let kit = root.path().join(".svelte-kit/output");
        write(&kit.join("client/_app/immutable/entry/start.js"), "export {}");
        write(&kit.join("client/favicon.png"), "png");
        write(&kit.join("server/index.js"), "export class Server {}");
        write(&kit.join("prerendered/pages/about.html"), "<h1>about</h1>");
        write(
            &root.path().join("package.json"),
            r#"{ "dependencies": { "sharp": "^0.33.0" } }"#,
        );

        Self {
            root,
            routes: Some(vec![RouteDefinition::new("/"), RouteDefinition::new("/about")]),
            prerendered: vec!["/about".to_string()],
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_routes(mut self, routes: Option<&[&str]>) -> Self {
        self.routes = routes.map(|ids| ids.iter().map(|id| RouteDefinition::new(*id)).collect());
        self
    }

    pub fn with_prerendered(mut self, paths: &[&str]) -> Self {
        self.prerendered = paths.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.path().join(rel)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, op: &str, path: &Path) {
        let rel = path
            .strip_prefix(self.root.path())
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        self.calls.lock().push(format!("{op} {rel}"));
    }
}

pub fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

impl Builder for MockBuilder {
    fn cwd(&self) -> &Path {
        self.root.path()
    }

    fn app_dir(&self) -> &str {
        "_app"
    }

    fn routes(&self) -> Option<&[RouteDefinition]> {
        self.routes.as_deref()
    }

    fn prerendered_paths(&self) -> &[String] {
        &self.prerendered
    }

    fn client_dir(&self) -> PathBuf {
        self.path(".svelte-kit/output/client")
    }

    fn server_dir(&self) -> PathBuf {
        self.path(".svelte-kit/output/server")
    }

    fn build_dir(&self, name: &str) -> PathBuf {
        self.path(".svelte-kit").join(name)
    }

    fn generate_manifest(&self, relative_path: &str) -> Result<String> {
        self.calls.lock().push(format!("generate_manifest {relative_path}"));
        Ok(format!(
            "{{ appDir: \"_app\", nodes: [() => import('{relative_path}/nodes/0.js')] }}"
        ))
    }

    fn copy(&self, from: &Path, to: &Path, filter: Option<CopyFilter<'_>>) -> Result<Vec<PathBuf>> {
        self.record("copy", to);
        fs_ops::copy(from, to, filter)
    }

    fn rimraf(&self, path: &Path) -> Result<()> {
        self.record("rimraf", path);
        fs_ops::rimraf(path)
    }

    fn mkdirp(&self, path: &Path) -> Result<()> {
        self.record("mkdirp", path);
        fs_ops::mkdirp(path)
    }

    fn write_client(&self, dest: &Path) -> Result<Vec<PathBuf>> {
        self.record("write_client", dest);
        fs_ops::copy(&self.client_dir(), dest, None)
    }

    fn write_prerendered(&self, dest: &Path) -> Result<Vec<PathBuf>> {
        self.record("write_prerendered", dest);
        fs_ops::copy(&self.path(".svelte-kit/output/prerendered/pages"), dest, None)
    }
}

/// Bundler that records each config and returns canned warnings.
#[derive(Default)]
pub struct RecordingBundler {
    pub configs: Mutex<Vec<BundleConfig>>,
    pub warnings: Vec<BundleWarning>,
    pub fail: bool,
}

impl RecordingBundler {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn configs(&self) -> Vec<BundleConfig> {
        self.configs.lock().clone()
    }
}

#[async_trait]
impl Bundler for RecordingBundler {
    async fn bundle(&self, config: &BundleConfig) -> Result<BundleOutput> {
        self.configs.lock().push(config.clone());
        if self.fail {
            return Err(AdapterError::BundleFailed {
                message: "esbuild exited with 1".into(),
            });
        }
        Ok(BundleOutput {
            warnings: self.warnings.clone(),
            ..Default::default()
        })
    }
}
