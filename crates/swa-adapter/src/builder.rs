//! Framework build capability consumed by the adapter.
//!
//! [`Builder`] exposes only what the adapter actually calls: directory
//! getters, a handful of file operations, the route table and the server
//! manifest. [`KitBuilder`] implements it over a SvelteKit output tree on
//! disk; tests substitute a recording implementation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{AdapterError, Result};

/// Predicate over a file's base name; `false` skips the file.
pub type CopyFilter<'a> = &'a (dyn Fn(&str) -> bool + Send + Sync);

/// A route known to the framework, identified by its route id (`/blog/[slug]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub id: String,
}

impl RouteDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

pub trait Builder: Send + Sync {
    /// Project root. Relative output directories resolve against it.
    fn cwd(&self) -> &Path;

    /// Directory name of the framework's client assets (`_app`).
    fn app_dir(&self) -> &str;

    /// Route table, when the framework exposes one.
    fn routes(&self) -> Option<&[RouteDefinition]>;

    /// Paths that were prerendered to static HTML (`/`, `/about`).
    fn prerendered_paths(&self) -> &[String];

    fn client_dir(&self) -> PathBuf;

    fn server_dir(&self) -> PathBuf;

    /// Scratch directory owned by the named adapter.
    fn build_dir(&self, name: &str) -> PathBuf;

    /// JavaScript expression of the server manifest, with module imports
    /// rewritten relative to `relative_path`.
    fn generate_manifest(&self, relative_path: &str) -> Result<String>;

    /// Copy a file or directory tree, returning the files written.
    fn copy(&self, from: &Path, to: &Path, filter: Option<CopyFilter<'_>>) -> Result<Vec<PathBuf>>;

    /// Remove a file or directory tree. Missing paths are not an error.
    fn rimraf(&self, path: &Path) -> Result<()>;

    fn mkdirp(&self, path: &Path) -> Result<()>;

    fn write_client(&self, dest: &Path) -> Result<Vec<PathBuf>>;

    fn write_prerendered(&self, dest: &Path) -> Result<Vec<PathBuf>>;
}

/// Filesystem operations shared by builder implementations.
pub mod fs_ops {
    use super::*;

    pub fn copy(from: &Path, to: &Path, filter: Option<CopyFilter<'_>>) -> Result<Vec<PathBuf>> {
        let accept = |path: &Path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            filter.is_none_or(|f| f(&name))
        };

        if !from.exists() {
            return Ok(Vec::new());
        }

        if from.is_file() {
            if !accept(from) {
                return Ok(Vec::new());
            }
            copy_file(from, to)?;
            return Ok(vec![to.to_path_buf()]);
        }

        let mut copied = Vec::new();
        for entry in WalkDir::new(from).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                AdapterError::io(format!("Failed to read {}", from.display()), e.into())
            })?;
            if entry.file_type().is_dir() || !accept(entry.path()) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(from) else {
                continue;
            };
            let target = to.join(relative);
            copy_file(entry.path(), &target)?;
            copied.push(target);
        }
        Ok(copied)
    }

    fn copy_file(from: &Path, to: &Path) -> Result<()> {
        if let Some(parent) = to.parent() {
            mkdirp(parent)?;
        }
        fs::copy(from, to).map_err(|e| {
            AdapterError::io(
                format!("Failed to copy {} to {}", from.display(), to.display()),
                e,
            )
        })?;
        Ok(())
    }

    pub fn rimraf(path: &Path) -> Result<()> {
        let result = match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
            Ok(_) => fs::remove_file(path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => Err(e),
        };
        result.map_err(|e| AdapterError::io(format!("Failed to remove {}", path.display()), e))
    }

    pub fn mkdirp(path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .map_err(|e| AdapterError::io(format!("Failed to create {}", path.display()), e))
    }
}

/// [`Builder`] over a SvelteKit project that has already run `vite build`.
///
/// Layout read:
/// - `<kit_dir>/output/client`, `<kit_dir>/output/server`
/// - `<kit_dir>/output/prerendered/{pages,dependencies}`
/// - `<kit_dir>/output/server/manifest-full.js` (or `manifest.js`)
/// - `src/routes` for route ids
#[derive(Debug, Clone)]
pub struct KitBuilder {
    cwd: PathBuf,
    kit_dir: PathBuf,
    app_dir: String,
    routes: Option<Vec<RouteDefinition>>,
    prerendered: Vec<String>,
}

pub const DEFAULT_KIT_DIR: &str = ".svelte-kit";
pub const DEFAULT_APP_DIR: &str = "_app";

impl KitBuilder {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let kit_dir = cwd.join(DEFAULT_KIT_DIR);
        let mut builder = Self {
            cwd,
            kit_dir,
            app_dir: DEFAULT_APP_DIR.to_string(),
            routes: None,
            prerendered: Vec::new(),
        };
        builder.refresh();
        builder
    }

    pub fn with_kit_dir(mut self, kit_dir: impl AsRef<Path>) -> Self {
        self.kit_dir = self.cwd.join(kit_dir);
        self.refresh();
        self
    }

    pub fn with_app_dir(mut self, app_dir: impl Into<String>) -> Self {
        self.app_dir = app_dir.into();
        self
    }

    fn refresh(&mut self) {
        self.routes = scan_routes(&self.cwd.join("src").join("routes"));
        self.prerendered = scan_prerendered(&self.prerendered_pages_dir());
    }

    fn output_dir(&self) -> PathBuf {
        self.kit_dir.join("output")
    }

    fn prerendered_pages_dir(&self) -> PathBuf {
        self.output_dir().join("prerendered").join("pages")
    }
}

fn scan_routes(routes_dir: &Path) -> Option<Vec<RouteDefinition>> {
    if !routes_dir.is_dir() {
        return None;
    }

    let mut ids: Vec<String> = WalkDir::new(routes_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            name.starts_with("+page") || name.starts_with("+server")
        })
        .filter_map(|entry| {
            let parent = entry.path().parent()?;
            let relative = parent.strip_prefix(routes_dir).ok()?;
            let segments: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            Some(format!("/{}", segments.join("/")))
        })
        .collect();
    ids.dedup();

    debug!(count = ids.len(), "discovered routes");
    Some(ids.into_iter().map(RouteDefinition::new).collect())
}

fn scan_prerendered(pages_dir: &Path) -> Vec<String> {
    crate::sourcemap::list_files(pages_dir, |f| f.ends_with(".html"))
        .into_iter()
        .map(|file| {
            let stem = file.trim_end_matches(".html");
            let path = match stem {
                "index" => "",
                _ => stem.strip_suffix("/index").unwrap_or(stem),
            };
            format!("/{path}")
        })
        .collect()
}

impl Builder for KitBuilder {
    fn cwd(&self) -> &Path {
        &self.cwd
    }

    fn app_dir(&self) -> &str {
        &self.app_dir
    }

    fn routes(&self) -> Option<&[RouteDefinition]> {
        self.routes.as_deref()
    }

    fn prerendered_paths(&self) -> &[String] {
        &self.prerendered
    }

    fn client_dir(&self) -> PathBuf {
        self.output_dir().join("client")
    }

    fn server_dir(&self) -> PathBuf {
        self.output_dir().join("server")
    }

    fn build_dir(&self, name: &str) -> PathBuf {
        self.kit_dir.join(name)
    }

    fn generate_manifest(&self, relative_path: &str) -> Result<String> {
        let server_dir = self.server_dir();
        let path = ["manifest-full.js", "manifest.js"]
            .into_iter()
            .map(|name| server_dir.join(name))
            .find(|p| p.is_file())
            .ok_or_else(|| {
                AdapterError::Manifest(format!(
                    "no server manifest in {}; run the framework build first",
                    server_dir.display()
                ))
            })?;

        let source = fs::read_to_string(&path)
            .map_err(|e| AdapterError::io(format!("Failed to read {}", path.display()), e))?;
        manifest_expression(&source, relative_path).ok_or_else(|| {
            AdapterError::Manifest(format!("{} does not export a manifest", path.display()))
        })
    }

    fn copy(&self, from: &Path, to: &Path, filter: Option<CopyFilter<'_>>) -> Result<Vec<PathBuf>> {
        fs_ops::copy(from, to, filter)
    }

    fn rimraf(&self, path: &Path) -> Result<()> {
        fs_ops::rimraf(path)
    }

    fn mkdirp(&self, path: &Path) -> Result<()> {
        fs_ops::mkdirp(path)
    }

    fn write_client(&self, dest: &Path) -> Result<Vec<PathBuf>> {
        fs_ops::copy(&self.client_dir(), dest, None)
    }

    fn write_prerendered(&self, dest: &Path) -> Result<Vec<PathBuf>> {
        let prerendered = self.output_dir().join("prerendered");
        let mut written = fs_ops::copy(&prerendered.join("pages"), dest, None)?;
        written.extend(fs_ops::copy(&prerendered.join("dependencies"), dest, None)?);
        Ok(written)
    }
}

/// Extract the `manifest` export of a compiled manifest module and re-root
/// its relative imports at `relative_path`.
pub fn manifest_expression(source: &str, relative_path: &str) -> Option<String> {
    const EXPORT: &str = "export const manifest = ";

    let start = source.find(EXPORT)? + EXPORT.len();
    let rest = &source[start..];
    let end = rest.find("\nexport ").unwrap_or(rest.len());
    let expr = rest[..end].trim_end().trim_end_matches(';').trim_end();
    if expr.is_empty() {
        return None;
    }

    let root = relative_path.trim_end_matches('/');
    Some(
        expr.replace("import('./", &format!("import('{root}/"))
            .replace("import(\"./", &format!("import(\"{root}/")),
    )
}
