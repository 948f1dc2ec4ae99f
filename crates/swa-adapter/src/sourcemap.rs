//! Locating the bundle directory behind a source path recorded in a map file.
//!
//! Bundling passes emit `*.js.map` files whose `sources` entries are relative
//! to the map's own directory. Error-reporting tools receive only those
//! entries, so [`SourceMapLocator`] indexes every map under the output
//! directories once and rewrites a recorded source into a path rooted at the
//! project (optionally under a prefix).
//!
//! Scan order is fixed: directories in the order given, files within a
//! directory sorted by name. When two maps list the same source, the map
//! scanned last wins and the collision is logged.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use path_clean::PathClean;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub const SOURCE_MAP_SUFFIX: &str = ".js.map";

/// Recursively list files under `dir` as `/`-separated paths relative to it.
///
/// Returns an empty list when `dir` does not exist. Entries are visited in
/// file-name order so the result is stable across platforms.
pub fn list_files(dir: impl AsRef<Path>, filter: impl Fn(&str) -> bool) -> Vec<String> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Vec::new();
    }

    WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(dir).ok()?;
            Some(to_slash(relative))
        })
        .filter(|file| filter(file))
        .collect()
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Deserialize)]
struct RawSourceMap {
    #[serde(default)]
    sources: Option<Vec<Value>>,
}

/// Original source path -> directory of the map file that references it.
#[derive(Debug, Clone, Default)]
pub struct SourceMapIndex {
    entries: HashMap<String, String>,
    map_count: usize,
    collisions: usize,
}

impl SourceMapIndex {
    /// Scan every `*.js.map` under `dirs`.
    ///
    /// Maps that cannot be read or parsed are skipped with a warning.
    pub fn build<P: AsRef<Path>>(dirs: &[P]) -> Self {
        let mut index = SourceMapIndex::default();

        for dir in dirs {
            let dir = dir.as_ref();
            let dir_str = dir.to_string_lossy().replace('\\', "/");
            for file in list_files(dir, |f| f.ends_with(SOURCE_MAP_SUFFIX)) {
                let map_path = dir.join(&file);
                let map_dir = match file.rsplit_once('/') {
                    Some((parent, _)) => format!("{dir_str}/{parent}"),
                    None => dir_str.clone(),
                };

                let sources = match read_sources(&map_path) {
                    Ok(sources) => sources,
                    Err(reason) => {
                        warn!(map = %map_path.display(), %reason, "skipping unreadable source map");
                        continue;
                    }
                };

                index.map_count += 1;
                for source in sources {
                    index.insert(source, map_dir.clone());
                }
            }
        }

        info!(
            sources = index.source_count(),
            maps = index.map_count,
            collisions = index.collisions,
            "Found {} sources in {} maps in '{}' directories",
            index.source_count(),
            index.map_count,
            dirs.iter()
                .map(|d| d.as_ref().display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        index
    }

    fn insert(&mut self, source: String, map_dir: String) {
        if let Some(previous) = self.entries.insert(source.clone(), map_dir) {
            self.collisions += 1;
            debug!(%source, %previous, "source referenced by more than one map, keeping the later one");
        }
    }

    /// Directory of the map that references `source`.
    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    pub fn source_count(&self) -> usize {
        self.entries.len()
    }

    pub fn map_count(&self) -> usize {
        self.map_count
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

fn read_sources(path: &Path) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let raw: RawSourceMap = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    // non-string entries are dropped, the rest of the map still counts
    Ok(raw
        .sources
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorState {
    Unindexed,
    Indexed,
}

/// Rewrites source paths recorded in map files to project-rooted paths.
///
/// The directory scan runs on the first [`rewrite`](Self::rewrite) and never
/// again for the lifetime of the locator.
#[derive(Debug)]
pub struct SourceMapLocator {
    dirs: Vec<PathBuf>,
    prefix: String,
    index: OnceLock<SourceMapIndex>,
    scans: AtomicUsize,
}

impl SourceMapLocator {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
            prefix: String::new(),
            index: OnceLock::new(),
            scans: AtomicUsize::new(0),
        }
    }

    /// Prefix prepended to every rewritten path.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn state(&self) -> LocatorState {
        if self.index.get().is_some() {
            LocatorState::Indexed
        } else {
            LocatorState::Unindexed
        }
    }

    /// Number of directory scans performed so far (0 or 1).
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    /// The index, scanning the directories if that has not happened yet.
    pub fn index(&self) -> &SourceMapIndex {
        self.index.get_or_init(|| {
            self.scans.fetch_add(1, Ordering::SeqCst);
            SourceMapIndex::build(&self.dirs)
        })
    }

    /// Resolve `source` to `prefix/map_dir/source`, normalized with `/`
    /// separators. Unknown sources are returned unchanged.
    pub fn rewrite(&self, source: &str) -> String {
        let Some(map_dir) = self.index().get(source) else {
            debug!(%source, "Location of sourcemap for source not found");
            return source.to_string();
        };

        let joined = [self.prefix.as_str(), map_dir, source]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        let rewritten = PathBuf::from(joined).clean().to_string_lossy().replace('\\', "/");
        debug!(%source, %rewritten, "Rewriting source");
        rewritten
    }
}
