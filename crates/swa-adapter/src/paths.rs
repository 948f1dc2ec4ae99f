//! Output locations and path helpers.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

pub const ADAPTER_NAME: &str = "adapter-azure-swa";

pub const DEFAULT_OUT_DIR: &str = "build";
pub const SERVER_DEFAULT_OUT_DIR: &str = "build/server";
pub const CLIENT_DEFAULT_OUT_DIR: &str = "build/static";

/// Resolve `path` against `root` unless it is already absolute.
pub fn resolve(root: &Path, path: impl AsRef<Path>) -> PathBuf {
    root.join(path).clean()
}

/// Relative path from `from` to `to`, `/`-separated.
///
/// Both paths are cleaned first; an empty result becomes `.`.
pub fn relative_posix(from: &Path, to: &Path) -> String {
    let from = from.clean();
    let to = to.clean();
    let from_parts: Vec<Component<'_>> = from.components().collect();
    let to_parts: Vec<Component<'_>> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); from_parts.len() - common];
    parts.extend(
        to_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
