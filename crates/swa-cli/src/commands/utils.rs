//! Shared helpers for command implementations.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::{CliError, Result};

/// Resolve `path` against `cwd` unless it is absolute.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// The current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    Ok(std::env::current_dir().context("Failed to get current directory")?)
}

/// Project root from `--root`, relative to the working directory.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if the root is not a directory.
pub fn resolve_project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let cwd = get_cwd()?;
    let root = match explicit {
        Some(path) => resolve_path(path, &cwd),
        None => cwd,
    };

    if !root.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Project root is not a directory: {}",
            root.display()
        )));
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn relative_paths_join_cwd() {
        let cwd = Path::new("/project");
        assert_eq!(resolve_path(Path::new("build"), cwd), PathBuf::from("/project/build"));
    }

    #[test]
    fn absolute_paths_are_kept() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(resolve_path(tmp.path(), Path::new("/project")), tmp.path());
    }

    #[test]
    fn explicit_root_must_exist() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(resolve_project_root(Some(tmp.path())).unwrap(), tmp.path());

        let err = resolve_project_root(Some(&tmp.path().join("missing"))).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
