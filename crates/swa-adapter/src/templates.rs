//! Files shipped with the adapter and written into each build.
//!
//! - `functions/`: Azure Functions app skeleton (`host.json`, `package.json`)
//! - `entry/`: the server function entry that wires the framework server to
//!   the Functions runtime; bundled with `ENV`, `MANIFEST` and `SERVER`
//!   aliased to build-specific files

use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::RustEmbed;
use serde_json::Value;

use crate::error::{AdapterError, Result};

#[derive(RustEmbed)]
#[folder = "templates"]
struct Templates;

pub const FUNCTIONS_TEMPLATE: &str = "functions";
pub const ENTRY_TEMPLATE: &str = "entry";
pub const ENTRY_FILE: &str = "index.js";
pub const PACKAGE_JSON: &str = "package.json";

/// Contents of one embedded file, e.g. `functions/host.json`.
pub fn read(path: &str) -> Result<Vec<u8>> {
    Templates::get(path)
        .map(|file| file.data.into_owned())
        .ok_or_else(|| AdapterError::Template(path.to_string()))
}

/// Write every embedded file under `template/` into `dest`, keeping the
/// layout below the template directory.
pub fn materialize(template: &str, dest: &Path) -> Result<Vec<PathBuf>> {
    let prefix = format!("{template}/");
    let mut written = Vec::new();

    for name in Templates::iter() {
        let Some(relative) = name.strip_prefix(&prefix) else {
            continue;
        };
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AdapterError::io(format!("Failed to create {}", parent.display()), e))?;
        }
        fs::write(&target, read(&name)?)
            .map_err(|e| AdapterError::io(format!("Failed to write {}", target.display()), e))?;
        written.push(target);
    }

    if written.is_empty() {
        return Err(AdapterError::Template(template.to_string()));
    }
    written.sort();
    Ok(written)
}

/// The stock Functions `package.json`.
pub fn standard_package_json() -> Result<Value> {
    let path = format!("{FUNCTIONS_TEMPLATE}/{PACKAGE_JSON}");
    Ok(serde_json::from_slice(&read(&path)?)?)
}
