//! `swa-adapter emulate`.

use swa_adapter::{Adapter, Platform};

use crate::cli::EmulateArgs;
use crate::commands::utils;
use crate::config::{CliConfig, CliOverrides};
use crate::error::Result;

/// Print the platform object the dev server would receive.
pub fn execute(args: EmulateArgs) -> Result<()> {
    let platform = platform(&args)?;
    println!("{}", serde_json::to_string_pretty(&platform)?);
    Ok(())
}

/// Emulated platform from the project's `emulate` options and `--role`.
pub fn platform(args: &EmulateArgs) -> Result<Platform> {
    let root = utils::resolve_project_root(args.root.as_deref())?;
    let mut config = CliConfig::load(&root, args.config.as_deref(), &CliOverrides::default())?;
    if let Some(role) = args.role {
        config.set_emulate_role(role.into());
    }

    Ok(Adapter::new(config.into_options()?).emulate())
}
