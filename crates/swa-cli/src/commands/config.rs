//! `swa-adapter config`.

use swa_adapter::builder::DEFAULT_APP_DIR;
use swa_config::generate_config;

use crate::cli::ConfigArgs;
use crate::commands::utils;
use crate::config::{CliConfig, CliOverrides};
use crate::error::{Result, ResultExt};

/// Print the `staticwebapp.config.json` the adapter would write.
///
/// Validation errors in `customStaticWebAppConfig` are fatal.
pub fn execute(args: ConfigArgs) -> Result<()> {
    println!("{}", render(&args)?);
    Ok(())
}

/// The generated config as pretty JSON.
pub fn render(args: &ConfigArgs) -> Result<String> {
    let root = utils::resolve_project_root(args.root.as_deref())?;
    let options = CliConfig::load(&root, args.config.as_deref(), &CliOverrides::default())?
        .into_options()?;

    let custom = options.custom_static_web_app_config.unwrap_or_default();
    let config = generate_config(&custom, args.app_dir.as_deref().unwrap_or(DEFAULT_APP_DIR))?;

    serde_json::to_string_pretty(&config).context("Failed to serialize staticwebapp.config.json")
}
