//! `swa-adapter build`.

use swa_adapter::builder::DEFAULT_APP_DIR;
use swa_adapter::{Adapter, EsbuildBundler, KitBuilder};
use tracing::debug;

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::config::{CliConfig, CliOverrides};
use crate::error::Result;
use crate::ui;

/// Execute the build command.
///
/// 1. Resolve the project root and load options (flags > env > file > defaults)
/// 2. Locate esbuild
/// 3. Run the adapter over the SvelteKit output
/// 4. Print a summary
pub async fn execute(args: BuildArgs) -> Result<()> {
    let root = utils::resolve_project_root(args.root.as_deref())?;

    ui::info("Loading configuration...");
    let overrides = CliOverrides::from_build_args(&args);
    let options = CliConfig::load(&root, args.config.as_deref(), &overrides)?.into_options()?;
    debug!(?options, "resolved adapter options");

    let mut builder = KitBuilder::new(&root)
        .with_app_dir(args.app_dir.as_deref().unwrap_or(DEFAULT_APP_DIR));
    if let Some(kit_dir) = &args.kit_dir {
        builder = builder.with_kit_dir(kit_dir);
    }

    let esbuild = args.esbuild.as_deref().map(|path| utils::resolve_path(path, &root));
    let bundler = EsbuildBundler::locate(&root, esbuild.as_deref())?;
    debug!(path = %bundler.esbuild_path().display(), "using esbuild");

    let report = Adapter::new(options).adapt(&builder, &bundler).await?;

    ui::print_adapt_summary(&report);
    ui::success(&format!(
        "Adapter finished in {}",
        ui::format_duration(report.duration)
    ));

    Ok(())
}
