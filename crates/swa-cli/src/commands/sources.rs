//! `swa-adapter sources`.

use swa_adapter::SourceMapLocator;

use crate::cli::SourcesArgs;
use crate::error::Result;
use crate::ui;

/// Print `source -> rewritten` for every source argument.
pub fn execute(args: SourcesArgs) -> Result<()> {
    for (source, rewritten) in resolve(&args) {
        println!("{source} -> {rewritten}");
    }
    Ok(())
}

/// Rewrite every source through one locator, so the directories are
/// scanned once no matter how many sources are given.
pub fn resolve(args: &SourcesArgs) -> Vec<(String, String)> {
    let mut locator = SourceMapLocator::new(args.dir.iter().cloned());
    if let Some(prefix) = &args.prefix {
        locator = locator.with_prefix(prefix.clone());
    }

    let rewritten = args
        .sources
        .iter()
        .map(|source| (source.clone(), locator.rewrite(source)))
        .collect();

    let index = locator.index();
    if index.map_count() == 0 {
        ui::warning("No source maps found in the given directories");
    }
    rewritten
}
