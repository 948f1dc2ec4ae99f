//! Miette diagnostic conversion for CLI errors.

use miette::Report;
use swa_adapter::AdapterError;
use swa_config::ConfigError;

use crate::error::CliError;

/// Convert a [`CliError`] to a miette report.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Adapter(e) => adapter_error_to_miette(e),
        CliError::Config(ConfigError::InvalidCustomConfig { field }) => miette::miette!(
            help = "Remove it from customStaticWebAppConfig; the adapter writes it itself",
            "customStaticWebAppConfig cannot override {}.",
            field
        ),
        CliError::Config(ConfigError::NotFound) => miette::miette!(
            help = "Create swa-adapter.toml, swa-adapter.config.json, or add a 'swaAdapter' field to package.json",
            "No adapter config found"
        ),
        _ => miette::miette!("{}", err),
    }
}

/// Convert an [`AdapterError`] to a miette report.
pub fn adapter_error_to_miette(err: AdapterError) -> Report {
    match err {
        AdapterError::ConflictingRoutes { routes } => miette::miette!(
            help = "Move these routes out of /api, or set allowReservedSwaRoutes to true",
            "Routes conflict with the reserved /api prefix: {}",
            routes.join(", ")
        ),
        AdapterError::BundlerNotFound { searched } => miette::miette!(
            help = "Install esbuild in the project (npm i -D esbuild) or pass --esbuild <PATH>",
            "esbuild executable not found (searched: {})",
            searched
        ),
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicting_routes_are_listed() {
        let report = cli_error_to_miette(CliError::Adapter(AdapterError::ConflictingRoutes {
            routes: vec!["/api".into(), "/api/blog".into()],
        }));
        assert!(report.to_string().contains("/api, /api/blog"));
        assert!(report.help().is_some());
    }

    #[test]
    fn other_errors_keep_their_message() {
        let report = cli_error_to_miette(CliError::InvalidArgument("--dir is empty".into()));
        assert_eq!(report.to_string(), "Invalid argument: --dir is empty");
    }
}
