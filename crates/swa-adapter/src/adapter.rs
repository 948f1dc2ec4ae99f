//! The `adapt` pipeline.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use swa_config::{AdapterOptions, StaticWebAppConfig};
use tracing::{error, info, warn};

use crate::builder::Builder;
use crate::bundler::Bundler;
use crate::client::bundle_client;
use crate::emulator::{emulate_platform, Platform};
use crate::error::{AdapterError, Result};
use crate::paths::{self, ADAPTER_NAME, CLIENT_DEFAULT_OUT_DIR, DEFAULT_OUT_DIR, SERVER_DEFAULT_OUT_DIR};
use crate::server::bundle_server;
use crate::platform_config::write_swa_config;

/// Result of a successful [`Adapter::adapt`].
#[derive(Debug, Clone)]
pub struct AdaptReport {
    pub api_dir: PathBuf,
    pub static_dir: PathBuf,
    pub config: StaticWebAppConfig,
    /// Bundler warnings across both passes, suppressed ones included.
    pub warnings: usize,
    pub duration: Duration,
}

/// Azure Static Web Apps adapter.
///
/// # Example
///
/// ```no_run
/// use swa_adapter::{Adapter, EsbuildBundler, KitBuilder};
/// use swa_config::AdapterOptions;
///
/// # async fn run() -> swa_adapter::Result<()> {
/// let builder = KitBuilder::new(".");
/// let bundler = EsbuildBundler::locate(std::path::Path::new("."), None)?;
/// Adapter::new(AdapterOptions::default()).adapt(&builder, &bundler).await?;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Adapter {
    options: AdapterOptions,
}

impl Adapter {
    pub const NAME: &'static str = ADAPTER_NAME;

    pub fn new(options: AdapterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    /// Route ids starting with the platform's reserved `/api` prefix.
    ///
    /// The platform reserves the bare prefix, so `/apidocs` collides too.
    pub fn conflicting_routes(builder: &dyn Builder) -> Vec<String> {
        builder
            .routes()
            .unwrap_or_default()
            .iter()
            .map(|route| route.id.as_str())
            .filter(|id| id.starts_with("/api"))
            .map(str::to_string)
            .collect()
    }

    /// Package the framework build for the platform.
    ///
    /// Stages run strictly in order: route check, clean, server function,
    /// static assets, platform config. The first failure aborts the build.
    pub async fn adapt(&self, builder: &dyn Builder, bundler: &dyn Bundler) -> Result<AdaptReport> {
        let start = Instant::now();
        let options = &self.options;

        let conflicting = Self::conflicting_routes(builder);
        if !options.allow_reserved_swa_routes && !conflicting.is_empty() {
            error!(
                "Error: the following routes conflict with Azure SWA's reserved /api route: {}. \
                 Requests to these routes in production will return 404 instead of hitting your SvelteKit app.\n\n\
                 To resolve this error, move the conflicting routes so they do not start with /api. \
                 For example, move /api/blog to /blog.\n\
                 If you want to suppress this error, set allowReservedSwaRoutes to true in your adapter options.",
                conflicting.join(", ")
            );
            return Err(AdapterError::ConflictingRoutes { routes: conflicting });
        }

        let cwd = builder.cwd();
        builder.rimraf(&paths::resolve(cwd, DEFAULT_OUT_DIR))?;
        if options.api_dir.is_some() {
            warn!("If you override the apiDir location, make sure that it is a valid Azure Functions location.");
        }

        let tmp_dir = builder.build_dir(ADAPTER_NAME);
        builder.rimraf(&tmp_dir)?;
        builder.mkdirp(&tmp_dir)?;

        let api_dir = paths::resolve(cwd, options.api_dir.as_deref().unwrap_or(SERVER_DEFAULT_OUT_DIR));
        let server = bundle_server(builder, bundler, &api_dir, &tmp_dir, options).await?;

        let static_dir =
            paths::resolve(cwd, options.static_dir.as_deref().unwrap_or(CLIENT_DEFAULT_OUT_DIR));
        let client = bundle_client(builder, bundler, &static_dir, options).await?;

        let config = write_swa_config(builder, &static_dir, options)?;

        let duration = start.elapsed();
        info!("built in {:.2}s", duration.as_secs_f64());

        Ok(AdaptReport {
            api_dir,
            static_dir,
            config,
            warnings: server.warnings.len() + client.warnings.len(),
            duration,
        })
    }

    /// Platform object for local development.
    pub fn emulate(&self) -> Platform {
        emulate_platform(self.options.emulate.as_ref())
    }
}
