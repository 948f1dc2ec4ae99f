//! # swa-adapter
//!
//! Packages a SvelteKit build for Azure Static Web Apps:
//!
//! - the server entry is bundled into an Azure Functions app under the API
//!   directory (`build/server` by default)
//! - client assets and prerendered pages are staged in the static directory
//!   (`build/static`) with their source maps re-chained
//! - `staticwebapp.config.json` routes dynamic requests to the function
//!
//! Library code emits `tracing` events only; install a subscriber to see them.

pub mod adapter;
pub mod builder;
pub mod bundler;
pub mod client;
pub mod emulator;
pub mod error;
pub mod paths;
pub mod platform_config;
pub mod server;
pub mod sourcemap;
pub mod templates;

pub use adapter::{AdaptReport, Adapter};
pub use builder::{Builder, CopyFilter, KitBuilder, RouteDefinition};
pub use bundler::{BundleOutput, BundleWarning, Bundler, EsbuildBundler};
pub use emulator::{emulate_platform, InvocationContext, Platform, RequestUser};
pub use error::{AdapterError, Result};
pub use sourcemap::{list_files, LocatorState, SourceMapIndex, SourceMapLocator};
pub use platform_config::write_swa_config;
