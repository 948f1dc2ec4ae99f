//! Configuration layer for the Azure Static Web Apps adapter.
//!
//! - [`bundle`] holds the bundler configuration tree and the merge rules used
//!   to combine tool defaults with call-specific settings.
//! - [`options`] holds the adapter options recognised from config files and
//!   the programmatic API.
//! - [`swa`] generates and validates `staticwebapp.config.json`.
//! - [`discovery`] finds adapter config files on disk.

pub mod bundle;
pub mod discovery;
pub mod error;
mod helpers;
pub mod options;
pub mod swa;

pub use bundle::{merge_values, plugin, BundleConfig, BundleTransform, WarningFilter};
pub use discovery::{discover, load_file, ConfigDiscovery};
pub use error::{ConfigError, Result};
pub use options::{AdapterOptions, ClientPrincipal, ClientPrincipalClaim, EmulateOptions, EmulateRole};
pub use swa::{
    generate_config, validate_custom_config, CustomStaticWebAppConfig, NavigationFallback, Route,
    StaticWebAppConfig, DEFAULT_API_RUNTIME, IMMUTABLE_CACHE_CONTROL, SERVER_FUNC_DIR_NAME,
    SSR_FUNC_ROUTE,
};
