use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::Role;

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Package a built SvelteKit project for Azure Static Web Apps
    ///
    /// Expects `vite build` to have run already. Writes the server function
    /// to build/server, static assets to build/static, and the platform
    /// config next to the static assets.
    Build(BuildArgs),

    /// Print the generated staticwebapp.config.json
    Config(ConfigArgs),

    /// Print the platform object emulated for local development
    Emulate(EmulateArgs),

    /// Resolve source paths through the source maps in one or more directories
    ///
    /// Prints `source -> rewritten` for each source. Sources no map
    /// references are printed unchanged.
    Sources(SourcesArgs),
}

/// Arguments for the build command
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// SvelteKit output directory, relative to the root [default: .svelte-kit]
    #[arg(long, value_name = "DIR")]
    pub kit_dir: Option<PathBuf>,

    /// SvelteKit `appDir` [default: _app]
    #[arg(long, value_name = "NAME")]
    pub app_dir: Option<String>,

    /// Output directory for the server function
    #[arg(long, value_name = "DIR")]
    pub api_dir: Option<String>,

    /// Output directory for static assets
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<String>,

    /// Keep existing files in a custom --api-dir
    #[arg(long)]
    pub no_clean_api_dir: bool,

    /// Keep existing files in a custom --static-dir
    #[arg(long)]
    pub no_clean_static_dir: bool,

    /// Module ids left out of the server bundle
    ///
    /// Examples:
    ///   --external sharp --external pg
    #[arg(short, long, value_name = "MODULE")]
    pub external: Vec<String>,

    /// Enable debug output in the generated server function
    #[arg(long)]
    pub debug: bool,

    /// Allow app routes under /api
    #[arg(long)]
    pub allow_reserved_swa_routes: bool,

    /// Path to the esbuild executable
    #[arg(long, value_name = "PATH")]
    pub esbuild: Option<PathBuf>,

    /// Adapter config file (default: discovered in the root)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// SvelteKit `appDir` [default: _app]
    #[arg(long, value_name = "NAME")]
    pub app_dir: Option<String>,

    /// Adapter config file (default: discovered in the root)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Arguments for the emulate command
#[derive(Args, Debug, Default)]
pub struct EmulateArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Role to emulate, overriding `emulate.role` from the config
    #[arg(long, value_enum)]
    pub role: Option<Role>,

    /// Adapter config file (default: discovered in the root)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Arguments for the sources command
#[derive(Args, Debug, Default)]
pub struct SourcesArgs {
    /// Directory to search for *.map files (repeatable)
    #[arg(long, required = true, value_name = "DIR")]
    pub dir: Vec<PathBuf>,

    /// Prefix prepended to every rewritten path
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Source paths as they appear in the maps
    #[arg(required = true, value_name = "SOURCE")]
    pub sources: Vec<String>,
}
