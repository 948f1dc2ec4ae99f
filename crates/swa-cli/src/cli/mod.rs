//! Command-line interface definition.
//!
//! # Command Structure
//!
//! - `swa-adapter build` - package the SvelteKit build for Static Web Apps
//! - `swa-adapter config` - print the generated `staticwebapp.config.json`
//! - `swa-adapter emulate` - print the emulated platform object
//! - `swa-adapter sources` - resolve source paths through source maps

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{BuildArgs, Command, ConfigArgs, EmulateArgs, SourcesArgs};
pub use enums::*;

/// Azure Static Web Apps adapter for SvelteKit
#[derive(Parser, Debug)]
#[command(
    name = "swa-adapter",
    version,
    about = "Deploy SvelteKit builds to Azure Static Web Apps",
    long_about = "Packages the output of `vite build` into a server function under build/server\n\
                  and static assets under build/static, together with a generated\n\
                  staticwebapp.config.json."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
