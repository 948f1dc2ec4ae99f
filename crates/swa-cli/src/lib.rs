//! Command-line interface for the Azure Static Web Apps adapter.
//!
//! Wraps `swa-adapter` in a binary that packages an already-built SvelteKit
//! project for deployment, prints the generated platform config, emulates
//! the platform object for local development and resolves source paths
//! through the source map locator.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions for the commands and global flags
//! - [`commands`] - one module per command
//! - [`config`] - layered option loading (defaults, file, environment, flags)
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines and summaries on stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use swa_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
