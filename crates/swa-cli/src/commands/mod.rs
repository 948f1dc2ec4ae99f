//! Command implementations.
//!
//! - [`build`] - run the adapter over a built project
//! - [`config`] - print the generated platform config
//! - [`emulate`] - print the emulated platform object
//! - [`sources`] - resolve source paths through source maps

pub mod build;
pub mod config;
pub mod emulate;
pub mod sources;
pub mod utils;

pub use build::execute as build_execute;
pub use config::execute as config_execute;
pub use emulate::execute as emulate_execute;
pub use sources::execute as sources_execute;
