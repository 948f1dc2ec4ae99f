//! `swa-adapter` command-line entry point.
//!
//! Parses arguments, initializes logging and dispatches to the command
//! implementations in `swa_cli::commands`.

use clap::Parser;
use miette::Result;
use swa_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
        cli::Command::Config(config_args) => commands::config_execute(config_args),
        cli::Command::Emulate(emulate_args) => commands::emulate_execute(emulate_args),
        cli::Command::Sources(sources_args) => commands::sources_execute(sources_args),
    };

    // Convert CLI errors to miette diagnostics for reporting
    result.map_err(error::cli_error_to_miette)
}
