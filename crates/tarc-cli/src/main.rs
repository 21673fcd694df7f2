//! Tarc CLI - archive a file or directory into `.tar.zst` / `.tar.bz2` and
//! extract such archives.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use cli::Commands;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");

    let formatter = output::create_formatter(cli.json, cli.verbose > 0, cli.quiet);
    let show_progress = !(cli.quiet || cli.json);

    let (operation, result) = match &cli.command {
        Commands::Archive(args) => (
            "archive",
            commands::archive::execute(args, &*formatter, show_progress),
        ),
        Commands::Extract(args) => (
            "extract",
            commands::extract::execute(args, &*formatter, show_progress),
        ),
        Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            return Ok(());
        }
    };

    if cli.json
        && let Err(err) = &result
    {
        output::print_json_error(operation, err);
    }

    result
}
