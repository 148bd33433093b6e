//! Weld CLI entry point.
//!
//! Parses arguments, sets up logging and dispatches to the command
//! implementations.

use clap::Parser;
use miette::Result;
use weld_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Merge(merge_args) => commands::merge_execute(merge_args),
        cli::Command::Graph(graph_args) => commands::graph_execute(graph_args),
        cli::Command::Schema(schema_args) => commands::schema_execute(schema_args),
    };

    result.map_err(error::cli_error_to_miette)
}
