//! Command-line interface definition for weld.
//!
//! - `weld merge` - merge modules into one script
//! - `weld graph` - print the emission order without writing anything
//! - `weld schema` - print the JSON schema of `weld.config.json`

mod commands;
mod validation;

use clap::Parser;

pub use commands::{Command, GraphArgs, MergeArgs, QuoteArg, SchemaArgs};
pub use validation::{parse_export_target, parse_extension, parse_identifier};

/// Weld - merge CommonJS modules into a single script
#[derive(Parser, Debug)]
#[command(
    name = "weld",
    version,
    about = "Merge a graph of CommonJS modules into one self-contained script",
    long_about = "Weld wraps every module reachable from the given entries in a once-invoked\n\
                  closure bound to a namespace derived from its path, replaces require calls\n\
                  with those namespaces and emits dependencies before their dependents.\n\
                  Top-level literal constants shared between modules are declared once."
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
