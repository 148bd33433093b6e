use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use super::validation::{parse_export_target, parse_extension, parse_identifier};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge entry modules and everything they require into one file
    Merge(MergeArgs),

    /// Print the modules of the merge in emission order
    ///
    /// Resolves and transforms the whole closure so that every error `merge`
    /// would report is reported here too, but writes nothing.
    Graph(GraphArgs),

    /// Print the JSON schema of weld.config.json
    Schema(SchemaArgs),
}

/// Arguments for `weld merge`.
#[derive(Args, Debug, Clone, Default)]
pub struct MergeArgs {
    /// Entry modules, relative to the base directory (e.g. `map`, `reduce`)
    ///
    /// Falls back to the `entry` list of the config file when omitted.
    #[arg(value_name = "ENTRY")]
    pub entry: Vec<String>,

    /// Directory entries are resolved against and namespaces derived from
    #[arg(short, long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Expression the exports object is assigned to
    #[arg(long, value_name = "EXPR", value_parser = parse_export_target)]
    pub export_target: Option<String>,

    /// Variable name of the exports object
    #[arg(long, value_name = "NAME", value_parser = parse_identifier)]
    pub exports_var: Option<String>,

    /// Omit the per-module source path comments
    #[arg(long)]
    pub no_banner: bool,

    /// Transform modules on a thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Extension tried when a specifier has none (repeatable)
    #[arg(short = 'x', long = "extension", value_name = "EXT", value_parser = parse_extension)]
    pub extensions: Vec<String>,

    /// Quote style of generated string literals
    #[arg(long, value_enum, value_name = "STYLE")]
    pub quote: Option<QuoteArg>,

    /// Config file (defaults to weld.config.json when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for `weld graph`.
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Entry modules, relative to the base directory
    #[arg(value_name = "ENTRY")]
    pub entry: Vec<String>,

    /// Directory entries are resolved against and namespaces derived from
    #[arg(short, long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Extension tried when a specifier has none (repeatable)
    #[arg(short = 'x', long = "extension", value_name = "EXT", value_parser = parse_extension)]
    pub extensions: Vec<String>,

    /// Print the plan as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Config file (defaults to weld.config.json when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for `weld schema`.
#[derive(Args, Debug, Clone, Default)]
pub struct SchemaArgs {
    /// Print an example config instead of the schema
    #[arg(long)]
    pub example: bool,
}

/// Quote style of generated string literals.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteArg {
    Single,
    Double,
}
