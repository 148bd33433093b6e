//! `weld schema`: print the config schema or an example config.

use crate::cli::SchemaArgs;
use crate::config::WeldConfig;
use crate::error::Result;

pub fn execute(args: SchemaArgs) -> Result<()> {
    let output = if args.example {
        WeldConfig::example_config()?
    } else {
        serde_json::to_string_pretty(&WeldConfig::json_schema()?)?
    };
    println!("{output}");
    Ok(())
}
