//! `weld graph`: show the emission order without writing.

use std::path::Path;

use weld_core::PlannedModule;

use super::utils::{current_dir, load_config};
use crate::cli::GraphArgs;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::ui;

pub fn execute(args: GraphArgs) -> Result<()> {
    let cwd = current_dir()?;
    let modules = plan_in(&args, &cwd)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&modules)?);
    } else {
        ui::print_plan(&modules);
    }
    Ok(())
}

/// Emission order for `args`, with relative paths taken from `cwd`.
pub fn plan_in(args: &GraphArgs, cwd: &Path) -> Result<Vec<PlannedModule>> {
    let config = load_config(&ConfigOverrides::from(args), args.config.as_deref(), cwd)?;
    let options = config.to_merge_options(cwd);
    Ok(weld_core::plan(config.entry.as_slice(), options)?)
}
