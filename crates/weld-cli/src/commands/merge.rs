//! `weld merge`: write the merged document.

use std::path::Path;
use std::time::Instant;

use weld_core::MergeReport;

use super::utils::{current_dir, load_config};
use crate::cli::MergeArgs;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::ui;

/// Run `weld merge` from the current directory.
pub fn execute(args: MergeArgs) -> Result<()> {
    let cwd = current_dir()?;
    let report = execute_in(&args, &cwd)?;
    ui::print_merge_summary(&report);
    Ok(())
}

/// Run `weld merge` with relative paths taken from `cwd`.
pub fn execute_in(args: &MergeArgs, cwd: &Path) -> Result<MergeReport> {
    let config = load_config(&ConfigOverrides::from(args), args.config.as_deref(), cwd)?;
    let destination = config.output_path(cwd);
    let options = config.to_merge_options(cwd);

    tracing::info!(
        entries = ?config.entry,
        base_dir = %options.base_dir.display(),
        out = %destination.display(),
        "merging"
    );

    let start = Instant::now();
    let report = weld_core::merge(config.entry.as_slice(), &destination, options)?;
    tracing::debug!(elapsed = %ui::format_duration(start.elapsed()), "merge finished");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CONFIG_FILE_NAME, WeldConfig};
    use crate::error::CliError;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;
    use weld_core::MergeError;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("leaf.js"), "var SIZE = 200;\nmodule.exports = SIZE;\n").unwrap();
        fs::write(
            lib.join("main.js"),
            "var leaf = require('./leaf');\nmodule.exports = function () { return leaf; };\n",
        )
        .unwrap();
        temp
    }

    fn args(entry: &[&str]) -> MergeArgs {
        MergeArgs {
            entry: entry.iter().map(|e| e.to_string()).collect(),
            base_dir: Some("lib".into()),
            out: Some("dist/out.js".into()),
            ..MergeArgs::default()
        }
    }

    #[test]
    #[serial]
    fn test_merge_writes_output() {
        let temp = project();
        let report = execute_in(&args(&["main"]), temp.path()).unwrap();

        let out = temp.path().join("dist/out.js");
        let code = fs::read_to_string(&out).unwrap();
        assert_eq!(report.output.as_deref(), Some(out.as_path()));
        assert_eq!(report.modules.len(), 2);
        assert_eq!(report.constants, 1);
        assert!(code.find("var leaf").unwrap() < code.find("var main").unwrap());
        assert!(code.contains("/* module: leaf.js */"));
    }

    #[test]
    #[serial]
    fn test_merge_without_banner() {
        let temp = project();
        let merge_args = MergeArgs {
            no_banner: true,
            ..args(&["main"])
        };
        execute_in(&merge_args, temp.path()).unwrap();
        let code = fs::read_to_string(temp.path().join("dist/out.js")).unwrap();
        assert!(!code.contains("/* module:"));
    }

    #[test]
    #[serial]
    fn test_merge_error_passes_through() {
        let temp = project();
        let err = execute_in(&args(&["missing"]), temp.path()).unwrap_err();
        assert!(matches!(err, CliError::Merge(MergeError::UnresolvedImport { .. })));
        assert!(!temp.path().join("dist/out.js").exists());
    }

    #[test]
    #[serial]
    fn test_example_config_merges() {
        let temp = TempDir::new().unwrap();
        let lodash = temp.path().join("node_modules/lodash");
        fs::create_dir_all(&lodash).unwrap();
        fs::write(lodash.join("_arrayMap.js"), "function arrayMap(a, f) { return a.map(f); }\nmodule.exports = arrayMap;\n").unwrap();
        fs::write(lodash.join("map.js"), "var arrayMap = require('./_arrayMap');\nmodule.exports = arrayMap;\n").unwrap();
        fs::write(lodash.join("filter.js"), "function filter(a, f) { return a.filter(f); }\nmodule.exports = filter;\n").unwrap();
        fs::write(lodash.join("reduce.js"), "function reduce(a, f, v) { return a.reduce(f, v); }\nmodule.exports = reduce;\n").unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            WeldConfig::example_config().unwrap(),
        )
        .unwrap();

        let report = execute_in(&MergeArgs::default(), temp.path()).unwrap();
        assert_eq!(report.modules.len(), 4);
        let code = fs::read_to_string(temp.path().join("dist/lodash.merged.js")).unwrap();
        assert!(code.contains("__LODASH_EXPORTS__"));
    }

    #[test]
    #[serial]
    fn test_merge_requires_entries() {
        let temp = project();
        let err = execute_in(&args(&[]), temp.path()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
