//! Configuration for the weld CLI with multi-source loading.
//!
//! Settings are merged from defaults, `weld.config.json`, `WELD_*`
//! environment variables and command-line flags, later sources winning.

mod defaults;
mod loading;
mod validation;

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use weld_core::{MergeOptions, PrintOptions, QuoteStyle};

use crate::cli::QuoteArg;

pub use defaults::*;
pub use loading::{CONFIG_FILE_NAME, ConfigOverrides, ENV_PREFIX};

/// Weld configuration, loaded from weld.config.json and CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WeldConfig {
    /// Entry modules relative to `baseDir` (e.g. ["map", "reduce"])
    #[serde(default)]
    pub entry: Vec<String>,

    /// Directory entries are resolved against; relative to the working directory
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Output file; relative to the working directory
    #[serde(default = "default_out")]
    pub out: PathBuf,

    /// Expression the exports object is assigned to
    #[serde(default = "default_export_target")]
    pub export_target: String,

    /// Variable holding the exports object (must be a valid JS identifier)
    #[schemars(regex(pattern = r"^[a-zA-Z_$][a-zA-Z0-9_$]*$"))]
    #[serde(default = "default_exports_var")]
    pub exports_var: String,

    /// Precede each module with a comment naming its source path
    #[serde(default = "default_banner")]
    pub banner: bool,

    /// Transform modules on a thread pool
    #[serde(default)]
    pub parallel: bool,

    /// Extensions tried when a specifier has none
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Quote style of generated string literals
    #[serde(default)]
    pub quote_style: QuoteStyleConfig,
}

/// Quote style of generated string literals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyleConfig {
    Single,
    #[default]
    Double,
}

impl From<QuoteArg> for QuoteStyleConfig {
    fn from(arg: QuoteArg) -> Self {
        match arg {
            QuoteArg::Single => Self::Single,
            QuoteArg::Double => Self::Double,
        }
    }
}

impl From<QuoteStyleConfig> for QuoteStyle {
    fn from(style: QuoteStyleConfig) -> Self {
        match style {
            QuoteStyleConfig::Single => QuoteStyle::Single,
            QuoteStyleConfig::Double => QuoteStyle::Double,
        }
    }
}

impl Default for WeldConfig {
    fn default() -> Self {
        Self {
            entry: Vec::new(),
            base_dir: default_base_dir(),
            out: default_out(),
            export_target: default_export_target(),
            exports_var: default_exports_var(),
            banner: default_banner(),
            parallel: false,
            extensions: default_extensions(),
            quote_style: QuoteStyleConfig::default(),
        }
    }
}

impl WeldConfig {
    /// Library options for this config, with relative paths taken from `cwd`.
    pub fn to_merge_options(&self, cwd: &Path) -> MergeOptions {
        MergeOptions::new(resolve_against(&self.base_dir, cwd))
            .export_target(self.export_target.clone())
            .exports_var(self.exports_var.clone())
            .banner(self.banner)
            .parallel(self.parallel)
            .extensions(self.extensions.iter().cloned())
            .print_options(PrintOptions {
                quote_style: self.quote_style.into(),
            })
    }

    /// Output path, with a relative path taken from `cwd`.
    pub fn output_path(&self, cwd: &Path) -> PathBuf {
        resolve_against(&self.out, cwd)
    }

    /// JSON Schema for weld.config.json.
    pub fn json_schema() -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(schemars::schema_for!(WeldConfig))
    }

    /// Example weld.config.json content.
    pub fn example_config() -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self {
            entry: vec![
                "map".to_string(),
                "filter".to_string(),
                "reduce".to_string(),
            ],
            base_dir: PathBuf::from("node_modules/lodash"),
            out: PathBuf::from("dist/lodash.merged.js"),
            exports_var: "__LODASH_EXPORTS__".to_string(),
            ..Self::default()
        })
    }
}

fn resolve_against(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
