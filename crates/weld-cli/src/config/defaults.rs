use std::path::PathBuf;

use weld_core::{DEFAULT_EXPORT_TARGET, DEFAULT_EXPORTS_VAR, DEFAULT_EXTENSIONS};

pub fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_out() -> PathBuf {
    PathBuf::from("merged.js")
}

pub fn default_export_target() -> String {
    DEFAULT_EXPORT_TARGET.to_string()
}

pub fn default_exports_var() -> String {
    DEFAULT_EXPORTS_VAR.to_string()
}

pub fn default_banner() -> bool {
    true
}

pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}
