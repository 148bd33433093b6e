use std::path::{Path, PathBuf};

use crate::config::{ConfigOverrides, WeldConfig};
use crate::error::{Result, ResultExt};

/// Current working directory.
pub(super) fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to get current directory")
}

/// Load and validate the layered configuration.
pub(super) fn load_config(
    overrides: &ConfigOverrides,
    config_path: Option<&Path>,
    cwd: &Path,
) -> Result<WeldConfig> {
    let config = WeldConfig::load(overrides, config_path, cwd)?;
    config.validate()?;

    tracing::debug!(
        entries = config.entry.len(),
        base_dir = %config.base_dir.display(),
        "loaded configuration"
    );
    Ok(config)
}
