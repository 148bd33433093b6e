//! Error handling for the weld CLI.
//!
//! Command implementations return [`CliError`]. Merge failures keep the
//! structured [`MergeError`] from `weld-core` so that its diagnostic code and
//! help text survive to the terminal; everything else is a configuration or
//! I/O problem of the CLI itself.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use weld_cli::error::{Result, ResultExt};
//!
//! fn read_entries(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).context("Failed to read entry list")
//! }
//! ```

mod report;

use std::path::PathBuf;

use thiserror::Error;
use weld_core::MergeError;

pub use report::cli_error_to_miette;

/// Top-level CLI error.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The merge itself failed
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("Config file not found: {}\n\nHint: Create a weld.config.json file or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    /// The layered configuration could not be extracted
    #[error("Invalid configuration: {0}\n\nHint: Check weld.config.json syntax and field types")]
    Extract(String),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField { field: String, hint: String },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

/// Result type alias using [`CliError`] as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Context helpers for fallible CLI operations.
pub trait ResultExt<T> {
    /// Prefix the error message with what was being done.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CliError>,
{
    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
