//! Conversion of CLI errors into miette reports.

use miette::Report;

use crate::error::CliError;

/// Convert a [`CliError`] into a report for display.
///
/// Merge errors already implement `Diagnostic` and are wrapped as-is.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Merge(e) => Report::new(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}
