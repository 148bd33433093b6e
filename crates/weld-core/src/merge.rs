//! Entry points for one-shot merges.

use std::fs;
use std::path::Path;

use crate::error::{MergeError, Result};
use crate::options::MergeOptions;
use crate::session::{MergeReport, MergeSession, PlannedModule};

/// A merged document and its report.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    pub code: String,
    pub report: MergeReport,
}

fn open_session<S: AsRef<str>>(entries: &[S], options: MergeOptions) -> Result<MergeSession> {
    let mut session = MergeSession::new(options)?;
    for entry in entries {
        session.add_entry(entry.as_ref())?;
    }
    Ok(session)
}

/// Merge `entries` and return the document without writing it.
pub fn merge_to_string<S: AsRef<str>>(entries: &[S], options: MergeOptions) -> Result<MergeOutput> {
    let mut session = open_session(entries, options)?;
    let assembled = session.render()?;
    let report = session.report(&assembled, None);

    tracing::info!(
        modules = report.modules.len(),
        constants = report.constants,
        bytes = report.bytes,
        "merged modules"
    );

    Ok(MergeOutput {
        code: assembled.code,
        report,
    })
}

/// Merge `entries` into `destination`.
///
/// The destination is only written once the whole document has been
/// assembled; on error it is left untouched.
pub fn merge<S: AsRef<str>>(
    entries: &[S],
    destination: &Path,
    options: MergeOptions,
) -> Result<MergeReport> {
    let MergeOutput { code, mut report } = merge_to_string(entries, options)?;

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| MergeError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(destination, &code).map_err(|source| MergeError::Write {
        path: destination.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %destination.display(), "wrote merged output");
    report.output = Some(destination.to_path_buf());
    Ok(report)
}

/// Emission order of the closure of `entries`, without assembling output.
pub fn plan<S: AsRef<str>>(entries: &[S], options: MergeOptions) -> Result<Vec<PlannedModule>> {
    let mut session = open_session(entries, options)?;
    session.build()?;
    Ok(session.plan())
}
