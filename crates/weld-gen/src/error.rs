//! Error types for parsing, editing and printing

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the parser/printer layer
#[derive(Error, Debug, Diagnostic)]
pub enum GenError {
    /// Source text is not valid JavaScript
    #[error("Parse failed: {}", reasons.join(", "))]
    #[diagnostic(code(weld::gen::parse_failed))]
    ParseFailed { reasons: Vec<String> },

    /// Two edits touch the same byte range
    #[error("Overlapping edits at {first_start}..{first_end} and {second_start}..{second_end}")]
    #[diagnostic(
        code(weld::gen::overlapping_edits),
        help("Each byte of the source may be rewritten by at most one edit")
    )]
    OverlappingEdits {
        first_start: u32,
        first_end: u32,
        second_start: u32,
        second_end: u32,
    },

    /// An edit points outside the source text or inside a UTF-8 sequence
    #[error("Edit {start}..{end} is out of bounds for source of length {len}")]
    #[diagnostic(code(weld::gen::edit_out_of_bounds))]
    EditOutOfBounds { start: u32, end: u32, len: usize },
}

impl GenError {
    pub fn parse_failed(reasons: impl IntoIterator<Item = String>) -> Self {
        Self::ParseFailed {
            reasons: reasons.into_iter().collect(),
        }
    }
}

/// Result type for parse, edit and print operations
pub type Result<T> = std::result::Result<T, GenError>;
