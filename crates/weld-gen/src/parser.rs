//! Strict parsing of module source text.
//!
//! A module with syntax errors cannot be merged, so the partial tree the
//! OXC parser recovers is never handed out.

use crate::error::{GenError, Result};
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

/// How source text is interpreted.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub source_type: SourceType,
}

impl Default for ParseOptions {
    /// CommonJS script: `require`, `module` and top-level `return` semantics.
    fn default() -> Self {
        Self::script()
    }
}

impl ParseOptions {
    pub fn script() -> Self {
        Self {
            source_type: SourceType::cjs(),
        }
    }
}

/// A successfully parsed program allocated in the caller's arena.
pub struct ParsedProgram<'a> {
    program: Program<'a>,
}

impl<'a> ParsedProgram<'a> {
    pub fn ast(&self) -> &Program<'a> {
        &self.program
    }
}

/// Parse `source` into a tree allocated in `allocator`.
///
/// # Errors
///
/// [`GenError::ParseFailed`] carrying every parser message when the source is
/// not a valid program.
pub fn parse<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    options: ParseOptions,
) -> Result<ParsedProgram<'a>> {
    let result = Parser::new(allocator, source, options.source_type).parse();

    if result.panicked || !result.errors.is_empty() {
        let mut reasons: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        if reasons.is_empty() {
            reasons.push("parser aborted".to_string());
        }
        tracing::debug!(errors = reasons.len(), "parse failed");
        return Err(GenError::parse_failed(reasons));
    }

    Ok(ParsedProgram {
        program: result.program,
    })
}
