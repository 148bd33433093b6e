//! Printer façade over `oxc_codegen`

use crate::error::Result;
use crate::format::{PrintOptions, QuoteStyle};
use crate::parser::{ParseOptions, parse};
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_codegen::{Codegen, CodegenOptions};

/// Print a program to source text.
///
/// Output is a pure function of the tree and the options, so printing the
/// same tree twice always yields identical text.
pub fn print(program: &Program<'_>, options: &PrintOptions) -> String {
    let codegen_options = CodegenOptions {
        single_quote: options.quote_style == QuoteStyle::Single,
        ..CodegenOptions::default()
    };

    Codegen::new().with_options(codegen_options).build(program).code
}

/// Parse `source` as a CommonJS script and print it back.
///
/// Used on text produced by span edits: the round trip proves the rewritten
/// text is still a valid program and normalizes its formatting.
pub fn reprint(source: &str, options: &PrintOptions) -> Result<String> {
    let allocator = Allocator::default();
    let parsed = parse(&allocator, source, ParseOptions::default())?;
    Ok(print(parsed.ast(), options))
}
