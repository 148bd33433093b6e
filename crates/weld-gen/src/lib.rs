//! Parse, edit and print JavaScript modules using OXC
//!
//! This crate is the parser/printer layer of weld. It wraps the OXC
//! (Oxidation Compiler) parser and code generator behind a small API and adds
//! a span-based edit buffer for rewriting source text in place.
//!
//! # Features
//!
//! - **Strict parsing** - Syntax errors are reported, never recovered from
//! - **Deterministic printing** - The same tree always prints to the same text
//! - **Span edits** - Replace and remove against original byte offsets
//! - **Source locations** - Map byte offsets back to line and column
//!
//! # Examples
//!
//! ## Parse and print
//!
//! ```rust
//! use weld_gen::{parse, print, Allocator, ParseOptions, PrintOptions};
//!
//! let allocator = Allocator::default();
//! let parsed = parse(&allocator, "var x   =  1", ParseOptions::default())?;
//! let code = print(parsed.ast(), &PrintOptions::default());
//! assert_eq!(code.trim(), "var x = 1;");
//! # Ok::<(), weld_gen::GenError>(())
//! ```
//!
//! ## Rewriting spans
//!
//! ```rust
//! use weld_gen::SourceEdits;
//! use oxc_span::Span;
//!
//! let source = "var a = require('./a');";
//! let mut edits = SourceEdits::new(source);
//! edits.replace(Span::new(8, 22), "a");
//! assert_eq!(edits.apply()?, "var a = a;");
//! # Ok::<(), weld_gen::GenError>(())
//! ```

mod edits;
mod error;
mod format;
mod location;
mod parser;
mod printer;

pub use edits::SourceEdits;
pub use error::{GenError, Result};
pub use format::{PrintOptions, QuoteStyle};
pub use location::{LineIndex, SourceLocation};
pub use parser::{ParseOptions, ParsedProgram, parse};
pub use printer::{print, reprint};

// Re-export commonly used OXC types for convenience
pub use oxc_allocator::Allocator;
pub use oxc_span::{GetSpan, SourceType, Span};
