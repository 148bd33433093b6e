//! Per-module records produced by the transformer.

use std::fmt;
use std::path::PathBuf;

/// Literal value of a hoisted top-level constant.
///
/// Equality is by kind and value: `"1"` and `1` differ.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => write!(f, "{value:?}"),
            Self::Num(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// A top-level `var NAME = <literal>` lifted out of a module.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedConstant {
    pub name: String,
    pub value: Literal,
    /// Literal as written in the source, emitted verbatim
    pub raw: String,
}

/// One rewritten `require` site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub specifier: String,
    pub resolved: PathBuf,
    /// Name the rewritten code uses in place of the call
    pub binding: String,
}

/// A transformed module.
#[derive(Debug, Clone)]
pub struct ModuleRecord {
    /// Canonical path; the record's identity
    pub path: PathBuf,
    pub namespace: String,
    /// Printed `var <namespace> = (function () { ... })();` declaration
    pub program: String,
    /// Resolved imports in source order, duplicates kept
    pub dependencies: Vec<PathBuf>,
    pub imports: Vec<ImportBinding>,
    pub constants: Vec<ExtractedConstant>,
    pub layer: usize,
}
