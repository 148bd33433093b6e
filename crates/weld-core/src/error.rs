//! Error types for a merge run.
//!
//! Every failure is fatal: a merge either produces the complete document or
//! returns one of these errors before anything is written.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use weld_gen::{GenError, SourceLocation};

/// Errors that abort a merge run.
#[derive(Error, Debug, Diagnostic)]
pub enum MergeError {
    /// A module could not be read from disk
    #[error("Failed to read module {}: {source}", .path.display())]
    #[diagnostic(code(weld::read_failed))]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The merged document could not be written
    #[error("Failed to write output {}: {source}", .path.display())]
    #[diagnostic(code(weld::write_failed), help("Check that the output directory is writable"))]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A module has syntax errors
    #[error("Failed to parse {}: {}", .path.display(), .reasons.join("; "))]
    #[diagnostic(code(weld::parse_failed))]
    Parse { path: PathBuf, reasons: Vec<String> },

    /// A `require` call appears in a shape the merger cannot rewrite
    #[error("Unsupported import in {}:{location}: {reason}\n    {snippet}", .path.display())]
    #[diagnostic(
        code(weld::unsupported_import),
        help(
            "Only `var name = require('<literal path>')` and `target = require('<literal path>')` can be merged"
        )
    )]
    UnsupportedImport {
        path: PathBuf,
        location: SourceLocation,
        reason: String,
        snippet: String,
    },

    /// An export assignment appears outside statement position
    #[error("Unsupported export in {}:{location}: {reason}\n    {snippet}", .path.display())]
    #[diagnostic(
        code(weld::unsupported_export),
        help("Write the export as its own statement: `module.exports = value;`")
    )]
    UnsupportedExport {
        path: PathBuf,
        location: SourceLocation,
        reason: String,
        snippet: String,
    },

    /// `name = require('./name')` would assign a namespace to itself
    #[error(
        "Conflicting assignment with require in {}:{location}: `{binding}` would be assigned to itself\n    {snippet}",
        .path.display()
    )]
    #[diagnostic(code(weld::import_assignment_conflict))]
    ImportAssignmentConflict {
        path: PathBuf,
        location: SourceLocation,
        binding: String,
        snippet: String,
    },

    /// A specifier does not point at an existing file
    #[error("Cannot resolve '{specifier}' from {}", .importer.display())]
    #[diagnostic(
        code(weld::unresolved_import),
        help("Specifiers must be relative ('./x', '../x') or absolute paths to existing files")
    )]
    UnresolvedImport { specifier: String, importer: PathBuf },

    /// Two modules hoist the same constant name with different values
    #[error(
        "Literal constant conflict: `{name}` is {first_value} in {} but {second_value} in {}",
        .first_path.display(),
        .second_path.display()
    )]
    #[diagnostic(code(weld::constant_conflict), help("Rename one of the constants"))]
    ConstantConflict {
        name: String,
        first_value: String,
        first_path: PathBuf,
        second_value: String,
        second_path: PathBuf,
    },

    /// The dependency graph contains a cycle
    #[error("Circular dependency detected: {cycle}")]
    #[diagnostic(code(weld::circular_dependency), help("Refactor to remove circular requires"))]
    CircularDependency { cycle: String },

    /// Two distinct modules derive the same namespace identifier
    #[error(
        "Namespace collision: `{namespace}` is derived from both {} and {}",
        .first.display(),
        .second.display()
    )]
    #[diagnostic(code(weld::namespace_collision))]
    NamespaceCollision {
        namespace: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A module path does not map to a usable identifier
    #[error("Cannot derive a namespace for {}: {reason}", .path.display())]
    #[diagnostic(code(weld::invalid_namespace))]
    InvalidNamespace { path: PathBuf, reason: String },

    /// An import binding does not name the namespace of the module it resolves to
    #[error(
        "Import '{specifier}' in {} binds `{binding}` but the module it resolves to is namespaced `{namespace}`",
        .importer.display()
    )]
    #[diagnostic(
        code(weld::import_binding_mismatch),
        help("Imported modules must live in the base directory under the name they are required by")
    )]
    ImportBindingMismatch {
        importer: PathBuf,
        specifier: String,
        binding: String,
        namespace: String,
    },

    /// A merge option has an unusable value
    #[error("Invalid value for '{field}': {value} ({hint})")]
    #[diagnostic(code(weld::invalid_option))]
    InvalidOption {
        field: String,
        value: String,
        hint: String,
    },

    /// The rewritten module could not be edited or printed
    #[error("Failed to generate code for {}: {source}", .path.display())]
    #[diagnostic(code(weld::codegen_failed))]
    Codegen { path: PathBuf, source: GenError },
}

impl MergeError {
    /// Attach a module path to a parser/printer error.
    pub fn from_gen(path: impl Into<PathBuf>, error: GenError) -> Self {
        let path = path.into();
        match error {
            GenError::ParseFailed { reasons } => Self::Parse { path, reasons },
            source => Self::Codegen { path, source },
        }
    }

    /// Module path the error points at, when there is one.
    pub fn module_path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Parse { path, .. }
            | Self::UnsupportedImport { path, .. }
            | Self::UnsupportedExport { path, .. }
            | Self::ImportAssignmentConflict { path, .. }
            | Self::InvalidNamespace { path, .. }
            | Self::Codegen { path, .. } => Some(path),
            Self::UnresolvedImport { importer, .. }
            | Self::ImportBindingMismatch { importer, .. } => Some(importer),
            Self::ConstantConflict { second_path, .. } => Some(second_path),
            Self::NamespaceCollision { second, .. } => Some(second),
            Self::CircularDependency { .. } | Self::InvalidOption { .. } => None,
        }
    }
}

/// Result type for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_export_message() {
        let err = MergeError::UnsupportedExport {
            path: PathBuf::from("/lib/broken.js"),
            location: SourceLocation::new(3, 5),
            reason: "export assignment must be a direct statement".to_string(),
            snippet: "ok ? module.exports = a : null".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/lib/broken.js:3:5"));
        assert!(msg.contains("export assignment must be a direct statement"));
        assert!(msg.contains("ok ? module.exports = a : null"));
    }

    #[test]
    fn test_constant_conflict_message() {
        let err = MergeError::ConstantConflict {
            name: "X".to_string(),
            first_value: "\"a\"".to_string(),
            first_path: PathBuf::from("/lib/a.js"),
            second_value: "\"b\"".to_string(),
            second_path: PathBuf::from("/lib/b.js"),
        };
        let msg = err.to_string();
        assert!(msg.contains("`X`"));
        assert!(msg.contains("/lib/a.js"));
        assert!(msg.contains("/lib/b.js"));
        assert_eq!(err.module_path(), Some(std::path::Path::new("/lib/b.js")));
    }

    #[test]
    fn test_from_gen_maps_parse_failures() {
        let err = MergeError::from_gen("/lib/a.js", GenError::parse_failed(vec!["boom".into()]));
        assert!(matches!(err, MergeError::Parse { ref reasons, .. } if reasons == &["boom"]));

        let overflow = GenError::EditOutOfBounds {
            start: 4,
            end: 9,
            len: 3,
        };
        let err = MergeError::from_gen("/lib/a.js", overflow);
        assert!(matches!(err, MergeError::Codegen { .. }));
    }
}
