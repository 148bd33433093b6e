//! Namespace identifiers derived from module paths.
//!
//! A module at `<base>/fp/_baseConvert.js` is bound to `fp__baseConvert`:
//! the path relative to the base directory, separators replaced by `_`,
//! extension stripped.

use std::path::{Component, Path};

use crate::error::{MergeError, Result};

/// Delimiter replacing path separators in namespace names.
pub const NAMESPACE_DELIMITER: &str = "_";

const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "new",
    "null", "package", "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Whether `name` can be used as a JavaScript binding.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !first.is_alphabetic() && first != '_' && first != '$' {
        return false;
    }

    if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        return false;
    }

    !RESERVED_WORDS.contains(&name)
}

/// Path of `path` relative to `base_dir`, `/`-separated.
///
/// Falls back to the full path for modules outside the base directory.
pub fn relative_display(path: &Path, base_dir: &Path) -> String {
    match path.strip_prefix(base_dir) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}

/// Derive the namespace identifier for a resolved module path.
///
/// # Errors
///
/// Fails with [`MergeError::InvalidNamespace`] when the module lives outside
/// `base_dir` or the derived name is not a valid identifier.
pub fn derive_namespace(path: &Path, base_dir: &Path) -> Result<String> {
    let invalid = |reason: String| MergeError::InvalidNamespace {
        path: path.to_path_buf(),
        reason,
    };

    let relative = path
        .strip_prefix(base_dir)
        .map_err(|_| invalid(format!("module is outside {}", base_dir.display())))?;

    let mut segments: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
            other => {
                return Err(invalid(format!(
                    "unexpected path component '{}'",
                    other.as_os_str().to_string_lossy()
                )));
            }
        }
    }

    if let Some(last) = segments.last_mut() {
        if let Some(stem) = Path::new(last.as_str()).file_stem() {
            *last = stem.to_string_lossy().into_owned();
        }
    }

    let namespace = segments.join(NAMESPACE_DELIMITER);
    if !is_valid_identifier(&namespace) {
        return Err(invalid(format!("`{namespace}` is not a valid identifier")));
    }

    Ok(namespace)
}

/// Binding name an import refers to: the specifier's final segment without
/// a known extension.
///
/// `require('../internal/_baseMap.js')` binds `_baseMap`.
pub fn import_binding_name(specifier: &str, extensions: &[String]) -> String {
    let segment = specifier
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(specifier);

    extensions
        .iter()
        .find_map(|ext| segment.strip_suffix(ext.as_str()))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(segment)
        .to_string()
}
