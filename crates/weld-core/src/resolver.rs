//! File resolution for entry names and `require` specifiers.
//!
//! Only filesystem paths are understood: `./x`, `../x` and absolute paths for
//! imports, plus base-relative names for entries. Bare package specifiers are
//! never looked up in `node_modules`.

use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::error::{MergeError, Result};

/// Resolves specifiers to canonical file paths.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    base_dir: PathBuf,
    extensions: Vec<String>,
}

impl ModuleResolver {
    /// Create a resolver rooted at `base_dir`.
    ///
    /// # Errors
    ///
    /// Fails when the base directory does not exist.
    pub fn new(base_dir: &Path, extensions: &[String]) -> Result<Self> {
        let base_dir = fs::canonicalize(base_dir).map_err(|source| MergeError::Read {
            path: base_dir.to_path_buf(),
            source,
        })?;

        Ok(Self {
            base_dir,
            extensions: extensions.to_vec(),
        })
    }

    /// Canonical base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Resolve an entry name such as `map` or `fp/convert.js` against the base
    /// directory. Absolute paths are taken as-is.
    pub fn resolve_entry(&self, entry: &str) -> Result<PathBuf> {
        let candidate = self.base_dir.join(entry).clean();
        self.find_file(&candidate)
            .ok_or_else(|| MergeError::UnresolvedImport {
                specifier: entry.to_string(),
                importer: self.base_dir.clone(),
            })
    }

    /// Resolve `specifier` relative to the directory of `importer`.
    pub fn resolve_import(&self, specifier: &str, importer: &Path) -> Result<PathBuf> {
        let unresolved = || MergeError::UnresolvedImport {
            specifier: specifier.to_string(),
            importer: importer.to_path_buf(),
        };

        if !is_path_specifier(specifier) {
            return Err(unresolved());
        }

        let from = importer.parent().unwrap_or(Path::new(""));
        let candidate = from.join(specifier).clean();
        self.find_file(&candidate).ok_or_else(unresolved)
    }

    fn find_file(&self, candidate: &Path) -> Option<PathBuf> {
        if candidate.is_file() {
            return fs::canonicalize(candidate).ok();
        }

        // `./a.b` must become `./a.b.js`, not `./a.js`
        self.extensions.iter().find_map(|ext| {
            let mut with_ext = candidate.as_os_str().to_os_string();
            with_ext.push(ext);
            let with_ext = PathBuf::from(with_ext);
            if with_ext.is_file() {
                fs::canonicalize(&with_ext).ok()
            } else {
                None
            }
        })
    }
}

fn is_path_specifier(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier == "."
        || specifier == ".."
        || Path::new(specifier).is_absolute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, ModuleResolver) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("internal")).unwrap();
        fs::write(dir.path().join("map.js"), "module.exports = 1;").unwrap();
        fs::write(dir.path().join("internal/_baseMap.js"), "module.exports = 2;").unwrap();
        fs::write(dir.path().join("data.json.js"), "module.exports = 3;").unwrap();
        let resolver = ModuleResolver::new(dir.path(), &[".js".to_string()]).unwrap();
        (dir, resolver)
    }

    #[test]
    fn test_resolve_entry_with_and_without_extension() {
        let (_dir, resolver) = fixture();
        let expected = resolver.base_dir().join("map.js");
        assert_eq!(resolver.resolve_entry("map").unwrap(), expected);
        assert_eq!(resolver.resolve_entry("map.js").unwrap(), expected);
        assert_eq!(
            resolver.resolve_entry("internal/_baseMap").unwrap(),
            resolver.base_dir().join("internal/_baseMap.js")
        );
    }

    #[test]
    fn test_resolve_import_relative_to_importer() {
        let (_dir, resolver) = fixture();
        let importer = resolver.base_dir().join("internal/_baseMap.js");
        assert_eq!(
            resolver.resolve_import("../map", &importer).unwrap(),
            resolver.base_dir().join("map.js")
        );

        let importer = resolver.base_dir().join("map.js");
        assert_eq!(
            resolver.resolve_import("./internal/_baseMap", &importer).unwrap(),
            resolver.base_dir().join("internal/_baseMap.js")
        );
    }

    #[test]
    fn test_extension_is_appended_not_replaced() {
        let (_dir, resolver) = fixture();
        let importer = resolver.base_dir().join("map.js");
        assert_eq!(
            resolver.resolve_import("./data.json", &importer).unwrap(),
            resolver.base_dir().join("data.json.js")
        );
    }

    #[test]
    fn test_bare_and_missing_specifiers_fail() {
        let (_dir, resolver) = fixture();
        let importer = resolver.base_dir().join("map.js");
        assert!(matches!(
            resolver.resolve_import("lodash", &importer),
            Err(MergeError::UnresolvedImport { .. })
        ));
        assert!(matches!(
            resolver.resolve_import("./missing", &importer),
            Err(MergeError::UnresolvedImport { .. })
        ));
        assert!(resolver.resolve_entry("missing").is_err());
    }

    #[test]
    fn test_missing_base_dir() {
        let err = ModuleResolver::new(Path::new("/definitely/not/here"), &[]).unwrap_err();
        assert!(matches!(err, MergeError::Read { .. }));
    }
}
