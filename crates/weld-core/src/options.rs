//! Options controlling a merge run.

use std::path::{Path, PathBuf};

use weld_gen::PrintOptions;

use crate::error::{MergeError, Result};
use crate::namespace::is_valid_identifier;

/// Default host export slot the merged object is assigned to.
pub const DEFAULT_EXPORT_TARGET: &str = "module.exports";

/// Default name of the variable holding the merged exports object.
pub const DEFAULT_EXPORTS_VAR: &str = "__WELD_EXPORTS__";

/// Extensions tried, in order, when a specifier names a file without one.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js"];

/// Options for [`merge`](crate::merge) and [`MergeSession`](crate::MergeSession).
///
/// ```rust
/// use weld_core::MergeOptions;
///
/// let options = MergeOptions::new("node_modules/lodash")
///     .export_target("module.exports")
///     .exports_var("__LODASH__")
///     .banner(false);
/// assert_eq!(options.exports_var, "__LODASH__");
/// ```
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Directory namespaces are derived from and entries are resolved against
    pub base_dir: PathBuf,
    /// Expression the exports object is assigned to
    pub export_target: String,
    /// Variable holding the exports object
    pub exports_var: String,
    /// Precede each module with a comment naming its source path
    pub banner: bool,
    /// Transform the modules of each discovery frontier on the rayon pool
    pub parallel: bool,
    /// Extensions tried when resolving specifiers without one
    pub extensions: Vec<String>,
    /// Printer settings
    pub print: PrintOptions,
}

impl MergeOptions {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            export_target: DEFAULT_EXPORT_TARGET.to_string(),
            exports_var: DEFAULT_EXPORTS_VAR.to_string(),
            banner: true,
            parallel: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            print: PrintOptions::default(),
        }
    }

    pub fn export_target(mut self, target: impl Into<String>) -> Self {
        self.export_target = target.into();
        self
    }

    pub fn exports_var(mut self, name: impl Into<String>) -> Self {
        self.exports_var = name.into();
        self
    }

    pub fn banner(mut self, enabled: bool) -> Self {
        self.banner = enabled;
        self
    }

    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn print_options(mut self, print: PrintOptions) -> Self {
        self.print = print;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Check the options before any module is read.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_identifier(&self.exports_var) {
            return Err(MergeError::InvalidOption {
                field: "exportsVar".to_string(),
                value: self.exports_var.clone(),
                hint: "must be a valid JavaScript identifier".to_string(),
            });
        }

        if !is_assignable_target(&self.export_target) {
            return Err(MergeError::InvalidOption {
                field: "exportTarget".to_string(),
                value: self.export_target.clone(),
                hint: "must be an identifier or a dotted member path such as module.exports"
                    .to_string(),
            });
        }

        if let Some(ext) = self.extensions.iter().find(|ext| !ext.starts_with('.')) {
            return Err(MergeError::InvalidOption {
                field: "extensions".to_string(),
                value: ext.clone(),
                hint: "extensions start with a dot, e.g. \".js\"".to_string(),
            });
        }

        Ok(())
    }
}

/// `a`, `a.b`, `a.b.c`: each segment a valid identifier.
fn is_assignable_target(target: &str) -> bool {
    !target.is_empty() && target.split('.').all(is_valid_identifier)
}
