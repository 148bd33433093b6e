//! # weld-core
//!
//! Merge a graph of CommonJS modules into one self-contained script.
//!
//! Each module becomes a once-invoked closure bound to a namespace derived
//! from its path; `require` calls turn into references to those namespaces
//! and the `module.exports` assignment into the closure's `return`.
//! Modules are emitted so that every dependency is declared before the
//! modules that read it, and top-level literal constants shared by several
//! modules are declared once at the top.
//!
//! ## Pipeline
//!
//! 1. [`transform_module`] rewrites one file into a [`ModuleRecord`]
//! 2. [`build_closure`] transforms everything reachable from the entries
//! 3. [`detect_cycles`] and [`assign_layers`] order the graph
//! 4. [`assemble`] joins constants, modules and the exports object
//!
//! [`MergeSession`] threads the state through these steps; [`merge`] and
//! [`merge_to_string`] run all of them at once.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use weld_core::{merge, MergeOptions};
//!
//! let options = MergeOptions::new("node_modules/lodash");
//! let report = merge(&["map", "filter", "reduce"], Path::new("dist/lodash.js"), options)?;
//! println!("{} modules, {} bytes", report.modules.len(), report.bytes);
//! # Ok::<(), weld_core::MergeError>(())
//! ```

pub mod assemble;
pub mod closure;
pub mod error;
pub mod layering;
pub mod merge;
pub mod module;
pub mod namespace;
pub mod options;
pub mod resolver;
pub mod session;
pub mod transform;


pub use assemble::{Assembled, ConstantTable, assemble, collect_constants, verify_import_bindings};
pub use closure::{ModuleGraph, build_closure};
pub use error::{MergeError, Result};
pub use layering::{assign_layers, detect_cycles, emission_order};
pub use merge::{MergeOutput, merge, merge_to_string, plan};
pub use module::{ExtractedConstant, ImportBinding, Literal, ModuleRecord};
pub use namespace::{derive_namespace, import_binding_name, is_valid_identifier};
pub use options::{DEFAULT_EXPORT_TARGET, DEFAULT_EXPORTS_VAR, DEFAULT_EXTENSIONS, MergeOptions};
pub use resolver::ModuleResolver;
pub use session::{MergeReport, MergeSession, PlannedModule};
pub use transform::{transform_module, transform_source};

pub use weld_gen::{PrintOptions, QuoteStyle};
