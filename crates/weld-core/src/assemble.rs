//! Output assembly.
//!
//! The merged document is, in order: one declaration for every hoisted
//! constant, each module's namespacing declaration in emission order, the
//! exports object with one property per entry, and the assignment of that
//! object to the export target.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use weld_gen::reprint;

use crate::closure::ModuleGraph;
use crate::error::{MergeError, Result};
use crate::module::{ExtractedConstant, Literal, ModuleRecord};
use crate::namespace::relative_display;
use crate::options::MergeOptions;

#[derive(Debug, Clone)]
struct ConstantEntry {
    value: Literal,
    raw: String,
    origin: PathBuf,
}

/// Hoisted constants by name, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ConstantTable {
    entries: IndexMap<String, ConstantEntry>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constant extracted from `origin`.
    ///
    /// Returns `false` when an equal constant was already present.
    ///
    /// # Errors
    ///
    /// [`MergeError::ConstantConflict`] when the name is taken by a different
    /// value.
    pub fn insert(&mut self, constant: &ExtractedConstant, origin: &Path) -> Result<bool> {
        if let Some(existing) = self.entries.get(&constant.name) {
            if existing.value != constant.value {
                return Err(MergeError::ConstantConflict {
                    name: constant.name.clone(),
                    first_value: existing.value.to_string(),
                    first_path: existing.origin.clone(),
                    second_value: constant.value.to_string(),
                    second_path: origin.to_path_buf(),
                });
            }
            return Ok(false);
        }

        self.entries.insert(
            constant.name.clone(),
            ConstantEntry {
                value: constant.value.clone(),
                raw: constant.raw.clone(),
                origin: origin.to_path_buf(),
            },
        );
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `var A = <raw>, B = <raw>;`, or `None` for an empty table.
    pub fn declaration(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        let declarators = self
            .entries
            .iter()
            .map(|(name, entry)| format!("{name} = {}", entry.raw))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("var {declarators};"))
    }
}

/// Collect the constants of `modules` in emission order.
pub fn collect_constants<'a>(
    modules: impl IntoIterator<Item = &'a ModuleRecord>,
) -> Result<ConstantTable> {
    let mut table = ConstantTable::new();
    for record in modules {
        for constant in &record.constants {
            table.insert(constant, &record.path)?;
        }
    }
    Ok(table)
}

/// Check that every rewritten `require` names the namespace of the module it
/// resolved to.
pub fn verify_import_bindings(graph: &ModuleGraph) -> Result<()> {
    for record in graph.modules() {
        for import in &record.imports {
            let Some(target) = graph.get(&import.resolved) else {
                continue;
            };
            if target.namespace != import.binding {
                return Err(MergeError::ImportBindingMismatch {
                    importer: record.path.clone(),
                    specifier: import.specifier.clone(),
                    binding: import.binding.clone(),
                    namespace: target.namespace.clone(),
                });
            }
        }
    }
    Ok(())
}

/// The assembled document.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub code: String,
    pub constants: ConstantTable,
}

/// Build the merged document from modules already in emission order.
pub fn assemble(
    ordered: &[&ModuleRecord],
    entries: &IndexSet<PathBuf>,
    graph: &ModuleGraph,
    options: &MergeOptions,
    base_dir: &Path,
) -> Result<Assembled> {
    let constants = collect_constants(ordered.iter().copied())?;
    let mut pieces: Vec<String> = Vec::with_capacity(ordered.len() + 2);

    if let Some(declaration) = constants.declaration() {
        pieces.push(print_generated("constants", &declaration, options)?);
    }

    for record in ordered {
        let program = record.program.trim_end();
        if options.banner {
            let banner = relative_display(&record.path, base_dir).replace("*/", "*\\/");
            pieces.push(format!("/* module: {banner} */\n{program}"));
        } else {
            pieces.push(program.to_string());
        }
    }

    let exports = exports_block(entries, graph, options);
    pieces.push(print_generated("exports", &exports, options)?);

    let mut code = pieces.join("\n\n");
    code.push('\n');

    tracing::debug!(
        modules = ordered.len(),
        constants = constants.len(),
        bytes = code.len(),
        "assembled merged output"
    );

    Ok(Assembled { code, constants })
}

fn exports_block(entries: &IndexSet<PathBuf>, graph: &ModuleGraph, options: &MergeOptions) -> String {
    let exports_var = &options.exports_var;
    let mut lines = vec![format!("var {exports_var} = {{}};")];

    let mut seen: IndexSet<&str> = IndexSet::new();
    for entry in entries {
        let Some(record) = graph.get(entry) else {
            continue;
        };
        if seen.insert(record.namespace.as_str()) {
            lines.push(format!("{exports_var}.{ns} = {ns};", ns = record.namespace));
        }
    }

    lines.push(format!("{} = {exports_var};", options.export_target));
    lines.join("\n")
}

fn print_generated(label: &str, source: &str, options: &MergeOptions) -> Result<String> {
    let printed = reprint(source, &options.print).map_err(|source| MergeError::Codegen {
        path: PathBuf::from(format!("<{label}>")),
        source,
    })?;
    Ok(printed.trim_end().to_string())
}
