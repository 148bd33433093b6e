//! State of one merge run.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::Serialize;

use crate::assemble::{Assembled, assemble, verify_import_bindings};
use crate::closure::{ModuleGraph, build_closure};
use crate::error::Result;
use crate::layering::{assign_layers, detect_cycles, emission_order};
use crate::module::ModuleRecord;
use crate::namespace::relative_display;
use crate::options::MergeOptions;
use crate::resolver::ModuleResolver;

/// A module as it appears in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedModule {
    /// Path relative to the base directory
    pub path: String,
    pub namespace: String,
    pub layer: usize,
    pub entry: bool,
}

/// Summary of a finished merge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    /// Modules in emission order
    pub modules: Vec<PlannedModule>,
    /// Distinct hoisted constants
    pub constants: usize,
    /// Size of the merged document
    pub bytes: usize,
    /// Where the document was written, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// Entries, resolver and module graph of a merge run.
///
/// ```rust,no_run
/// use weld_core::{MergeOptions, MergeSession};
///
/// let mut session = MergeSession::new(MergeOptions::new("node_modules/lodash"))?;
/// session.add_entry("map")?;
/// session.add_entry("fp/convert")?;
/// session.build()?;
/// let code = session.render()?.code;
/// # Ok::<(), weld_core::MergeError>(())
/// ```
#[derive(Debug)]
pub struct MergeSession {
    options: MergeOptions,
    resolver: ModuleResolver,
    entries: IndexSet<PathBuf>,
    graph: ModuleGraph,
    built: bool,
}

impl MergeSession {
    /// Validate `options` and open the base directory.
    pub fn new(options: MergeOptions) -> Result<Self> {
        options.validate()?;
        let resolver = ModuleResolver::new(options.base_dir(), &options.extensions)?;

        Ok(Self {
            options,
            resolver,
            entries: IndexSet::new(),
            graph: ModuleGraph::default(),
            built: false,
        })
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Canonical base directory.
    pub fn base_dir(&self) -> &Path {
        self.resolver.base_dir()
    }

    /// Resolve and register an entry module. Repeated entries are ignored.
    pub fn add_entry(&mut self, entry: &str) -> Result<PathBuf> {
        let path = self.resolver.resolve_entry(entry)?;
        if !self.entries.insert(path.clone()) {
            tracing::debug!(entry, "duplicate entry ignored");
        }
        self.built = false;
        Ok(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    pub fn graph(&self) -> &ModuleGraph {
        &self.graph
    }

    /// Transform the closure of the entries, reject cycles and assign layers.
    pub fn build(&mut self) -> Result<()> {
        self.graph = build_closure(
            &self.entries,
            &self.resolver,
            &self.options.print,
            self.options.parallel,
        )?;
        detect_cycles(&self.graph, self.resolver.base_dir())?;
        assign_layers(&mut self.graph);
        self.built = true;

        tracing::debug!(
            entries = self.entries.len(),
            modules = self.graph.len(),
            "built module graph"
        );
        Ok(())
    }

    fn ensure_built(&mut self) -> Result<()> {
        if self.built { Ok(()) } else { self.build() }
    }

    /// Modules in emission order.
    pub fn ordered(&self) -> Vec<&ModuleRecord> {
        emission_order(&self.graph)
    }

    /// Emission order with layers, for reporting.
    pub fn plan(&self) -> Vec<PlannedModule> {
        self.ordered()
            .into_iter()
            .map(|record| PlannedModule {
                path: relative_display(&record.path, self.base_dir()),
                namespace: record.namespace.clone(),
                layer: record.layer,
                entry: self.entries.contains(&record.path),
            })
            .collect()
    }

    /// Assemble the merged document. Builds the graph first if needed.
    pub fn render(&mut self) -> Result<Assembled> {
        self.ensure_built()?;
        verify_import_bindings(&self.graph)?;

        let ordered = emission_order(&self.graph);
        assemble(
            &ordered,
            &self.entries,
            &self.graph,
            &self.options,
            self.resolver.base_dir(),
        )
    }

    pub(crate) fn report(&self, assembled: &Assembled, output: Option<PathBuf>) -> MergeReport {
        MergeReport {
            modules: self.plan(),
            constants: assembled.constants.len(),
            bytes: assembled.code.len(),
            output,
        }
    }
}
