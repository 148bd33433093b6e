//! Dependency closure of the entry modules.
//!
//! Modules are discovered breadth-first: the entries form the first
//! frontier, the not-yet-seen dependencies of a frontier form the next one.
//! Each distinct path is transformed exactly once, in discovery order.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use weld_gen::PrintOptions;

use crate::error::{MergeError, Result};
use crate::module::ModuleRecord;
use crate::resolver::ModuleResolver;
use crate::transform::transform_module;

/// Transformed modules keyed by path, in discovery order.
#[derive(Debug, Default)]
pub struct ModuleGraph {
    modules: IndexMap<PathBuf, ModuleRecord>,
}

impl ModuleGraph {
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&ModuleRecord> {
        self.modules.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.modules.contains_key(path)
    }

    /// Discovery index of `path`.
    pub fn index_of(&self, path: &Path) -> Option<usize> {
        self.modules.get_index_of(path)
    }

    /// Records in discovery order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.modules.values()
    }

    pub(crate) fn module_at(&self, index: usize) -> Option<&ModuleRecord> {
        self.modules.get_index(index).map(|(_, record)| record)
    }

    pub(crate) fn module_at_mut(&mut self, index: usize) -> Option<&mut ModuleRecord> {
        self.modules.get_index_mut(index).map(|(_, record)| record)
    }

    pub(crate) fn insert(&mut self, record: ModuleRecord) {
        self.modules.insert(record.path.clone(), record);
    }
}

impl FromIterator<ModuleRecord> for ModuleGraph {
    fn from_iter<I: IntoIterator<Item = ModuleRecord>>(iter: I) -> Self {
        let mut graph = Self::default();
        for record in iter {
            graph.insert(record);
        }
        graph
    }
}

/// Transform every module reachable from `entries`.
///
/// With `parallel` set, each frontier is transformed on the rayon pool;
/// results are merged in frontier order so the graph is identical either way.
pub fn build_closure(
    entries: &IndexSet<PathBuf>,
    resolver: &ModuleResolver,
    print: &PrintOptions,
    parallel: bool,
) -> Result<ModuleGraph> {
    let mut graph = ModuleGraph::default();
    let mut namespaces: FxHashMap<String, PathBuf> = FxHashMap::default();
    let mut frontier: Vec<PathBuf> = entries.iter().cloned().collect();
    let mut depth = 0usize;

    while !frontier.is_empty() {
        tracing::debug!(depth, modules = frontier.len(), "transforming frontier");

        // failures surface in discovery order in both modes
        let transformed: Vec<Result<ModuleRecord>> = if parallel {
            frontier
                .par_iter()
                .map(|path| transform_module(path, resolver, print))
                .collect()
        } else {
            frontier
                .iter()
                .map(|path| transform_module(path, resolver, print))
                .collect()
        };

        let mut next: IndexSet<PathBuf> = IndexSet::new();
        for result in transformed {
            let record = result?;

            if let Some(first) = namespaces.get(&record.namespace) {
                return Err(MergeError::NamespaceCollision {
                    namespace: record.namespace.clone(),
                    first: first.clone(),
                    second: record.path.clone(),
                });
            }
            namespaces.insert(record.namespace.clone(), record.path.clone());

            next.extend(record.dependencies.iter().cloned());
            graph.insert(record);
        }

        next.retain(|path| !graph.contains(path));
        frontier = next.into_iter().collect();
        depth += 1;
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture(files: &[(&str, &str)]) -> (TempDir, ModuleResolver) {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        let resolver = ModuleResolver::new(dir.path(), &[".js".to_string()]).unwrap();
        (dir, resolver)
    }

    fn entries(resolver: &ModuleResolver, names: &[&str]) -> IndexSet<PathBuf> {
        names
            .iter()
            .map(|name| resolver.resolve_entry(name).unwrap())
            .collect()
    }

    fn namespaces(graph: &ModuleGraph) -> Vec<&str> {
        graph.modules().map(|m| m.namespace.as_str()).collect()
    }

    const DIAMOND: &[(&str, &str)] = &[
        ("leaf.js", "module.exports = 1;"),
        ("mid1.js", "var leaf = require('./leaf');\nmodule.exports = leaf;"),
        ("mid2.js", "var leaf = require('./leaf');\nmodule.exports = leaf;"),
        ("top.js", "var mid1 = require('./mid1');\nvar mid2 = require('./mid2');\nmodule.exports = mid1 + mid2;"),
    ];

    #[test]
    fn test_breadth_first_discovery_order() {
        let (_dir, resolver) = fixture(DIAMOND);
        let graph = build_closure(
            &entries(&resolver, &["top"]),
            &resolver,
            &PrintOptions::default(),
            false,
        )
        .unwrap();
        assert_eq!(namespaces(&graph), vec!["top", "mid1", "mid2", "leaf"]);
    }

    #[test]
    fn test_shared_module_transformed_once() {
        let (_dir, resolver) = fixture(DIAMOND);
        let graph = build_closure(
            &entries(&resolver, &["mid1", "mid2"]),
            &resolver,
            &PrintOptions::default(),
            false,
        )
        .unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(namespaces(&graph), vec!["mid1", "mid2", "leaf"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (_dir, resolver) = fixture(DIAMOND);
        let roots = entries(&resolver, &["top"]);
        let sequential = build_closure(&roots, &resolver, &PrintOptions::default(), false).unwrap();
        let parallel = build_closure(&roots, &resolver, &PrintOptions::default(), true).unwrap();

        assert_eq!(namespaces(&sequential), namespaces(&parallel));
        for (a, b) in sequential.modules().zip(parallel.modules()) {
            assert_eq!(a.program, b.program);
        }
    }

    #[test]
    fn test_first_failure_in_discovery_order() {
        let (_dir, resolver) = fixture(&[
            ("broken.js", "var = ;"),
            ("bare.js", "require('./broken');"),
        ]);
        let roots = entries(&resolver, &["broken", "bare"]);
        for parallel in [false, true] {
            let err = build_closure(&roots, &resolver, &PrintOptions::default(), parallel)
                .unwrap_err();
            assert!(
                matches!(err, MergeError::Parse { ref path, .. } if path.ends_with("broken.js")),
                "parallel={parallel}: {err}"
            );
        }
    }

    #[test]
    fn test_namespace_collision() {
        let (_dir, resolver) = fixture(&[
            ("a/b.js", "module.exports = 1;"),
            ("a_b.js", "module.exports = 2;"),
        ]);
        let err = build_closure(
            &entries(&resolver, &["a/b", "a_b"]),
            &resolver,
            &PrintOptions::default(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, MergeError::NamespaceCollision { ref namespace, .. } if namespace == "a_b"));
    }
}
