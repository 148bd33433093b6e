//! Longest-path layering of the module graph.
//!
//! Every dependency ends up on a strictly higher layer than each module that
//! requires it. Emitting in descending layer order therefore declares every
//! namespace before the first closure that reads it.

use std::cmp::Reverse;
use std::collections::VecDeque;
use std::path::Path;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use crate::closure::ModuleGraph;
use crate::error::{MergeError, Result};
use crate::module::ModuleRecord;
use crate::namespace::relative_display;

/// Dependency indices per module, in discovery-index space.
fn dependency_indices(graph: &ModuleGraph) -> Vec<Vec<usize>> {
    graph
        .modules()
        .map(|record| {
            record
                .dependencies
                .iter()
                .filter_map(|dep| graph.index_of(dep))
                .collect()
        })
        .collect()
}

/// Fail with the first cycle found, in discovery order.
///
/// Self-imports count as cycles.
pub fn detect_cycles(graph: &ModuleGraph, base_dir: &Path) -> Result<()> {
    let deps = dependency_indices(graph);

    let mut digraph: DiGraph<usize, ()> = DiGraph::with_capacity(deps.len(), 0);
    let nodes: Vec<NodeIndex> = (0..deps.len()).map(|i| digraph.add_node(i)).collect();
    for (from, targets) in deps.iter().enumerate() {
        for &to in targets {
            digraph.update_edge(nodes[from], nodes[to], ());
        }
    }

    let cyclic = tarjan_scc(&digraph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|&node| digraph.contains_edge(node, node))
        })
        .map(|component| {
            let mut members: Vec<usize> = component.iter().map(|&node| digraph[node]).collect();
            members.sort_unstable();
            members
        })
        .min_by_key(|members| members[0]);

    let Some(members) = cyclic else {
        return Ok(());
    };

    let cycle = cycle_path(&deps, &members)
        .into_iter()
        .filter_map(|index| graph.module_at(index))
        .map(|record| relative_display(&record.path, base_dir))
        .collect::<Vec<_>>()
        .join(" -> ");

    Err(MergeError::CircularDependency { cycle })
}

/// Shortest path from the first member back to itself within the component.
fn cycle_path(deps: &[Vec<usize>], members: &[usize]) -> Vec<usize> {
    let start = members[0];
    let mut parent: FxHashMap<usize, usize> = FxHashMap::default();
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        for &next in &deps[node] {
            if members.binary_search(&next).is_err() {
                continue;
            }
            if next == start {
                let mut path = vec![node];
                let mut cursor = node;
                while cursor != start {
                    match parent.get(&cursor) {
                        Some(&previous) => cursor = previous,
                        None => break,
                    }
                    path.push(cursor);
                }
                path.reverse();
                path.push(start);
                return path;
            }
            if !parent.contains_key(&next) {
                parent.insert(next, node);
                queue.push_back(next);
            }
        }
    }

    vec![start, start]
}

/// Assign layers in discovery order.
///
/// A module starts one layer above the deepest already-processed module that
/// requires it; its already-processed dependencies are then pushed at least
/// one layer further, transitively. The graph must be acyclic.
pub fn assign_layers(graph: &mut ModuleGraph) {
    let deps = dependency_indices(graph);
    let count = deps.len();

    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (from, targets) in deps.iter().enumerate() {
        for &to in targets {
            dependents[to].push(from);
        }
    }

    let mut layers = vec![0usize; count];
    let mut processed = vec![false; count];

    for index in 0..count {
        layers[index] = dependents[index]
            .iter()
            .filter(|&&dependent| processed[dependent])
            .map(|&dependent| layers[dependent] + 1)
            .max()
            .unwrap_or(0);

        let mut stack = vec![index];
        while let Some(node) = stack.pop() {
            for &dep in &deps[node] {
                if processed[dep] && layers[dep] < layers[node] + 1 {
                    layers[dep] = layers[node] + 1;
                    stack.push(dep);
                }
            }
        }

        processed[index] = true;
    }

    for (index, layer) in layers.into_iter().enumerate() {
        if let Some(record) = graph.module_at_mut(index) {
            tracing::trace!(namespace = %record.namespace, layer, "assigned layer");
            record.layer = layer;
        }
    }
}

/// Records sorted by descending layer; ties keep discovery order.
pub fn emission_order(graph: &ModuleGraph) -> Vec<&ModuleRecord> {
    let mut ordered: Vec<&ModuleRecord> = graph.modules().collect();
    ordered.sort_by_key(|record| Reverse(record.layer));
    ordered
}
