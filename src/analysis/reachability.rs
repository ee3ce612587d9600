//! Breadth-first reachability over the import graph.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::graph::ImportGraph;

/// Returns every module reachable from any of `entries`, entries included.
///
/// All entries form the initial frontier of a single traversal. A module is
/// marked visited when it is enqueued, so each module is enqueued at most
/// once and cycles (including self-imports) terminate. Entries that are not
/// in the graph are ignored.
pub fn find_reachable<P: AsRef<Path>>(graph: &ImportGraph, entries: &[P]) -> HashSet<PathBuf> {
    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();

    for entry in entries {
        if let Some(idx) = graph.node_index(entry.as_ref()) {
            if !visited[idx.index()] {
                visited[idx.index()] = true;
                queue.push_back(idx);
            }
        }
    }

    let mut reachable = HashSet::new();
    while let Some(current) = queue.pop_front() {
        reachable.insert(graph.module_at(current).path.clone());

        for next in graph.successors(current) {
            if !visited[next.index()] {
                visited[next.index()] = true;
                queue.push_back(next);
            }
        }
    }

    reachable
}
