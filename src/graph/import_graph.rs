//! Import graph implementation using petgraph.
//!
//! Nodes are source files keyed by their absolute path; an edge `a -> b`
//! means `a` statically imports `b`. Parallel edges are collapsed, so the
//! out-neighbours of a node form a set. Self-edges are allowed.

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::analysis::module::ImportKind;
use crate::resolver::relative_display;

/// A source file in the import graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode {
    /// Absolute, normalized path of the file
    pub path: PathBuf,
    /// Size in bytes at enumeration time
    pub size: u64,
    /// False if the file could not be read or parsed; such a file has no
    /// out-edges but can still be imported.
    pub parsed: bool,
}

impl ModuleNode {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            parsed: true,
        }
    }
}

/// Edge metadata: how the import was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportEdge {
    pub kind: ImportKind,
}

impl Default for ImportEdge {
    fn default() -> Self {
        Self {
            kind: ImportKind::Import,
        }
    }
}

/// A directed graph of static imports between source files.
///
/// # Example
///
/// ```rust
/// use deadscan::graph::ImportGraph;
///
/// let mut graph = ImportGraph::new();
/// graph.add_module("/app/index.js", 10);
/// graph.add_module("/app/lib.js", 20);
/// assert!(graph.add_import("/app/index.js", "/app/lib.js"));
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    /// The underlying directed graph
    graph: DiGraph<ModuleNode, ImportEdge>,
    /// Maps file paths to their node indices for O(1) lookup
    node_indices: HashMap<PathBuf, NodeIndex>,
}

impl ImportGraph {
    /// Creates a new empty import graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new graph with pre-allocated capacity.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            node_indices: HashMap::with_capacity(nodes),
        }
    }

    /// Adds a module to the graph.
    ///
    /// If the path is already present, returns its existing node index
    /// without modification.
    pub fn add_module(&mut self, path: impl AsRef<Path>, size: u64) -> NodeIndex {
        let path = path.as_ref();
        if let Some(&idx) = self.node_indices.get(path) {
            return idx;
        }

        let idx = self.graph.add_node(ModuleNode::new(path, size));
        self.node_indices.insert(path.to_path_buf(), idx);
        idx
    }

    /// Marks a module as having failed to parse.
    pub fn mark_unparsed(&mut self, path: &Path) {
        if let Some(&idx) = self.node_indices.get(path) {
            self.graph[idx].parsed = false;
        }
    }

    /// Adds an import edge from `from` to `to`.
    ///
    /// Returns `false` if either module doesn't exist. Adding an edge that
    /// already exists is a no-op that returns `true`.
    pub fn add_import(&mut self, from: impl AsRef<Path>, to: impl AsRef<Path>) -> bool {
        self.add_import_with_kind(from, to, ImportKind::Import)
    }

    /// Adds an import edge recording how it was declared.
    pub fn add_import_with_kind(
        &mut self,
        from: impl AsRef<Path>,
        to: impl AsRef<Path>,
        kind: ImportKind,
    ) -> bool {
        let (Some(&from_idx), Some(&to_idx)) = (
            self.node_indices.get(from.as_ref()),
            self.node_indices.get(to.as_ref()),
        ) else {
            return false;
        };

        if self.graph.find_edge(from_idx, to_idx).is_none() {
            self.graph.add_edge(from_idx, to_idx, ImportEdge { kind });
        }
        true
    }

    /// Gets a module by path.
    pub fn get_module(&self, path: &Path) -> Option<&ModuleNode> {
        self.node_indices
            .get(path)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Returns true if the graph contains a module with this path.
    pub fn contains(&self, path: &Path) -> bool {
        self.node_indices.contains_key(path)
    }

    /// Files directly imported by `path`.
    pub fn imports_of(&self, path: &Path) -> Vec<&Path> {
        self.neighbors(path, Direction::Outgoing)
    }

    /// Files that directly import `path`.
    pub fn importers_of(&self, path: &Path) -> Vec<&Path> {
        self.neighbors(path, Direction::Incoming)
    }

    fn neighbors(&self, path: &Path, direction: Direction) -> Vec<&Path> {
        let Some(&idx) = self.node_indices.get(path) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].path.as_path())
            .collect()
    }

    /// All modules, in insertion order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleNode> {
        self.graph.node_weights()
    }

    pub(crate) fn node_index(&self, path: &Path) -> Option<NodeIndex> {
        self.node_indices.get(path).copied()
    }

    pub(crate) fn successors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Outgoing)
    }

    pub(crate) fn module_at(&self, idx: NodeIndex) -> &ModuleNode {
        &self.graph[idx]
    }

    /// Returns the number of modules in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of import edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the number of edges declared as `kind`.
    ///
    /// A file both importing and re-exporting the same target keeps the
    /// kind of whichever statement came first.
    pub fn edge_count_of_kind(&self, kind: ImportKind) -> usize {
        self.graph.edge_weights().filter(|e| e.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns true if any import cycle exists, including self-imports.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Detects and returns all import cycles.
    ///
    /// Each cycle is a strongly connected component with more than one
    /// module, or a single module that imports itself.
    pub fn detect_cycles(&self) -> Vec<CycleInfo> {
        let mut cycles = Vec::new();

        for scc in tarjan_scc(&self.graph) {
            let is_cycle = scc.len() > 1
                || (scc.len() == 1 && self.graph.contains_edge(scc[0], scc[0]));
            if !is_cycle {
                continue;
            }

            let mut nodes: Vec<PathBuf> = scc
                .iter()
                .map(|&idx| self.graph[idx].path.clone())
                .collect();
            nodes.sort();
            cycles.push(CycleInfo { nodes });
        }

        cycles.sort_by(|a, b| a.nodes.cmp(&b.nodes));
        cycles
    }

    /// Returns the set of modules that are part of any cycle.
    pub fn get_modules_in_cycles(&self) -> HashSet<PathBuf> {
        self.detect_cycles()
            .into_iter()
            .flat_map(|c| c.nodes)
            .collect()
    }
}

/// A group of modules that import each other, directly or transitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    /// Modules in the cycle, sorted by path
    pub nodes: Vec<PathBuf>,
}

impl CycleInfo {
    /// Formats the cycle relative to `root`, e.g. `"a.js -> b.js -> a.js"`.
    pub fn cycle_path(&self, root: &Path) -> String {
        let Some(first) = self.nodes.first() else {
            return String::new();
        };
        let mut parts: Vec<String> = self
            .nodes
            .iter()
            .map(|p| relative_display(root, p))
            .collect();
        parts.push(relative_display(root, first));
        parts.join(" -> ")
    }

    /// Returns the number of modules in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
