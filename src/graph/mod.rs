//! Import graph construction.
//!
//! [`build_import_graph`] parses every source file, resolves its relative
//! imports and returns an [`ImportGraph`] (file -> imported files) together
//! with an [`ExportTable`] (file -> exported names).
//!
//! # Example
//!
//! ```rust
//! use deadscan::graph::ImportGraph;
//!
//! let mut graph = ImportGraph::new();
//! graph.add_module("/app/a.js", 0);
//! graph.add_module("/app/b.js", 0);
//! graph.add_import("/app/a.js", "/app/b.js");
//! graph.add_import("/app/b.js", "/app/a.js");
//!
//! assert!(graph.has_cycles());
//! ```

mod builder;
mod export_table;
mod import_graph;

pub use builder::{build_import_graph, GraphBuild, UnresolvedImport};
pub use export_table::ExportTable;
pub use import_graph::{CycleInfo, ImportEdge, ImportGraph, ModuleNode};
