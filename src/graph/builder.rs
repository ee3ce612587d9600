//! Builds the import graph and export table for a set of source files.
//!
//! Files are read and parsed in parallel, each worker owning its own
//! [`ModuleParser`]. The per-file results are then folded into the graph
//! on the calling thread, so the graph is never written concurrently.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use super::{ExportTable, ImportGraph};
use crate::analysis::module::{ImportKind, ModuleParser};
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::resolver::ImportResolver;
use crate::walker::SourceFile;

/// A relative specifier that matched no file.
///
/// Bare package specifiers are never recorded here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedImport {
    /// File containing the import
    pub from: PathBuf,
    /// The specifier as written
    pub specifier: String,
    /// Line number in the importing file (1-indexed)
    pub line: usize,
}

/// Everything produced by one graph build.
#[derive(Debug, Clone, Default)]
pub struct GraphBuild {
    pub graph: ImportGraph,
    pub exports: ExportTable,
    pub unresolved: Vec<UnresolvedImport>,
    /// Number of files that could not be read or parsed
    pub parse_failures: usize,
}

/// What a single file contributes to the graph.
struct FileScan {
    path: PathBuf,
    parsed: bool,
    edges: Vec<(PathBuf, ImportKind)>,
    unresolved: Vec<UnresolvedImport>,
    exports: BTreeSet<String>,
}

impl FileScan {
    fn failed(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            parsed: false,
            edges: Vec::new(),
            unresolved: Vec::new(),
            exports: BTreeSet::new(),
        }
    }
}

/// Builds the import graph for `files`.
///
/// Every file gets a node, even if it fails to parse. Edges are only added
/// between files in `files`; a specifier resolving to anything else (a
/// stylesheet, a JSON file) contributes nothing.
pub fn build_import_graph(
    files: &[SourceFile],
    resolver: &ImportResolver,
    config: &AnalyzerConfig,
) -> AnalysisResult<GraphBuild> {
    // Surface grammar problems once, up front, instead of per file.
    ModuleParser::new().map_err(|_| AnalysisError::LanguageInit)?;

    let scan_all = || -> Vec<FileScan> {
        files
            .par_iter()
            .map_init(ModuleParser::new, |parser, file| match parser {
                Ok(parser) => scan_file(parser, &file.path, resolver),
                Err(e) => {
                    warn!(path = %file.path.display(), error = %e, "parser unavailable");
                    FileScan::failed(&file.path)
                }
            })
            .collect()
    };

    let scans = match config.concurrency {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(scan_all),
        None => scan_all(),
    };

    let mut build = GraphBuild {
        graph: ImportGraph::with_capacity(files.len(), files.len() * 2),
        ..GraphBuild::default()
    };

    for file in files {
        build.graph.add_module(&file.path, file.size);
    }

    for scan in scans {
        if !scan.parsed {
            build.parse_failures += 1;
            build.graph.mark_unparsed(&scan.path);
        }

        for (target, kind) in &scan.edges {
            if !build.graph.add_import_with_kind(&scan.path, target, *kind) {
                debug!(
                    from = %scan.path.display(),
                    to = %target.display(),
                    "import target is not a source file"
                );
            }
        }

        build.unresolved.extend(scan.unresolved);
        build.exports.insert(scan.path, scan.exports);
    }

    debug!(
        modules = build.graph.node_count(),
        imports = build.graph.edge_count(),
        unresolved = build.unresolved.len(),
        parse_failures = build.parse_failures,
        "built import graph"
    );

    Ok(build)
}

/// Parse one file and resolve its relative imports.
///
/// Read and syntax errors are logged and yield an empty contribution.
fn scan_file(parser: &mut ModuleParser, path: &Path, resolver: &ImportResolver) -> FileScan {
    let info = match parser.parse_file(path) {
        Ok(info) => info,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to analyze file");
            return FileScan::failed(path);
        }
    };

    let mut scan = FileScan {
        path: path.to_path_buf(),
        parsed: true,
        edges: Vec::new(),
        unresolved: Vec::new(),
        exports: info.exports.clone(),
    };

    for import in info.relative_imports() {
        match resolver.resolve(path, &import.specifier) {
            Some(target) => scan.edges.push((target, import.kind)),
            None => {
                warn!(
                    from = %path.display(),
                    specifier = %import.specifier,
                    line = import.line,
                    "unresolved relative import"
                );
                scan.unresolved.push(UnresolvedImport {
                    from: path.to_path_buf(),
                    specifier: import.specifier.clone(),
                    line: import.line,
                });
            }
        }
    }

    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::walk_sources;
    use std::fs;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn build(dir: &TempDir, config: &AnalyzerConfig) -> GraphBuild {
        let files = walk_sources(dir.path(), config).unwrap();
        let resolver = ImportResolver::from_config(dir.path(), config);
        build_import_graph(&files, &resolver, config).unwrap()
    }

    #[test]
    fn test_every_file_gets_a_node() {
        let dir = project(&[
            ("index.js", "import './lib.js';"),
            ("lib.js", "export const x = 1;"),
            ("broken.js", "import { from;"),
        ]);

        let result = build(&dir, &AnalyzerConfig::default());
        assert_eq!(result.graph.node_count(), 3);
        assert_eq!(result.graph.edge_count(), 1);
        assert_eq!(result.parse_failures, 1);
        assert!(!result.graph.get_module(&dir.path().join("broken.js")).unwrap().parsed);
        assert!(result
            .graph
            .imports_of(&dir.path().join("broken.js"))
            .is_empty());
    }

    #[test]
    fn test_exports_recorded() {
        let dir = project(&[
            ("index.js", "export default function main() {}"),
            ("lib.js", "export const a = 1; export function b() {}"),
        ]);

        let result = build(&dir, &AnalyzerConfig::default());
        assert!(result
            .exports
            .exports_symbol(&dir.path().join("index.js"), "default"));
        let lib = result.exports.get(&dir.path().join("lib.js")).unwrap();
        assert_eq!(lib.len(), 2);
    }

    #[test]
    fn test_bare_imports_are_not_unresolved() {
        let dir = project(&[(
            "index.js",
            "import React from 'react';\nimport missing from './missing';",
        )]);

        let result = build(&dir, &AnalyzerConfig::default());
        assert_eq!(result.graph.edge_count(), 0);
        assert_eq!(result.unresolved.len(), 1);
        assert_eq!(result.unresolved[0].specifier, "./missing");
        assert_eq!(result.unresolved[0].line, 2);
    }

    #[test]
    fn test_non_source_targets_dropped() {
        let dir = project(&[
            ("index.js", "import './styles.css';\nimport data from './data.json';"),
            ("styles.css", "body {}"),
            ("data.json", "{}"),
        ]);

        let result = build(&dir, &AnalyzerConfig::default());
        assert_eq!(result.graph.node_count(), 1);
        assert_eq!(result.graph.edge_count(), 0);
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn test_bounded_concurrency_matches_default() {
        let dir = project(&[
            ("index.js", "import './a'; import './b';"),
            ("a.js", "import './b';"),
            ("b.js", "export const b = 1;"),
        ]);

        let default = build(&dir, &AnalyzerConfig::default());
        let bounded = build(
            &dir,
            &AnalyzerConfig {
                concurrency: Some(1),
                ..AnalyzerConfig::default()
            },
        );

        assert_eq!(default.graph.edge_count(), bounded.graph.edge_count());
        assert_eq!(default.exports, bounded.exports);
    }
}
