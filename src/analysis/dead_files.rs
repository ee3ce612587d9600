//! Dead file detection.
//!
//! Ties the pipeline together: walk the project, build the import graph,
//! select entry points, traverse, and report every file that was not
//! reached.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use tracing::{info, info_span};

use super::reachability::find_reachable;
use crate::config::AnalyzerConfig;
use crate::entry::{select_entry_points, EntryPoint, EntrySource};
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{build_import_graph, CycleInfo, ExportTable, ImportGraph, UnresolvedImport};
use crate::parser::{extract_dependencies, read_manifest, Dependency};
use crate::resolver::{relative_display, ImportResolver};
use crate::walker::{walk_sources, SourceFile};

/// Why a file was reported dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeadReason {
    /// Not transitively imported by any entry point
    Unreachable,
}

impl DeadReason {
    pub fn description(&self) -> &'static str {
        match self {
            DeadReason::Unreachable => "Unreachable from entry points",
        }
    }
}

impl fmt::Display for DeadReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl Serialize for DeadReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.description())
    }
}

/// A file not reachable from any entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadFileRecord {
    /// Path relative to the project root, `/`-separated
    pub path: String,
    pub reason: DeadReason,
    /// Size in bytes
    pub size: u64,
}

/// The full result of one analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Canonical project root
    pub root: PathBuf,
    /// Every enumerated source file, in walk order
    pub files: Vec<SourceFile>,
    pub entry_points: Vec<EntryPoint>,
    pub graph: ImportGraph,
    pub exports: ExportTable,
    /// Dead files sorted by path
    pub dead_files: Vec<DeadFileRecord>,
    /// Relative imports that matched no file
    pub unresolved: Vec<UnresolvedImport>,
    pub cycles: Vec<CycleInfo>,
    pub parse_failures: usize,
    /// Packages declared in the project manifest, if there is one
    pub dependencies: Vec<Dependency>,
}

impl Analysis {
    pub fn dead_count(&self) -> usize {
        self.dead_files.len()
    }

    pub fn alive_count(&self) -> usize {
        self.files.len() - self.dead_files.len()
    }

    /// Total size in bytes of all dead files.
    pub fn dead_bytes(&self) -> u64 {
        self.dead_files.iter().map(|d| d.size).sum()
    }

    /// True if reachability was seeded by the arbitrary-file fallback.
    ///
    /// Callers should treat the dead-file list as low confidence in that case.
    pub fn used_fallback_entry(&self) -> bool {
        self.entry_points
            .iter()
            .any(|e| e.source == EntrySource::Fallback)
    }

    /// Entry points relative to the root.
    pub fn entry_paths(&self) -> Vec<String> {
        self.entry_points
            .iter()
            .map(|e| relative_display(&self.root, &e.path))
            .collect()
    }
}

/// Runs dead file analysis with a fixed configuration.
///
/// An `Analyzer` holds no per-run state and can be reused, including from
/// several threads at once.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Runs the full analysis on the project at `root`.
    pub fn analyze(&self, root: &Path) -> AnalysisResult<Analysis> {
        let root = prepare_root(root)?;
        let span = info_span!("analyze", root = %root.display());
        let _enter = span.enter();

        let files = walk_sources(&root, &self.config)?;
        let resolver = ImportResolver::from_config(&root, &self.config);

        let build = build_import_graph(&files, &resolver, &self.config)?;
        let entry_points = select_entry_points(&root, &files, &resolver, &self.config)?;

        let entry_paths: Vec<&Path> = entry_points.iter().map(|e| e.path.as_path()).collect();
        let reachable = find_reachable(&build.graph, &entry_paths);

        let mut dead_files: Vec<DeadFileRecord> = files
            .iter()
            .filter(|f| !reachable.contains(&f.path))
            .map(|f| DeadFileRecord {
                path: relative_display(&root, &f.path),
                reason: DeadReason::Unreachable,
                size: f.size,
            })
            .collect();
        dead_files.sort_by(|a, b| a.path.cmp(&b.path));

        let cycles = build.graph.detect_cycles();
        let dependencies = read_manifest(&root, &self.config.manifest)
            .map(|pkg| extract_dependencies(&pkg))
            .unwrap_or_default();

        info!(
            files = files.len(),
            entry_points = entry_points.len(),
            reachable = reachable.len(),
            dead = dead_files.len(),
            "analysis complete"
        );

        Ok(Analysis {
            root,
            files,
            entry_points,
            graph: build.graph,
            exports: build.exports,
            dead_files,
            unresolved: build.unresolved,
            cycles,
            parse_failures: build.parse_failures,
            dependencies,
        })
    }

    /// Returns only the dead files of the project at `root`, sorted by path.
    pub fn detect_dead_files(&self, root: &Path) -> AnalysisResult<Vec<DeadFileRecord>> {
        self.analyze(root).map(|analysis| analysis.dead_files)
    }
}

/// Detects dead files under `root` with the default configuration.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// let dead = deadscan::detect_dead_files(Path::new("./my-app"))?;
/// for file in &dead {
///     println!("{} ({} bytes): {}", file.path, file.size, file.reason);
/// }
/// # Ok::<(), deadscan::AnalysisError>(())
/// ```
pub fn detect_dead_files(root: &Path) -> AnalysisResult<Vec<DeadFileRecord>> {
    Analyzer::default().detect_dead_files(root)
}

/// Runs the full analysis under `root` with the default configuration.
pub fn analyze(root: &Path) -> AnalysisResult<Analysis> {
    Analyzer::default().analyze(root)
}

/// Canonicalizes the root so every path in the run shares one absolute form.
fn prepare_root(root: &Path) -> AnalysisResult<PathBuf> {
    let canonical = fs::canonicalize(root).map_err(|source| AnalysisError::RootInaccessible {
        path: root.to_path_buf(),
        source,
    })?;

    if !canonical.is_dir() {
        return Err(AnalysisError::NotADirectory(canonical));
    }

    Ok(canonical)
}
