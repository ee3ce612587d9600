//! Source code analysis module for deadscan.
//!
//! This module provides the per-file module parser and the reachability
//! analysis that turns an import graph into a list of dead files.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use deadscan::analysis::{Analyzer, ModuleParser, SourceLanguage};
//! use deadscan::config::AnalyzerConfig;
//!
//! // Parse a single file
//! let mut parser = ModuleParser::new()?;
//! let info = parser.parse_file(Path::new("src/index.ts"))?;
//! for import in info.relative_imports() {
//!     println!("{} (line {})", import.specifier, import.line);
//! }
//!
//! // Analyze an entire project
//! let analysis = Analyzer::new(AnalyzerConfig::default()).analyze(Path::new("."))?;
//! for dead in &analysis.dead_files {
//!     println!("{}: {}", dead.path, dead.reason);
//! }
//! ```

pub mod dead_files;
pub mod module;
pub mod reachability;

pub use crate::error::{AnalysisError, AnalysisResult};
pub use dead_files::{analyze, detect_dead_files, Analysis, Analyzer, DeadFileRecord, DeadReason};
pub use module::{
    ImportKind, ModuleError, ModuleInfo, ModuleParser, ModuleResult, SourceLanguage, StaticImport,
};
pub use reachability::find_reachable;
