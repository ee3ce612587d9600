//! deadscan - static reachability analyzer for JavaScript/TypeScript projects
//!
//! This crate parses a project's module files, builds a directed import
//! graph, picks entry points and reports every file that no entry point
//! transitively imports.

pub mod analysis;
pub mod config;
pub mod entry;
pub mod error;
pub mod export;
pub mod graph;
pub mod logging;
pub mod parser;
pub mod resolver;
pub mod walker;

pub use analysis::{analyze, detect_dead_files, Analysis, Analyzer, DeadFileRecord, DeadReason};
pub use config::{AnalyzerConfig, EntryPolicy};
pub use error::{AnalysisError, AnalysisResult};
