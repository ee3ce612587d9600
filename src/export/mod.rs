//! Export functionality for dead file analysis results.
//!
//! This module provides exporters for outputting analysis results in
//! various formats: JSON, CSV, and Markdown.

pub mod csv;
pub mod json;
pub mod markdown;

use crate::analysis::module::ImportKind;
use crate::analysis::{Analysis, DeadFileRecord};
use crate::graph::UnresolvedImport;
use crate::parser::{Dependency, DependencyType};
use crate::resolver::relative_display;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - one row per dead file
    Csv,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// A relative import that matched no file, rendered for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedEntry {
    pub from: String,
    pub specifier: String,
    pub line: usize,
}

/// Data container for export operations.
///
/// All paths are relative to the project root.
#[derive(Debug, Clone)]
pub struct ExportData {
    pub root: String,
    pub total_files: usize,
    pub entry_points: Vec<String>,
    /// True when entry points came from the first-file fallback
    pub fallback_entry: bool,
    pub dead_files: Vec<DeadFileRecord>,
    pub unresolved: Vec<UnresolvedEntry>,
    /// Each cycle formatted as `a.js -> b.js -> a.js`
    pub cycles: Vec<String>,
    pub parse_failures: usize,
    pub import_edges: usize,
    /// Edges that came from `export ... from` statements
    pub re_export_edges: usize,
    /// Packages declared in the manifest
    pub dependencies: Vec<Dependency>,
    /// Maximum number of dead files listed by human-readable formats
    pub display_limit: Option<usize>,
}

impl ExportData {
    /// Create export data from an analysis.
    pub fn new(analysis: &Analysis) -> Self {
        let root = &analysis.root;
        Self {
            root: root.display().to_string(),
            total_files: analysis.files.len(),
            entry_points: analysis.entry_paths(),
            fallback_entry: analysis.used_fallback_entry(),
            dead_files: analysis.dead_files.clone(),
            unresolved: analysis
                .unresolved
                .iter()
                .map(|u: &UnresolvedImport| UnresolvedEntry {
                    from: relative_display(root, &u.from),
                    specifier: u.specifier.clone(),
                    line: u.line,
                })
                .collect(),
            cycles: analysis.cycles.iter().map(|c| c.cycle_path(root)).collect(),
            parse_failures: analysis.parse_failures,
            import_edges: analysis.graph.edge_count(),
            re_export_edges: analysis.graph.edge_count_of_kind(ImportKind::ReExport),
            dependencies: analysis.dependencies.clone(),
            display_limit: None,
        }
    }

    /// Limit how many dead files human-readable formats list.
    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = Some(limit);
        self
    }

    /// Total size of dead files in bytes.
    pub fn dead_bytes(&self) -> u64 {
        self.dead_files.iter().map(|d| d.size).sum()
    }

    /// Number of declared dependencies of the given type.
    pub fn dependency_count(&self, dep_type: DependencyType) -> usize {
        self.dependencies
            .iter()
            .filter(|d| d.dep_type == dep_type)
            .count()
    }

    /// Dead files to display, and how many were left out.
    pub fn visible_dead_files(&self) -> (&[DeadFileRecord], usize) {
        match self.display_limit {
            Some(limit) if limit < self.dead_files.len() => {
                (&self.dead_files[..limit], self.dead_files.len() - limit)
            }
            _ => (&self.dead_files, 0),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Csv => csv::CsvExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Format a byte count for humans, e.g. `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}
