//! JSON export implementation.
//!
//! Exports analysis results in JSON format for machine-readable output.
//! The dead file list is never truncated here.

use super::{ExportData, Exporter};
use crate::analysis::DeadFileRecord;
use crate::parser::{Dependency, DependencyType};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable unresolved import for JSON output.
#[derive(Serialize)]
struct JsonUnresolved<'a> {
    from: &'a str,
    specifier: &'a str,
    line: usize,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    total_files: usize,
    dead_files: usize,
    dead_bytes: u64,
    unresolved_imports: usize,
    import_cycles: usize,
    parse_failures: usize,
    import_edges: usize,
    re_export_edges: usize,
    dependencies: usize,
    dev_dependencies: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    root: &'a str,
    entry_points: &'a [String],
    fallback_entry: bool,
    summary: JsonSummary,
    dead_files: &'a [DeadFileRecord],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    unresolved_imports: Vec<JsonUnresolved<'a>>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    import_cycles: &'a [String],
    #[serde(skip_serializing_if = "<[Dependency]>::is_empty")]
    dependencies: &'a [Dependency],
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let export = JsonExport {
            root: &data.root,
            entry_points: &data.entry_points,
            fallback_entry: data.fallback_entry,
            summary: JsonSummary {
                total_files: data.total_files,
                dead_files: data.dead_files.len(),
                dead_bytes: data.dead_bytes(),
                unresolved_imports: data.unresolved.len(),
                import_cycles: data.cycles.len(),
                parse_failures: data.parse_failures,
                import_edges: data.import_edges,
                re_export_edges: data.re_export_edges,
                dependencies: data.dependency_count(DependencyType::Production),
                dev_dependencies: data.dependency_count(DependencyType::Development),
            },
            dead_files: &data.dead_files,
            unresolved_imports: data
                .unresolved
                .iter()
                .map(|u| JsonUnresolved {
                    from: &u.from,
                    specifier: &u.specifier,
                    line: u.line,
                })
                .collect(),
            import_cycles: &data.cycles,
            dependencies: &data.dependencies,
        };

        serde_json::to_writer_pretty(&mut *writer, &export)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(writer)?;
        Ok(())
    }
}
