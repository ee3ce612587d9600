//! Markdown export implementation.
//!
//! Exports analysis results in Markdown format for documentation and
//! reporting. Long dead file lists are truncated to the display limit.

use super::{format_size, ExportData, Exporter};
use crate::parser::DependencyType;
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "# Dead File Report")?;
        writeln!(writer)?;
        writeln!(writer, "**Project:** `{}`", data.root)?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Value |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Source Files | {} |", data.total_files)?;
        writeln!(writer, "| Dead Files | {} |", data.dead_files.len())?;
        writeln!(writer, "| Dead Code Size | {} |", format_size(data.dead_bytes()))?;
        writeln!(writer, "| Unresolved Imports | {} |", data.unresolved.len())?;
        writeln!(writer, "| Import Cycles | {} |", data.cycles.len())?;
        writeln!(writer, "| Unparseable Files | {} |", data.parse_failures)?;
        writeln!(
            writer,
            "| Import Edges | {} ({} re-exports) |",
            data.import_edges, data.re_export_edges
        )?;
        if !data.dependencies.is_empty() {
            writeln!(
                writer,
                "| Declared Dependencies | {} ({} {}, {} {}) |",
                data.dependencies.len(),
                data.dependency_count(DependencyType::Production),
                DependencyType::Production.label(),
                data.dependency_count(DependencyType::Development),
                DependencyType::Development.label()
            )?;
        }
        writeln!(writer)?;

        // Entry points
        writeln!(writer, "## Entry Points")?;
        writeln!(writer)?;
        if data.entry_points.is_empty() {
            writeln!(writer, "_No source files found._")?;
        } else {
            for entry in &data.entry_points {
                writeln!(writer, "- `{}`", entry)?;
            }
        }
        if data.fallback_entry {
            writeln!(writer)?;
            writeln!(
                writer,
                "> **Note:** no conventional or manifest entry point was found; \
                 the first source file was used. Results may be inaccurate."
            )?;
        }
        writeln!(writer)?;

        // Dead files
        writeln!(writer, "## Dead Files")?;
        writeln!(writer)?;
        if data.dead_files.is_empty() {
            writeln!(writer, "_No dead files found._")?;
            writeln!(writer)?;
        } else {
            let (shown, hidden) = data.visible_dead_files();
            writeln!(writer, "| File | Reason | Size |")?;
            writeln!(writer, "|------|--------|------|")?;
            for dead in shown {
                writeln!(
                    writer,
                    "| `{}` | {} | {} |",
                    dead.path,
                    dead.reason,
                    format_size(dead.size)
                )?;
            }
            if hidden > 0 {
                writeln!(writer)?;
                writeln!(writer, "_... and {} more_", hidden)?;
            }
            writeln!(writer)?;
        }

        if !data.unresolved.is_empty() {
            writeln!(writer, "## Unresolved Imports")?;
            writeln!(writer)?;
            writeln!(writer, "| File | Line | Specifier |")?;
            writeln!(writer, "|------|------|-----------|")?;
            for u in &data.unresolved {
                writeln!(writer, "| `{}` | {} | `{}` |", u.from, u.line, u.specifier)?;
            }
            writeln!(writer)?;
        }

        if !data.cycles.is_empty() {
            writeln!(writer, "## Import Cycles")?;
            writeln!(writer)?;
            for cycle in &data.cycles {
                writeln!(writer, "- `{}`", cycle)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}
