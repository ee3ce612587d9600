//! CSV export implementation.
//!
//! One row per dead file, for spreadsheet use.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "path,reason,size_bytes")?;

        for dead in &data.dead_files {
            writeln!(
                writer,
                "{},{},{}",
                Self::escape_field(&dead.path),
                Self::escape_field(dead.reason.description()),
                dead.size
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_data;

    #[test]
    fn test_escape_field() {
        assert_eq!(CsvExporter::escape_field("simple"), "simple");
        assert_eq!(CsvExporter::escape_field("a,b"), "\"a,b\"");
        assert_eq!(CsvExporter::escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_rows() {
        let mut buffer = Vec::new();
        CsvExporter.export(&sample_data(), &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "path,reason,size_bytes");
        assert_eq!(lines[1], "old/legacy.js,Unreachable from entry points,2048");
        assert_eq!(lines[2], "\"orphan, copy.js\",Unreachable from entry points,10");
    }
}
