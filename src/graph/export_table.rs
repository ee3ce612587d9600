//! Per-file exported symbol names.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Maps each source file to the names it exports.
///
/// Built from the same syntax walk as the import graph. Reachability does
/// not consult it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTable {
    exports: BTreeMap<PathBuf, BTreeSet<String>>,
}

impl ExportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the exports of `path`, replacing any previous entry.
    pub fn insert(&mut self, path: impl Into<PathBuf>, names: BTreeSet<String>) {
        self.exports.insert(path.into(), names);
    }

    /// Exported names of `path`, if the file is known.
    pub fn get(&self, path: &Path) -> Option<&BTreeSet<String>> {
        self.exports.get(path)
    }

    /// Returns true if `path` exports `name`.
    pub fn exports_symbol(&self, path: &Path, name: &str) -> bool {
        self.get(path).is_some_and(|names| names.contains(name))
    }

    /// Iterates over files and their exports in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &BTreeSet<String>)> {
        self.exports.iter()
    }

    /// Number of files in the table.
    pub fn len(&self) -> usize {
        self.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }

    /// Total number of exported names across all files.
    pub fn symbol_count(&self) -> usize {
        self.exports.values().map(BTreeSet::len).sum()
    }
}
