//! Source file enumeration.
//!
//! Walks a project root and yields every file whose extension is a
//! configured source extension, skipping excluded directories at any depth.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::AnalyzerConfig;
use crate::error::AnalysisResult;

/// A candidate source file found under the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path; the file's identity throughout the run.
    pub path: PathBuf,
    /// Size in bytes at enumeration time.
    pub size: u64,
}

/// Enumerates source files under `root`.
///
/// Entries are sorted by file name within each directory, so the output
/// order is stable for a given tree. A subdirectory that cannot be read is
/// skipped with a warning; failing to read `root` itself is an error.
pub fn walk_sources(root: &Path, config: &AnalyzerConfig) -> AnalysisResult<Vec<SourceFile>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, config));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "skipping unreadable path");
                continue;
            }
        };

        if !is_source_file(&entry, config) {
            continue;
        }

        files.push(SourceFile {
            size: file_size(&entry),
            path: entry.into_path(),
        });
    }

    debug!(root = %root.display(), count = files.len(), "enumerated source files");
    Ok(files)
}

/// Check if a directory should be skipped during traversal.
fn is_excluded_dir(entry: &DirEntry, config: &AnalyzerConfig) -> bool {
    // The root is never excluded, whatever it is called.
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    config.is_excluded_dir(name.as_ref())
}

/// Size of the file an entry names, following a symlink to its target.
fn file_size(entry: &DirEntry) -> u64 {
    let len = if entry.path_is_symlink() {
        fs::metadata(entry.path()).map(|m| m.len()).map_err(|e| e.to_string())
    } else {
        entry.metadata().map(|m| m.len()).map_err(|e| e.to_string())
    };

    len.unwrap_or_else(|e| {
        debug!(path = %entry.path().display(), error = %e, "could not stat file");
        0
    })
}

fn is_source_file(entry: &DirEntry, config: &AnalyzerConfig) -> bool {
    let is_file = entry.file_type().is_file()
        || (entry.path_is_symlink() && entry.path().is_file());
    if !is_file {
        return false;
    }

    entry
        .path()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| config.is_source_extension(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn relative_names(root: &Path, files: &[SourceFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_filters_by_extension() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.js", "");
        touch(dir.path(), "b.tsx", "");
        touch(dir.path(), "styles.css", "");
        touch(dir.path(), "README.md", "");

        let files = walk_sources(dir.path(), &AnalyzerConfig::default()).unwrap();
        assert_eq!(relative_names(dir.path(), &files), vec!["a.js", "b.tsx"]);
    }

    #[test]
    fn test_skips_excluded_dirs_at_any_depth() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/index.js", "");
        touch(dir.path(), "node_modules/react/index.js", "");
        touch(dir.path(), "packages/app/node_modules/lib/index.js", "");
        touch(dir.path(), ".git/hooks/pre-commit.js", "");
        touch(dir.path(), "packages/app/dist/bundle.js", "");

        let files = walk_sources(dir.path(), &AnalyzerConfig::default()).unwrap();
        assert_eq!(relative_names(dir.path(), &files), vec!["src/index.js"]);
    }

    #[test]
    fn test_records_file_size() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "index.js", "const a = 1;\n");

        let files = walk_sources(dir.path(), &AnalyzerConfig::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].size, 13);
    }

    #[test]
    fn test_sorted_enumeration() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "c.js", "");
        touch(dir.path(), "a.js", "");
        touch(dir.path(), "b.js", "");

        let files = walk_sources(dir.path(), &AnalyzerConfig::default()).unwrap();
        assert_eq!(
            relative_names(dir.path(), &files),
            vec!["a.js", "b.js", "c.js"]
        );
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(walk_sources(&missing, &AnalyzerConfig::default()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_reports_target_size() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        touch(outside.path(), "target.js", "export const x = 1;\n");
        std::os::unix::fs::symlink(outside.path().join("target.js"), dir.path().join("link.js"))
            .unwrap();

        let files = walk_sources(dir.path(), &AnalyzerConfig::default()).unwrap();
        assert_eq!(relative_names(dir.path(), &files), vec!["link.js"]);
        assert_eq!(files[0].size, 20);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a_locked/hidden.js", "");
        touch(dir.path(), "b_open/visible.js", "");
        touch(dir.path(), "index.js", "");

        let locked = dir.path().join("a_locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            // Permissions are not enforced (running as root).
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = walk_sources(dir.path(), &AnalyzerConfig::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let files = result.unwrap();
        assert_eq!(
            relative_names(dir.path(), &files),
            vec!["b_open/visible.js", "index.js"]
        );
    }
}
