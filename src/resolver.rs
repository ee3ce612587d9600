//! Import specifier resolution.
//!
//! Maps a relative specifier found in one file to the concrete file it
//! refers to, trying the literal path first and then each configured suffix
//! (`.js`, `.ts`, `/index.js`, ...). Bare package specifiers never resolve.

use std::path::{Component, Path, PathBuf};

use crate::config::AnalyzerConfig;

/// Returns true if `specifier` is a path rather than a package name.
///
/// `./x`, `../x`, `.` and `/abs/x` are paths; `react`, `@scope/pkg` and
/// `lodash/debounce` are packages.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier.starts_with('.') || specifier.starts_with('/')
}

/// Resolves import specifiers against the file system under a project root.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    root: PathBuf,
    suffixes: Vec<String>,
}

impl ImportResolver {
    /// Creates a resolver for the (absolute, normalized) project `root`.
    pub fn new(root: impl Into<PathBuf>, suffixes: Vec<String>) -> Self {
        Self {
            root: normalize_path(&root.into()),
            suffixes,
        }
    }

    /// Creates a resolver using the suffixes from `config`.
    pub fn from_config(root: impl Into<PathBuf>, config: &AnalyzerConfig) -> Self {
        Self::new(root, config.resolve_suffixes.clone())
    }

    /// The project root this resolver is bound to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `specifier` as written in `from_file`.
    ///
    /// Returns `None` for bare package specifiers, for specifiers that match
    /// no existing file, and for files outside the project root.
    pub fn resolve(&self, from_file: &Path, specifier: &str) -> Option<PathBuf> {
        if !is_relative_specifier(specifier) {
            return None;
        }

        let base = from_file.parent().unwrap_or(&self.root);
        self.resolve_from_dir(base, specifier)
    }

    /// Resolves `specifier` relative to a directory rather than a file.
    ///
    /// Used for manifest fields, which are relative to the project root.
    pub fn resolve_from_dir(&self, dir: &Path, specifier: &str) -> Option<PathBuf> {
        let joined = normalize_path(&dir.join(specifier));
        if !joined.starts_with(&self.root) {
            return None;
        }

        if joined.is_file() {
            return Some(joined);
        }

        let joined_str = joined.to_string_lossy();
        let trimmed = joined_str.trim_end_matches(['/', '\\']);
        self.suffixes
            .iter()
            .map(|suffix| normalize_path(Path::new(&format!("{trimmed}{suffix}"))))
            .filter(|candidate| candidate.starts_with(&self.root))
            .find(|candidate| candidate.is_file())
    }
}

/// Lexically normalizes a path: drops `.` components and folds `..` into
/// the preceding component. Does not touch the file system, so symlinks are
/// kept as written.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) && normalized.pop();
                if !popped && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}

/// Renders `path` relative to `root` with `/` separators.
///
/// Paths outside `root` are rendered in full.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(files: &[&str]) -> (TempDir, ImportResolver) {
        let dir = TempDir::new().unwrap();
        for rel in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        let resolver = ImportResolver::from_config(dir.path(), &AnalyzerConfig::default());
        (dir, resolver)
    }

    #[test]
    fn test_is_relative_specifier() {
        assert!(is_relative_specifier("./utils"));
        assert!(is_relative_specifier("../lib/a"));
        assert!(is_relative_specifier("/abs/path"));
        assert!(!is_relative_specifier("react"));
        assert!(!is_relative_specifier("@scope/pkg"));
        assert!(!is_relative_specifier("lodash/debounce"));
    }

    #[test]
    fn test_literal_path_first() {
        let (dir, resolver) = setup(&["index.js", "lib.js"]);
        let from = dir.path().join("index.js");
        assert_eq!(
            resolver.resolve(&from, "./lib.js"),
            Some(dir.path().join("lib.js"))
        );
    }

    #[test]
    fn test_extension_fallback_order() {
        let (dir, resolver) = setup(&["index.js", "util.ts", "util.tsx"]);
        let from = dir.path().join("index.js");
        assert_eq!(
            resolver.resolve(&from, "./util"),
            Some(dir.path().join("util.ts"))
        );
    }

    #[test]
    fn test_index_fallback() {
        let (dir, resolver) = setup(&["main.ts", "utils/index.ts"]);
        let from = dir.path().join("main.ts");
        assert_eq!(
            resolver.resolve(&from, "./utils"),
            Some(dir.path().join("utils/index.ts"))
        );
    }

    #[test]
    fn test_direct_file_beats_index() {
        let (dir, resolver) = setup(&["main.ts", "utils.js", "utils/index.js"]);
        let from = dir.path().join("main.ts");
        assert_eq!(
            resolver.resolve(&from, "./utils"),
            Some(dir.path().join("utils.js"))
        );
    }

    #[test]
    fn test_parent_directory_specifier() {
        let (dir, resolver) = setup(&["src/components/button.js", "src/theme.js"]);
        let from = dir.path().join("src/components/button.js");
        assert_eq!(
            resolver.resolve(&from, "../theme"),
            Some(dir.path().join("src/theme.js"))
        );
    }

    #[test]
    fn test_bare_specifier_is_unresolved() {
        let (dir, resolver) = setup(&["index.js", "react.js"]);
        let from = dir.path().join("index.js");
        assert_eq!(resolver.resolve(&from, "react"), None);
    }

    #[test]
    fn test_missing_file_is_unresolved() {
        let (dir, resolver) = setup(&["index.js"]);
        let from = dir.path().join("index.js");
        assert_eq!(resolver.resolve(&from, "./missing"), None);
    }

    #[test]
    fn test_outside_root_is_unresolved() {
        let (dir, _) = setup(&["outside.js", "project/index.js"]);
        let resolver =
            ImportResolver::from_config(dir.path().join("project"), &AnalyzerConfig::default());
        let from = dir.path().join("project/index.js");
        assert_eq!(resolver.resolve(&from, "../outside"), None);
    }

    #[test]
    fn test_suffix_never_escapes_root() {
        let (dir, _) = setup(&["project.js", "project/index.js"]);
        let root = dir.path().join("project");
        let resolver = ImportResolver::from_config(&root, &AnalyzerConfig::default());
        let from = root.join("index.js");
        // `<root>.js` sits next to the root, so `.` must fall through to the index file.
        assert_eq!(resolver.resolve(&from, "."), Some(root.join("index.js")));
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let (dir, resolver) = setup(&["index.js", "a.js"]);
        let from = dir.path().join("index.js");
        let first = resolver.resolve(&from, "./a");
        let second = resolver.resolve(&from, "./a");
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/a/b/./c/../d")),
            PathBuf::from("/a/b/d")
        );
        assert_eq!(normalize_path(Path::new("/a/../..")), PathBuf::from("/"));
        assert_eq!(normalize_path(Path::new("../x")), PathBuf::from("../x"));
    }

    #[test]
    fn test_relative_display() {
        assert_eq!(
            relative_display(Path::new("/p"), Path::new("/p/src/a.js")),
            "src/a.js"
        );
    }
}
