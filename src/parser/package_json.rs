//! Parser for npm package.json files.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::types::{Dependency, DependencyType, PackageJson};

/// Errors that can occur during package.json parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a package.json file from a file path.
pub fn parse_file(path: &Path) -> ParseResult<PackageJson> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a package.json from a string.
///
/// # Example
///
/// ```
/// use deadscan::parser::package_json::parse_str;
///
/// let json = r#"{"name": "my-app", "version": "1.0.0"}"#;
/// let pkg = parse_str(json).unwrap();
/// assert_eq!(pkg.name, Some("my-app".to_string()));
/// ```
pub fn parse_str(content: &str) -> ParseResult<PackageJson> {
    let pkg: PackageJson = serde_json::from_str(content)?;
    Ok(pkg)
}

/// Reads the manifest at `root/file_name`, treating a missing or malformed
/// manifest as absent.
pub fn read_manifest(root: &Path, file_name: &str) -> Option<PackageJson> {
    let path = root.join(file_name);
    match parse_file(&path) {
        Ok(pkg) => Some(pkg),
        Err(ParseError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "ignoring unreadable manifest");
            None
        }
    }
}

/// Extracts all dependencies from a PackageJson into a normalized list.
///
/// Production dependencies come first, each table in name order.
///
/// # Example
///
/// ```
/// use deadscan::parser::package_json::{parse_str, extract_dependencies};
/// use deadscan::parser::types::DependencyType;
///
/// let json = r#"{
///     "name": "my-app",
///     "dependencies": {"react": "^18.0.0"},
///     "devDependencies": {"typescript": "^5.0.0"}
/// }"#;
///
/// let pkg = parse_str(json).unwrap();
/// let deps = extract_dependencies(&pkg);
///
/// assert_eq!(deps.len(), 2);
/// assert_eq!(deps[0].dep_type, DependencyType::Production);
/// assert_eq!(deps[1].name, "typescript");
/// ```
pub fn extract_dependencies(pkg: &PackageJson) -> Vec<Dependency> {
    let mut deps = Vec::new();

    if let Some(ref dependencies) = pkg.dependencies {
        for (name, version) in dependencies {
            deps.push(Dependency::new(name, version, DependencyType::Production));
        }
    }

    if let Some(ref dev_dependencies) = pkg.dev_dependencies {
        for (name, version) in dev_dependencies {
            deps.push(Dependency::new(name, version, DependencyType::Development));
        }
    }

    deps
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE_PACKAGE_JSON: &str = r#"{
        "name": "test-app",
        "version": "1.0.0",
        "main": "src/server.js",
        "dependencies": {
            "react": "^18.2.0",
            "lodash": "^4.17.21"
        },
        "devDependencies": {
            "typescript": "^5.0.0"
        },
        "scripts": {"build": "tsc"}
    }"#;

    #[test]
    fn test_parse_str_valid() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();

        assert_eq!(pkg.name, Some("test-app".to_string()));
        assert_eq!(pkg.main_entry(), Some("src/server.js"));
    }

    #[test]
    fn test_parse_str_empty_object() {
        let pkg = parse_str("{}").unwrap();

        assert!(pkg.name.is_none());
        assert!(pkg.main.is_none());
    }

    #[test]
    fn test_parse_str_invalid_json() {
        let result = parse_str("{ invalid json }");
        assert!(matches!(result.unwrap_err(), ParseError::JsonError(_)));
    }

    #[test]
    fn test_extract_dependencies() {
        let pkg = parse_str(SAMPLE_PACKAGE_JSON).unwrap();
        let deps = extract_dependencies(&pkg);

        let names: Vec<_> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["lodash", "react", "typescript"]);
        assert_eq!(deps[2].dep_type, DependencyType::Development);
    }

    #[test]
    fn test_read_manifest_missing() {
        let dir = TempDir::new().unwrap();
        assert!(read_manifest(dir.path(), "package.json").is_none());
    }

    #[test]
    fn test_read_manifest_malformed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{ nope").unwrap();
        assert!(read_manifest(dir.path(), "package.json").is_none());
    }

    #[test]
    fn test_read_manifest_present() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), SAMPLE_PACKAGE_JSON).unwrap();
        let pkg = read_manifest(dir.path(), "package.json").unwrap();
        assert_eq!(pkg.version.as_deref(), Some("1.0.0"));
    }
}
