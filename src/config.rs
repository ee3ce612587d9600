//! Analyzer configuration.
//!
//! Every convention the analyzer relies on (which directories are skipped,
//! which files count as source, how specifiers are resolved, which files are
//! entry points) lives in [`AnalyzerConfig`]. Defaults match the common
//! npm project layout; a JSON file can override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// What to do when neither a conventional entry file nor the manifest
/// `main` field yields an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPolicy {
    /// Seed reachability with the first enumerated file.
    ///
    /// This keeps the run going on unconventional layouts, at the cost of
    /// treating an arbitrary file as alive.
    #[default]
    Fallback,
    /// Fail the run with [`crate::analysis::AnalysisError::NoEntryPoint`].
    Strict,
}

/// Configuration for a single analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory names skipped at any depth.
    pub excluded_dirs: Vec<String>,

    /// File extensions (without the dot) treated as source files.
    pub extensions: Vec<String>,

    /// Suffixes appended to a specifier, in order, after the literal path.
    pub resolve_suffixes: Vec<String>,

    /// Conventional entry files, relative to the project root.
    pub entry_patterns: Vec<String>,

    /// Manifest file name, relative to the project root.
    pub manifest: String,

    /// Behaviour when no entry point is found.
    pub entry_policy: EntryPolicy,

    /// Upper bound on worker threads used for parsing. `None` uses the
    /// global rayon pool.
    pub concurrency: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: to_strings(&["node_modules", ".git", "dist"]),
            extensions: to_strings(&["js", "jsx", "ts", "tsx"]),
            resolve_suffixes: to_strings(&[
                ".js",
                ".jsx",
                ".ts",
                ".tsx",
                "/index.js",
                "/index.ts",
            ]),
            entry_patterns: to_strings(&[
                "index.js",
                "index.ts",
                "main.js",
                "main.ts",
                "app.js",
                "app.ts",
                "server.js",
                "server.ts",
                "src/index.js",
                "src/index.ts",
                "src/main.js",
                "src/main.ts",
            ]),
            manifest: "package.json".to_string(),
            entry_policy: EntryPolicy::Fallback,
            concurrency: None,
        }
    }
}

impl AnalyzerConfig {
    /// Loads a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AnalyzerConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one source extension is required".to_string(),
            ));
        }
        if self.concurrency == Some(0) {
            return Err(ConfigError::Invalid(
                "concurrency must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns true if `name` is an excluded directory name.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }

    /// Returns true if `ext` (without the dot) is a source extension.
    pub fn is_source_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exclusions() {
        let config = AnalyzerConfig::default();
        assert!(config.is_excluded_dir("node_modules"));
        assert!(config.is_excluded_dir(".git"));
        assert!(config.is_excluded_dir("dist"));
        assert!(!config.is_excluded_dir("src"));
    }

    #[test]
    fn test_source_extension_case_insensitive() {
        let config = AnalyzerConfig::default();
        assert!(config.is_source_extension("ts"));
        assert!(config.is_source_extension("TSX"));
        assert!(!config.is_source_extension("css"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AnalyzerConfig::from_json(r#"{"excluded_dirs": ["vendor"]}"#).unwrap();
        assert_eq!(config.excluded_dirs, vec!["vendor".to_string()]);
        assert_eq!(config.manifest, "package.json");
        assert_eq!(config.entry_policy, EntryPolicy::Fallback);
        assert_eq!(config.resolve_suffixes.len(), 6);
    }

    #[test]
    fn test_entry_policy_from_json() {
        let config = AnalyzerConfig::from_json(r#"{"entry_policy": "strict"}"#).unwrap();
        assert_eq!(config.entry_policy, EntryPolicy::Strict);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = AnalyzerConfig::from_json(r#"{"concurrency": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            AnalyzerConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
