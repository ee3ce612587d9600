//! Entry-point selection.
//!
//! Entry points seed the reachability traversal. They come from, in order:
//! conventional file names (`index.js`, `src/main.ts`, ...), then the
//! manifest `main` field. If neither matches, the first enumerated file is
//! used so that the traversal always has a seed. That fallback is a policy
//! choice: it keeps unconventional projects analyzable but makes an
//! arbitrary file alive. [`EntryPolicy::Strict`] turns it into an error.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{AnalyzerConfig, EntryPolicy};
use crate::error::{AnalysisError, AnalysisResult};
use crate::parser::read_manifest;
use crate::resolver::{normalize_path, ImportResolver};
use crate::walker::SourceFile;

/// Why a file was chosen as an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    /// Matched a conventional entry file name
    Convention,
    /// Named by the manifest `main` field
    Manifest,
    /// Picked because nothing else matched
    Fallback,
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntrySource::Convention => "convention",
            EntrySource::Manifest => "manifest",
            EntrySource::Fallback => "fallback",
        };
        write!(f, "{}", s)
    }
}

/// A traversal root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub path: PathBuf,
    pub source: EntrySource,
}

/// Selects entry points for the project at `root`.
///
/// `files` is the walker output; only files in it can be entry points. The
/// result is ordered (conventions in configured order, then the manifest
/// entry) and free of duplicates. It is empty only when `files` is empty.
pub fn select_entry_points(
    root: &Path,
    files: &[SourceFile],
    resolver: &ImportResolver,
    config: &AnalyzerConfig,
) -> AnalysisResult<Vec<EntryPoint>> {
    let known: HashSet<&Path> = files.iter().map(|f| f.path.as_path()).collect();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut entries = Vec::new();

    for pattern in &config.entry_patterns {
        let candidate = normalize_path(&root.join(pattern));
        if known.contains(candidate.as_path()) && seen.insert(candidate.clone()) {
            entries.push(EntryPoint {
                path: candidate,
                source: EntrySource::Convention,
            });
        }
    }

    if let Some(main) = manifest_entry(root, resolver, config) {
        if known.contains(main.as_path()) && seen.insert(main.clone()) {
            entries.push(EntryPoint {
                path: main,
                source: EntrySource::Manifest,
            });
        }
    }

    if entries.is_empty() {
        let Some(first) = files.first() else {
            return Ok(entries);
        };

        if config.entry_policy == EntryPolicy::Strict {
            return Err(AnalysisError::NoEntryPoint(root.to_path_buf()));
        }

        info!(
            path = %first.path.display(),
            "no conventional or manifest entry point; falling back to first file"
        );
        entries.push(EntryPoint {
            path: first.path.clone(),
            source: EntrySource::Fallback,
        });
    }

    debug!(count = entries.len(), "selected entry points");
    Ok(entries)
}

/// Resolves the manifest `main` field, if any.
fn manifest_entry(
    root: &Path,
    resolver: &ImportResolver,
    config: &AnalyzerConfig,
) -> Option<PathBuf> {
    let manifest = read_manifest(root, &config.manifest)?;
    let main = manifest.main_entry()?;

    // `main` is relative to the root even without a leading `./`.
    let specifier = if main.starts_with('.') || main.starts_with('/') {
        main.to_string()
    } else {
        format!("./{main}")
    };

    let resolved = resolver.resolve_from_dir(root, &specifier);
    if resolved.is_none() {
        debug!(main, "manifest main does not resolve to a file");
    }
    resolved
}
