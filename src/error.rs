//! Error types shared by the analysis pipeline.
//!
//! Only whole-run failures surface as [`AnalysisError`]. Problems with a
//! single file (unreadable, unparseable, unresolvable imports) are logged
//! and turned into an empty contribution instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an analysis run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Project root is not accessible: {path}")]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Project root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Tree-sitter language initialization failed")]
    LanguageInit,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("No entry point found under {0}")]
    NoEntryPoint(PathBuf),
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
