//! Project manifest parsing.
//!
//! Reads the package.json at a project root. The analyzer only needs the
//! `main` field; the dependency tables are exposed for callers that report
//! on declared packages.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use deadscan::parser::{read_manifest, extract_dependencies};
//!
//! if let Some(pkg) = read_manifest(Path::new("."), "package.json") {
//!     println!("main: {:?}", pkg.main_entry());
//!     println!("{} declared dependencies", extract_dependencies(&pkg).len());
//! }
//! ```

pub mod package_json;
pub mod types;

pub use package_json::{
    extract_dependencies, parse_file, parse_str, read_manifest, ParseError, ParseResult,
};

pub use types::{Dependency, DependencyType, PackageJson};
