//! Project manifest types.
//!
//! Only the fields the analyzer and its collaborators read are modelled:
//! `main` for entry-point selection, and the dependency maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The subset of a package.json file read by the analyzer.
///
/// Unknown fields are ignored.
///
/// # Example
///
/// ```
/// use deadscan::parser::types::PackageJson;
///
/// let json = r#"{"name": "my-app", "main": "lib/index.js"}"#;
/// let pkg: PackageJson = serde_json::from_str(json).unwrap();
/// assert_eq!(pkg.main.as_deref(), Some("lib/index.js"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackageJson {
    /// The name of the package.
    pub name: Option<String>,

    /// The version of the package (semver format).
    pub version: Option<String>,

    /// The module loaded when the package is required.
    pub main: Option<String>,

    /// Production dependencies required at runtime.
    pub dependencies: Option<BTreeMap<String, String>>,

    /// Development-only dependencies (testing, building, etc.).
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
}

impl PackageJson {
    /// Returns the `main` field if it is present and not blank.
    pub fn main_entry(&self) -> Option<&str> {
        self.main
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Returns true if the package has any dependencies defined.
    pub fn has_dependencies(&self) -> bool {
        self.dependency_count() > 0
    }

    /// Returns the total count of all dependencies.
    pub fn dependency_count(&self) -> usize {
        self.dependencies.as_ref().map_or(0, |d| d.len())
            + self.dev_dependencies.as_ref().map_or(0, |d| d.len())
    }
}

/// Which manifest table a dependency was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    /// `dependencies`
    Production,
    /// `devDependencies`
    Development,
}

impl DependencyType {
    /// Returns a short label for the dependency type.
    pub fn label(&self) -> &'static str {
        match self {
            DependencyType::Production => "prod",
            DependencyType::Development => "dev",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyType::Production => "production",
            DependencyType::Development => "development",
        };
        write!(f, "{}", s)
    }
}

/// A single declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// The package name (e.g., "react", "lodash").
    pub name: String,

    /// The version specifier (e.g., "^18.0.0", "~1.2.3").
    pub version: String,

    /// The category of this dependency.
    pub dep_type: DependencyType,
}

impl Dependency {
    /// Creates a new Dependency instance.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        dep_type: DependencyType,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dep_type,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.version, self.dep_type)
    }
}
