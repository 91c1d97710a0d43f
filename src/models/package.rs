//! Package manifest and crawl record models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The subset of package.json fields the crawl and scan need.
///
/// Write-back never goes through this type; the manifest writer patches the
/// raw JSON document so unknown fields survive untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestSubset {
    pub name: Option<String>,
    pub version: Option<String>,
    pub dependencies: Option<BTreeMap<String, String>>,
    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
    #[serde(rename = "type")]
    pub package_type: Option<String>,
    pub main: Option<String>,
    pub module: Option<String>,
    pub files: Option<Vec<String>>,
    pub engines: Option<EnginesField>,
}

/// The engines field; only the node constraint matters here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginesField {
    pub node: Option<String>,
}

impl ManifestSubset {
    /// Production dependency names, sorted by name.
    pub fn dependency_names(&self) -> Vec<String> {
        self.dependencies
            .as_ref()
            .map(|deps| deps.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Development dependency names, sorted by name.
    pub fn dev_dependency_names(&self) -> Vec<String> {
        self.dev_dependencies
            .as_ref()
            .map(|deps| deps.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The currently declared engines.node constraint, if any.
    pub fn declared_node_constraint(&self) -> Option<&str> {
        self.engines.as_ref().and_then(|e| e.node.as_deref())
    }
}

/// One package discovered during dependency enumeration.
#[derive(Debug, Clone, Serialize)]
pub struct PackageRecord {
    /// Name the package was requested under.
    pub name: String,
    /// Resolved (canonicalized) package directory.
    pub directory: PathBuf,
    /// Ancestor chain from the project root down to this package, the root
    /// package's own name first. Used for cycle avoidance.
    pub graph_path: Vec<String>,
    pub version: Option<String>,
    #[serde(skip)]
    pub manifest: ManifestSubset,
}
