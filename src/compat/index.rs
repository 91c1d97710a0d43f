//! Immutable lookup tables over the compatibility dataset
//!
//! The raw dataset stores support-record lists; resolving the first
//! unflagged record per feature happens once here, so every lookup during a
//! scan is a plain hash probe. The index is read-only after construction and
//! shared freely across worker threads.

use crate::compat::feature::SyntaxFeature;
use crate::compat::records::{unflagged_version, CompatData};
use crate::compat::version::NodeVersion;
use crate::error::{AutocompatError, Result};
use std::collections::HashMap;

/// Compatibility dataset bundled at compile time.
const EMBEDDED_DATA: &str = include_str!("node_compat.json");

/// Resolved lookup tables: feature key to earliest unconditional version.
#[derive(Debug, Clone)]
pub struct CompatIndex {
    syntax: HashMap<SyntaxFeature, NodeVersion>,
    globals: HashMap<String, NodeVersion>,
}

impl CompatIndex {
    /// Build the index from the bundled dataset.
    pub fn bundled() -> Result<Self> {
        Self::from_json(EMBEDDED_DATA)
    }

    /// Build the index from raw dataset JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        let data: CompatData = serde_json::from_str(raw)
            .map_err(|e| AutocompatError::json_parse_error("compatibility dataset", e))?;
        Ok(Self::from_data(&data))
    }

    /// Resolve the record lists into hash tables. Features whose support is
    /// only available behind flags are left out entirely.
    pub fn from_data(data: &CompatData) -> Self {
        let mut syntax = HashMap::new();
        for feature in SyntaxFeature::ALL {
            if let Some(version) = data
                .syntax
                .get(feature.key())
                .and_then(|entries| unflagged_version(entries))
            {
                syntax.insert(feature, version);
            }
        }

        let globals = data
            .globals
            .iter()
            .filter_map(|(name, entries)| {
                unflagged_version(entries).map(|version| (name.clone(), version))
            })
            .collect();

        Self { syntax, globals }
    }

    /// Earliest unconditional version supporting a syntax feature.
    pub fn syntax_version(&self, feature: SyntaxFeature) -> Option<NodeVersion> {
        self.syntax.get(&feature).copied()
    }

    /// Earliest unconditional version supporting a global or API surface.
    pub fn api_version(&self, name: &str) -> Option<NodeVersion> {
        self.globals.get(name).copied()
    }

    /// Number of resolved API entries, for debug output.
    pub fn api_count(&self) -> usize {
        self.globals.len()
    }

    /// Number of resolved syntax entries, for debug output.
    pub fn syntax_count(&self) -> usize {
        self.syntax.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_loads() {
        let index = CompatIndex::bundled().unwrap();
        assert!(index.syntax_count() > 0);
        assert!(index.api_count() > 0);
    }

    #[test]
    fn syntax_versions_resolve_past_flags() {
        let index = CompatIndex::bundled().unwrap();
        assert_eq!(
            index.syntax_version(SyntaxFeature::OptionalChaining),
            Some(NodeVersion::new(14, 0, 0))
        );
        assert_eq!(
            index.syntax_version(SyntaxFeature::Esm),
            Some(NodeVersion::new(12, 17, 0))
        );
        assert_eq!(
            index.syntax_version(SyntaxFeature::NodeProtocolEsm),
            Some(NodeVersion::new(14, 13, 1))
        );
        assert_eq!(
            index.syntax_version(SyntaxFeature::NodeProtocolCjs),
            Some(NodeVersion::new(16, 0, 0))
        );
    }

    #[test]
    fn api_lookup_resolves_dotted_and_bare_names() {
        let index = CompatIndex::bundled().unwrap();
        assert_eq!(
            index.api_version("fetch"),
            Some(NodeVersion::new(18, 0, 0))
        );
        assert_eq!(
            index.api_version("Object.hasOwn"),
            Some(NodeVersion::new(16, 9, 0))
        );
        assert_eq!(
            index.api_version("Array.prototype.toSorted"),
            Some(NodeVersion::new(20, 0, 0))
        );
    }

    #[test]
    fn flagged_only_features_are_absent() {
        let index = CompatIndex::bundled().unwrap();
        // localStorage is still behind --experimental-webstorage everywhere.
        assert_eq!(index.api_version("localStorage"), None);
    }

    #[test]
    fn unknown_names_miss() {
        let index = CompatIndex::bundled().unwrap();
        assert_eq!(index.api_version("definitelyNotAGlobal"), None);
    }
}
