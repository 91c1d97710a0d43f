//! Per-scan token tables mapping detected features to minimum versions

use crate::compat::{FeatureId, NodeVersion};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Mapping from detected feature to the minimum Node.js version supporting
/// it. Every key was resolved through the knowledge base; lookup misses are
/// dropped before insertion, never stored.
///
/// Inserts are last-write-wins. That is safe because one knowledge base
/// resolves one version per feature id, so duplicate detections always carry
/// the same version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    entries: BTreeMap<FeatureId, NodeVersion>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a detection.
    pub fn insert(&mut self, feature: FeatureId, version: NodeVersion) {
        self.entries.insert(feature, version);
    }

    /// Fold another table into this one. Duplicate keys coalesce; since
    /// equal keys carry equal versions, merge order is irrelevant.
    pub fn absorb(&mut self, other: TokenTable) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, feature: &FeatureId) -> Option<NodeVersion> {
        self.entries.get(feature).copied()
    }

    pub fn contains(&self, feature: &FeatureId) -> bool {
        self.entries.contains_key(feature)
    }

    /// The maximum version among all entries, or the zero baseline for an
    /// empty table.
    pub fn max_version(&self) -> NodeVersion {
        self.entries
            .values()
            .copied()
            .max()
            .unwrap_or(NodeVersion::ZERO)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in deterministic (key) order.
    pub fn iter(&self) -> btree_map::Iter<'_, FeatureId, NodeVersion> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a TokenTable {
    type Item = (&'a FeatureId, &'a NodeVersion);
    type IntoIter = btree_map::Iter<'a, FeatureId, NodeVersion>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for TokenTable {
    /// Serialized as a flat `display-name -> version` map.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (feature, version) in &self.entries {
            map.serialize_entry(&feature.to_string(), version)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::SyntaxFeature;

    fn v(text: &str) -> NodeVersion {
        text.parse().unwrap()
    }

    #[test]
    fn empty_table_reduces_to_zero_baseline() {
        assert_eq!(TokenTable::new().max_version(), NodeVersion::ZERO);
    }

    #[test]
    fn max_version_picks_the_largest_entry() {
        let mut table = TokenTable::new();
        table.insert(FeatureId::Syntax(SyntaxFeature::OptionalChaining), v("14.0.0"));
        table.insert(FeatureId::api("fetch"), v("18.0.0"));
        table.insert(FeatureId::api("URL"), v("10.0.0"));
        assert_eq!(table.max_version(), v("18.0.0"));
    }

    #[test]
    fn duplicate_insert_is_last_write_wins() {
        let mut table = TokenTable::new();
        table.insert(FeatureId::api("fetch"), v("18.0.0"));
        table.insert(FeatureId::api("fetch"), v("18.0.0"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn absorb_coalesces_duplicate_keys() {
        let mut left = TokenTable::new();
        left.insert(FeatureId::api("fetch"), v("18.0.0"));

        let mut right = TokenTable::new();
        right.insert(FeatureId::api("fetch"), v("18.0.0"));
        right.insert(FeatureId::api("structuredClone"), v("17.0.0"));

        left.absorb(right);
        assert_eq!(left.len(), 2);
        assert_eq!(left.max_version(), v("18.0.0"));
    }

    #[test]
    fn serializes_display_names() {
        let mut table = TokenTable::new();
        table.insert(FeatureId::Syntax(SyntaxFeature::Esm), v("12.17.0"));
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"ESM":"12.17.0"}"#);
    }
}
