//! Support-record structures for the embedded compatibility dataset

use crate::compat::version::NodeVersion;
use serde::Deserialize;
use std::collections::HashMap;

/// One support record for a feature: the version that introduced it and the
/// runtime flags it required, if any.
#[derive(Debug, Clone, Deserialize)]
pub struct SupportEntry {
    pub version_added: String,
    #[serde(default)]
    pub flags: Vec<String>,
}

/// The raw embedded dataset: per feature id, support records ordered the way
/// the upstream compatibility corpus lists them.
#[derive(Debug, Deserialize)]
pub struct CompatData {
    pub syntax: HashMap<String, Vec<SupportEntry>>,
    pub globals: HashMap<String, Vec<SupportEntry>>,
}

/// Resolve a record list to the earliest unconditional version.
///
/// Support that was first available behind a flag does not count; the first
/// record without a flag qualifier wins. A list with only flagged records
/// resolves to nothing, and the caller must drop the detection.
pub fn unflagged_version(entries: &[SupportEntry]) -> Option<NodeVersion> {
    entries
        .iter()
        .find(|entry| entry.flags.is_empty())
        .and_then(|entry| entry.version_added.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(version: &str, flags: &[&str]) -> SupportEntry {
        SupportEntry {
            version_added: version.to_string(),
            flags: flags.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn skips_flagged_records() {
        let entries = vec![
            entry("17.5.0", &["--experimental-fetch"]),
            entry("18.0.0", &[]),
        ];
        assert_eq!(
            unflagged_version(&entries),
            Some(NodeVersion::new(18, 0, 0))
        );
    }

    #[test]
    fn flagged_only_resolves_to_absent() {
        let entries = vec![entry("22.4.0", &["--experimental-webstorage"])];
        assert_eq!(unflagged_version(&entries), None);
    }

    #[test]
    fn first_unflagged_wins() {
        let entries = vec![entry("4.0.0", &[]), entry("6.0.0", &[])];
        assert_eq!(unflagged_version(&entries), Some(NodeVersion::new(4, 0, 0)));
    }

    #[test]
    fn empty_list_resolves_to_absent() {
        assert_eq!(unflagged_version(&[]), None);
    }
}
