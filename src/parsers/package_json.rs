//! package.json parsing
//!
//! Only the manifest subset the crawl and scan need is deserialized; the
//! writer side patches the raw JSON document instead so unknown fields are
//! never lost on write-back.

use crate::error::{AutocompatError, Result};
use crate::models::package::ManifestSubset;
use std::path::Path;

/// Parser for package.json files
pub struct ManifestParser;

impl ManifestParser {
    /// Parse manifest content into the subset model.
    pub fn parse(content: &str) -> Result<ManifestSubset> {
        serde_json::from_str(content)
            .map_err(|e| AutocompatError::json_parse_error("package.json", e))
    }

    /// Parse a manifest file from a path.
    pub fn parse_file(path: &Path) -> Result<ManifestSubset> {
        let content = std::fs::read_to_string(path).map_err(|e| AutocompatError::ManifestRead {
            path: path.to_path_buf(),
            source: e,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            AutocompatError::JsonParse { source, .. } => {
                AutocompatError::json_parse_error(path, source)
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_minimal_manifest() {
        let manifest = ManifestParser::parse(r#"{"name": "demo", "version": "0.1.0"}"#).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("demo"));
        assert!(manifest.dependencies.is_none());
    }

    #[test]
    fn parses_file_with_dependencies() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(
            &path,
            r#"{
                "name": "demo",
                "dependencies": { "a": "1.0.0", "b": "2.0.0" },
                "engines": { "node": ">=16.0.0" }
            }"#,
        )
        .unwrap();

        let manifest = ManifestParser::parse_file(&path).unwrap();
        assert_eq!(manifest.dependency_names(), vec!["a", "b"]);
        assert_eq!(manifest.declared_node_constraint(), Some(">=16.0.0"));
    }

    #[test]
    fn invalid_json_reports_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "{ not json").unwrap();

        match ManifestParser::parse_file(&path) {
            Err(AutocompatError::JsonParse { file, .. }) => assert_eq!(file, path),
            other => panic!("Expected JsonParse error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_reports_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        assert!(matches!(
            ManifestParser::parse_file(&path),
            Err(AutocompatError::ManifestRead { .. })
        ));
    }
}
