//! Output writing and manifest write-back

use crate::error::{AutocompatError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Trait for output destinations
pub trait OutputWriter {
    /// Write formatted content to this destination
    fn write(&self, content: &str) -> Result<()>;
}

/// Writes to standard output
pub struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write(&self, content: &str) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(content.as_bytes())
            .map_err(|e| AutocompatError::StdoutWrite {
                source: e,
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            })
    }
}

/// Writes to a file
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> Result<()> {
        std::fs::write(&self.path, content).map_err(|e| AutocompatError::OutputWrite {
            path: self.path.clone(),
            source: e,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        })
    }
}

/// Create a writer for the configured destination
pub fn create_writer(output_file: Option<&PathBuf>) -> Box<dyn OutputWriter> {
    match output_file {
        Some(path) => Box::new(FileWriter::new(path)),
        None => Box::new(StdoutWriter),
    }
}

/// Applies a recommended constraint to a package.json document.
///
/// The raw JSON document is patched rather than round-tripped through the
/// manifest model, so fields the model does not know about survive the
/// rewrite untouched.
pub struct ManifestWriter;

impl ManifestWriter {
    /// Set engines.node to the given constraint and rewrite the manifest
    /// pretty-printed with a trailing newline.
    pub fn apply_constraint(manifest_path: &Path, constraint: &str) -> Result<()> {
        let content = std::fs::read_to_string(manifest_path).map_err(|e| {
            AutocompatError::ManifestRead {
                path: manifest_path.to_path_buf(),
                source: e,
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            }
        })?;

        let mut document: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| AutocompatError::json_parse_error(manifest_path, e))?;

        let Some(root) = document.as_object_mut() else {
            return Err(AutocompatError::InvalidManifest {
                path: manifest_path.to_path_buf(),
                message: "Root value is not an object".to_string(),
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            });
        };

        let engines = root
            .entry("engines")
            .or_insert_with(|| serde_json::json!({}));
        match engines.as_object_mut() {
            Some(engines) => {
                engines.insert(
                    "node".to_string(),
                    serde_json::Value::String(constraint.to_string()),
                );
            }
            None => {
                *engines = serde_json::json!({ "node": constraint });
            }
        }

        let mut serialized = serde_json::to_string_pretty(&document)?;
        serialized.push('\n');

        std::fs::write(manifest_path, serialized).map_err(|e| AutocompatError::ManifestWrite {
            path: manifest_path.to_path_buf(),
            source: e,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_writer_writes_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let writer = FileWriter::new(&path);
        writer.write("hello\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn constraint_is_added_preserving_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(
            &path,
            r#"{"name": "demo", "customField": {"keep": true}, "engines": {"npm": ">=9"}}"#,
        )
        .unwrap();

        ManifestWriter::apply_constraint(&path, ">=18.0.0").unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["engines"]["node"], ">=18.0.0");
        assert_eq!(written["engines"]["npm"], ">=9");
        assert_eq!(written["customField"]["keep"], true);
        assert_eq!(written["name"], "demo");
    }

    #[test]
    fn constraint_creates_engines_when_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name": "demo"}"#).unwrap();

        ManifestWriter::apply_constraint(&path, ">=20.0.0").unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["engines"]["node"], ">=20.0.0");
    }

    #[test]
    fn non_object_manifest_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(matches!(
            ManifestWriter::apply_constraint(&path, ">=18.0.0"),
            Err(AutocompatError::InvalidManifest { .. })
        ));
    }
}
