//! Per-package source scanning
//!
//! Enumerates a package's candidate source files, classifies each one, and
//! merges the results into a package-level token table. Classification is a
//! pure function per file, so the fan-out across files is embarrassingly
//! parallel; results merge order-independently.

use crate::compat::CompatIndex;
use crate::core::aggregator::merge_tables;
use crate::core::tokens::TokenTable;
use crate::error::Result;
use crate::models::analysis::{PackageReport, ScanWarning};
use crate::models::config::{ParseFailurePolicy, Settings};
use crate::models::package::PackageRecord;
use crate::parsers::ast_parser::SourceParser;
use dashmap::DashMap;
use glob::Pattern;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions of files eligible for classification.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx"];

/// The merged result of scanning one directory tree.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub tokens: TokenTable,
    pub files_scanned: usize,
    pub warnings: Vec<ScanWarning>,
}

/// Scans package directories into token tables, caching per physical
/// directory so a package reachable through several dependents is scanned
/// once.
pub struct PackageScanner<'a> {
    settings: &'a Settings,
    index: &'a CompatIndex,
    parser: SourceParser,
    exclude_patterns: Vec<Pattern>,
    cache: DashMap<PathBuf, ScanOutcome>,
}

impl<'a> PackageScanner<'a> {
    pub fn new(settings: &'a Settings, index: &'a CompatIndex) -> Result<Self> {
        let mut exclude_patterns = Vec::new();
        for pattern in &settings.exclude_patterns {
            exclude_patterns.push(Pattern::new(pattern)?);
        }

        Ok(Self {
            settings,
            index,
            parser: SourceParser::new(),
            exclude_patterns,
            cache: DashMap::new(),
        })
    }

    /// Scan one crawled package.
    pub fn scan_package(&self, record: &PackageRecord) -> Result<PackageReport> {
        let directory = std::fs::canonicalize(&record.directory)
            .unwrap_or_else(|_| record.directory.clone());

        let outcome = if let Some(cached) = self.cache.get(&directory) {
            cached.clone()
        } else {
            let outcome = self.scan_directory(&directory)?;
            self.cache.insert(directory.clone(), outcome.clone());
            outcome
        };

        Ok(PackageReport {
            name: record.name.clone(),
            directory,
            version: record.version.clone(),
            min_version: outcome.tokens.max_version(),
            tokens: outcome.tokens,
            files_scanned: outcome.files_scanned,
            warnings: outcome.warnings,
        })
    }

    /// Scan the project's own declared source files.
    pub fn scan_source(&self, project_dir: &Path) -> Result<ScanOutcome> {
        self.scan_directory(project_dir)
    }

    fn scan_directory(&self, directory: &Path) -> Result<ScanOutcome> {
        let files = self.collect_files(directory);
        self.scan_files(&files)
    }

    /// Candidate files under a directory: recognized extensions, skipping
    /// nested node_modules, dot-directories and configured exclusions.
    /// Sorted so downstream output is deterministic.
    fn collect_files(&self, directory: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(directory)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                if entry.file_type().is_dir() && (name == "node_modules" || name.starts_with('.')) {
                    return false;
                }
                !self
                    .exclude_patterns
                    .iter()
                    .any(|pattern| pattern.matches(&name))
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
                    .unwrap_or(false)
            })
            .collect();

        files.sort();
        files
    }

    /// Classify every file and merge. A file that fails to parse follows
    /// the configured policy: it either contributes an empty table plus a
    /// warning, or aborts the whole scan.
    fn scan_files(&self, files: &[PathBuf]) -> Result<ScanOutcome> {
        let results: Vec<(PathBuf, Result<TokenTable>)> = if self.settings.parallel {
            files
                .par_iter()
                .map(|path| (path.clone(), self.parser.parse_and_classify(path, self.index)))
                .collect()
        } else {
            files
                .iter()
                .map(|path| (path.clone(), self.parser.parse_and_classify(path, self.index)))
                .collect()
        };

        let mut tables = Vec::new();
        let mut warnings = Vec::new();
        for (path, result) in results {
            match result {
                Ok(tokens) => tables.push(tokens),
                Err(err) => match self.settings.parse_failure_policy {
                    ParseFailurePolicy::FailFast => return Err(err),
                    ParseFailurePolicy::SkipAndWarn => warnings.push(ScanWarning {
                        path,
                        message: err.to_string(),
                    }),
                },
            }
        }

        Ok(ScanOutcome {
            tokens: merge_tables(tables),
            files_scanned: files.len(),
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::{FeatureId, NodeVersion, SyntaxFeature};
    use crate::models::package::ManifestSubset;
    use std::fs;
    use tempfile::TempDir;

    fn record_for(dir: &Path) -> PackageRecord {
        PackageRecord {
            name: "fixture".to_string(),
            directory: dir.to_path_buf(),
            graph_path: vec!["root".to_string(), "fixture".to_string()],
            version: Some("1.0.0".to_string()),
            manifest: ManifestSubset::default(),
        }
    }

    #[test]
    fn merges_detections_across_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "obj?.prop;\n").unwrap();
        fs::write(dir.path().join("b.mjs"), "const x = structuredClone(y);\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not source\n").unwrap();

        let settings = Settings::default();
        let index = CompatIndex::bundled().unwrap();
        let scanner = PackageScanner::new(&settings, &index).unwrap();
        let report = scanner.scan_package(&record_for(dir.path())).unwrap();

        assert_eq!(report.files_scanned, 2);
        assert!(report
            .tokens
            .contains(&FeatureId::Syntax(SyntaxFeature::OptionalChaining)));
        assert!(report.tokens.contains(&FeatureId::api("structuredClone")));
        assert_eq!(report.min_version, "17.0.0".parse::<NodeVersion>().unwrap());
    }

    #[test]
    fn empty_package_reduces_to_zero_baseline() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::default();
        let index = CompatIndex::bundled().unwrap();
        let scanner = PackageScanner::new(&settings, &index).unwrap();
        let report = scanner.scan_package(&record_for(dir.path())).unwrap();

        assert_eq!(report.files_scanned, 0);
        assert_eq!(report.min_version, NodeVersion::ZERO);
    }

    #[test]
    fn nested_node_modules_are_not_scanned() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("node_modules").join("dep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("index.js"), "obj?.prop;\n").unwrap();
        fs::write(dir.path().join("index.js"), "const x = 1;\n").unwrap();

        let settings = Settings::default();
        let index = CompatIndex::bundled().unwrap();
        let scanner = PackageScanner::new(&settings, &index).unwrap();
        let outcome = scanner.scan_source(dir.path()).unwrap();

        assert_eq!(outcome.files_scanned, 1);
        assert!(!outcome
            .tokens
            .contains(&FeatureId::Syntax(SyntaxFeature::OptionalChaining)));
    }

    #[test]
    fn skip_and_warn_isolates_parse_failures() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.js"), "const = = 1;\n").unwrap();
        fs::write(dir.path().join("fine.js"), "obj?.prop;\n").unwrap();

        let settings = Settings::default();
        let index = CompatIndex::bundled().unwrap();
        let scanner = PackageScanner::new(&settings, &index).unwrap();
        let outcome = scanner.scan_source(dir.path()).unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].path.ends_with("broken.js"));
        assert!(outcome
            .tokens
            .contains(&FeatureId::Syntax(SyntaxFeature::OptionalChaining)));
    }

    #[test]
    fn fail_fast_aborts_on_parse_failure() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.js"), "const = = 1;\n").unwrap();

        let settings = Settings {
            parse_failure_policy: ParseFailurePolicy::FailFast,
            ..Settings::default()
        };
        let index = CompatIndex::bundled().unwrap();
        let scanner = PackageScanner::new(&settings, &index).unwrap();
        assert!(scanner.scan_source(dir.path()).is_err());
    }

    #[test]
    fn exclude_patterns_prune_directories() {
        let dir = TempDir::new().unwrap();
        let vendored = dir.path().join("vendor");
        fs::create_dir_all(&vendored).unwrap();
        fs::write(vendored.join("big.js"), "obj?.prop;\n").unwrap();
        fs::write(dir.path().join("index.js"), "const x = 1;\n").unwrap();

        let settings = Settings {
            exclude_patterns: vec!["vendor".to_string()],
            ..Settings::default()
        };
        let index = CompatIndex::bundled().unwrap();
        let scanner = PackageScanner::new(&settings, &index).unwrap();
        let outcome = scanner.scan_source(dir.path()).unwrap();
        assert_eq!(outcome.files_scanned, 1);
    }

    #[test]
    fn repeated_scans_hit_the_cache() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.js"), "obj?.prop;\n").unwrap();

        let settings = Settings::default();
        let index = CompatIndex::bundled().unwrap();
        let scanner = PackageScanner::new(&settings, &index).unwrap();

        let first = scanner.scan_package(&record_for(dir.path())).unwrap();
        // Changing the directory contents between scans must not change the
        // cached result for the same physical directory.
        fs::write(dir.path().join("late.js"), "const x = fetch(u);\n").unwrap();
        let second = scanner.scan_package(&record_for(dir.path())).unwrap();

        assert_eq!(first.tokens, second.tokens);
        assert_eq!(second.files_scanned, 1);
    }
}
