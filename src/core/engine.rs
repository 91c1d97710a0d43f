//! Run orchestration
//!
//! Ties the collaborators together: locate the manifest, enumerate the
//! dependency tree, scan each package and the project's own sources,
//! aggregate, and compare against the declared constraint. Package-level
//! failures are isolated; only critical configuration problems abort.

use crate::compat::CompatIndex;
use crate::core::aggregator::{merge_tables, reduce_versions};
use crate::core::crawler::DependencyCrawler;
use crate::core::recommend::recommend;
use crate::core::scanner::PackageScanner;
use crate::error::{AutocompatError, Result};
use crate::models::analysis::{ProjectReport, ScanWarning};
use crate::models::config::Settings;
use crate::parsers::package_json::ManifestParser;
use crate::utils::manifest_locator::ManifestLocator;
use chrono::Utc;
use std::time::Instant;

/// Progress callback: (current, total, message).
pub type ProgressFn<'p> = &'p mut dyn FnMut(usize, usize, &str);

/// The whole-run engine.
pub struct Engine {
    settings: Settings,
    index: CompatIndex,
}

impl Engine {
    /// Create an engine with the bundled compatibility dataset.
    pub fn new(settings: Settings) -> Result<Self> {
        Ok(Self {
            index: CompatIndex::bundled()?,
            settings,
        })
    }

    /// Create an engine over a caller-supplied index.
    pub fn with_index(settings: Settings, index: CompatIndex) -> Self {
        Self { settings, index }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the full crawl-scan-recommend pipeline.
    pub fn run(&self, progress: ProgressFn<'_>) -> Result<ProjectReport> {
        let started = Instant::now();
        let locator = ManifestLocator::new();

        let manifest_path = locator
            .find_closest_manifest(&self.settings.scan_path)
            .ok_or_else(|| AutocompatError::manifest_not_found(&self.settings.scan_path))?;
        let root_manifest = ManifestParser::parse_file(&manifest_path)?;

        let crawler = DependencyCrawler::new(&self.settings, &locator);
        let records = crawler.crawl(&manifest_path, &root_manifest)?;

        let scanner = PackageScanner::new(&self.settings, &self.index)?;

        let mut packages = Vec::with_capacity(records.len());
        let mut warnings: Vec<ScanWarning> = Vec::new();
        for (position, record) in records.iter().enumerate() {
            progress(position + 1, records.len(), &record.name);
            match scanner.scan_package(record) {
                Ok(report) => packages.push(report),
                Err(err) if !err.is_critical() => {
                    // One unreadable package must not corrupt its siblings'
                    // results; its contribution is simply absent.
                    warnings.push(ScanWarning {
                        path: record.directory.clone(),
                        message: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        let project_dir = manifest_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.settings.scan_path.clone());
        let source_outcome = scanner.scan_source(&project_dir)?;
        warnings.extend(source_outcome.warnings.clone());

        let dependency_tokens = merge_tables(packages.iter().map(|p| p.tokens.clone()));
        let dependency_version = reduce_versions(packages.iter().map(|p| p.min_version));
        let source_version = source_outcome.tokens.max_version();

        let declared = root_manifest
            .declared_node_constraint()
            .map(|s| s.to_string());
        let recommendation = recommend(dependency_version, source_version, declared.as_deref());

        Ok(ProjectReport {
            manifest_path,
            source_tokens: source_outcome.tokens,
            source_version,
            source_files_scanned: source_outcome.files_scanned,
            packages,
            dependency_tokens,
            dependency_version,
            declared,
            recommendation,
            warnings,
            scan_duration: started.elapsed(),
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::Outcome;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join("package.json"), content).unwrap();
    }

    fn run_in(dir: &Path) -> ProjectReport {
        let settings = Settings {
            scan_path: dir.to_path_buf(),
            ..Settings::default()
        };
        let engine = Engine::new(settings).unwrap();
        engine.run(&mut |_, _, _| {}).unwrap()
    }

    #[test]
    fn missing_manifest_aborts_with_the_searched_path() {
        let dir = TempDir::new().unwrap();
        let probe = dir.path().join("empty");
        fs::create_dir_all(&probe).unwrap();

        let settings = Settings {
            scan_path: probe.clone(),
            ..Settings::default()
        };
        let engine = Engine::new(settings).unwrap();
        match engine.run(&mut |_, _, _| {}) {
            Err(AutocompatError::ManifestNotFound { path, .. }) => assert_eq!(path, probe),
            other => panic!("Expected ManifestNotFound, got {:?}", other),
        }
    }

    #[test]
    fn empty_project_yields_zero_baseline() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("app");
        write_manifest(&root, r#"{"name": "app"}"#);

        let report = run_in(&root);
        assert_eq!(report.source_version, crate::compat::NodeVersion::ZERO);
        assert_eq!(report.dependency_version, crate::compat::NodeVersion::ZERO);
        assert_eq!(report.recommendation.constraint(), ">=0.0.0");
    }

    #[test]
    fn source_and_dependency_components_stay_separate() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("app");
        write_manifest(
            &root,
            r#"{"name": "app", "dependencies": {"modern-dep": "1.0.0"}}"#,
        );
        fs::write(root.join("index.js"), "obj?.prop;\n").unwrap();

        let dep_dir = root.join("node_modules").join("modern-dep");
        write_manifest(&dep_dir, r#"{"name": "modern-dep", "version": "1.0.0"}"#);
        fs::write(dep_dir.join("index.js"), "[3, 1].toSorted();\n").unwrap();

        let report = run_in(&root);
        assert_eq!(report.source_version.to_string(), "14.0.0");
        assert_eq!(report.dependency_version.to_string(), "20.0.0");
        assert_eq!(report.recommendation.required.to_string(), "20.0.0");
        assert_eq!(report.recommendation.outcome, Outcome::NeedsUpdate);
    }

    #[test]
    fn already_optimal_constraint_is_recognized() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("app");
        write_manifest(
            &root,
            r#"{"name": "app", "engines": {"node": ">=14.0.0"}}"#,
        );
        fs::write(root.join("index.js"), "obj?.prop;\n").unwrap();

        let report = run_in(&root);
        assert_eq!(report.recommendation.outcome, Outcome::AlreadyOptimal);
    }
}
