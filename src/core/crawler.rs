//! Dependency graph enumeration
//!
//! Breadth-first crawl over installed dependencies: the root manifest's
//! dependencies (plus devDependencies) seed the queue, then each recorded
//! package's production dependencies are crawled in turn. A dependency whose
//! name already appears in its ancestor chain is skipped silently, which is
//! what terminates cyclic graphs. The optional record cap is an early-exit
//! sentinel, not a timeout.

use crate::error::Result;
use crate::models::config::Settings;
use crate::models::package::{ManifestSubset, PackageRecord};
use crate::parsers::package_json::ManifestParser;
use crate::utils::manifest_locator::ManifestLocator;
use std::path::Path;

/// Enumerates the installed dependency tree below a root manifest.
pub struct DependencyCrawler<'a> {
    settings: &'a Settings,
    locator: &'a ManifestLocator,
}

impl<'a> DependencyCrawler<'a> {
    pub fn new(settings: &'a Settings, locator: &'a ManifestLocator) -> Self {
        Self { settings, locator }
    }

    /// Crawl from a root manifest, returning discovered package records in
    /// breadth-first order, capped at the configured limit.
    pub fn crawl(
        &self,
        root_manifest_path: &Path,
        root_manifest: &ManifestSubset,
    ) -> Result<Vec<PackageRecord>> {
        let mut records = Vec::new();
        let limit = self.settings.limit.unwrap_or(usize::MAX);
        if limit == 0 {
            return Ok(records);
        }

        let root_dir = root_manifest_path
            .parent()
            .unwrap_or_else(|| Path::new("."));

        // The root's own name seeds the ancestor chain so a dependency
        // cycling back to the root is skipped like any other cycle.
        let root_name = root_manifest
            .name
            .clone()
            .unwrap_or_else(|| "(root)".to_string());

        self.crawl_package(root_dir, root_manifest, &[root_name], true, limit, &mut records);

        let mut next = 0;
        while next < records.len() && records.len() < limit {
            let directory = records[next].directory.clone();
            let graph_path = records[next].graph_path.clone();
            let manifest = records[next].manifest.clone();
            self.crawl_package(&directory, &manifest, &graph_path, false, limit, &mut records);
            next += 1;
        }

        records.truncate(limit);
        Ok(records)
    }

    /// Record one package's direct dependencies. Dev dependencies only
    /// count for the project root; installed packages don't ship theirs.
    fn crawl_package(
        &self,
        package_dir: &Path,
        manifest: &ManifestSubset,
        ancestor_names: &[String],
        is_root: bool,
        limit: usize,
        records: &mut Vec<PackageRecord>,
    ) {
        let mut names = manifest.dependency_names();
        if is_root && self.settings.include_dev {
            names.extend(manifest.dev_dependency_names());
        }

        for name in names {
            if ancestor_names.contains(&name) {
                continue;
            }

            let Some(dep_manifest_path) = self.locator.find_package_manifest(&name, package_dir)
            else {
                continue;
            };

            // An unreadable or invalid dependency manifest only skips that
            // dependency; siblings still get crawled.
            let Ok(dep_manifest) = ManifestParser::parse_file(&dep_manifest_path) else {
                continue;
            };

            let Some(dep_dir) = dep_manifest_path.parent() else {
                continue;
            };

            let mut graph_path = ancestor_names.to_vec();
            graph_path.push(dep_manifest.name.clone().unwrap_or_else(|| name.clone()));

            records.push(PackageRecord {
                name: name.clone(),
                directory: dep_dir.to_path_buf(),
                graph_path,
                version: dep_manifest.version.clone(),
                manifest: dep_manifest,
            });

            if records.len() >= limit {
                break;
            }
        }
    }
}
