//! Manifest discovery on the filesystem
//!
//! Walk-up searches for the closest project manifest and for installed
//! dependency manifests through nested `node_modules` directories. Existence
//! checks are cached; the crawl probes the same directories repeatedly.

use dashmap::DashMap;
use std::path::{Path, PathBuf};

/// Locates package.json files relative to a starting directory.
#[derive(Debug, Default)]
pub struct ManifestLocator {
    exists_cache: DashMap<PathBuf, bool>,
}

impl ManifestLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the closest package.json walking up from `start`.
    pub fn find_closest_manifest(&self, start: &Path) -> Option<PathBuf> {
        let mut dir = Some(start);
        while let Some(current) = dir {
            let candidate = current.join("package.json");
            if self.exists(&candidate) {
                return Some(candidate);
            }
            dir = current.parent();
        }
        None
    }

    /// Resolve an installed package's manifest by walking up through
    /// `node_modules` directories, the way the runtime resolves requires.
    /// The result is canonicalized so symlinked store layouts collapse to
    /// one physical directory.
    pub fn find_package_manifest(&self, name: &str, base: &Path) -> Option<PathBuf> {
        let mut dir = Some(base);
        while let Some(current) = dir {
            let candidate = current
                .join("node_modules")
                .join(name)
                .join("package.json");
            if self.exists(&candidate) {
                return std::fs::canonicalize(&candidate).ok().or(Some(candidate));
            }
            dir = current.parent();
        }
        None
    }

    fn exists(&self, path: &Path) -> bool {
        if let Some(cached) = self.exists_cache.get(path) {
            return *cached;
        }
        let exists = path.is_file();
        self.exists_cache.insert(path.to_path_buf(), exists);
        exists
    }
}
