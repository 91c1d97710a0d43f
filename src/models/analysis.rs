//! Analysis result models

use crate::compat::NodeVersion;
use crate::core::tokens::TokenTable;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// A non-fatal problem encountered while scanning, kept with enough context
/// to report without aborting sibling work.
#[derive(Debug, Clone, Serialize)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of comparing the recommendation with the declared constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// The manifest already declares exactly `>=required`.
    AlreadyOptimal,
    /// The declared constraint differs or is absent.
    NeedsUpdate,
}

/// The recommended minimum version and its classification.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub required: NodeVersion,
    pub outcome: Outcome,
}

impl Recommendation {
    /// The constraint string as it would appear in engines.node.
    pub fn constraint(&self) -> String {
        format!(">={}", self.required)
    }
}

/// One scanned package: its merged token table and reduced version.
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    pub name: String,
    pub directory: PathBuf,
    pub version: Option<String>,
    pub tokens: TokenTable,
    pub min_version: NodeVersion,
    pub files_scanned: usize,
    pub warnings: Vec<ScanWarning>,
}

/// Project-wide result: the own-source and dependency aggregates are tracked
/// separately because the displayed components differ, then combined into
/// one recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub manifest_path: PathBuf,
    pub source_tokens: TokenTable,
    pub source_version: NodeVersion,
    pub source_files_scanned: usize,
    pub packages: Vec<PackageReport>,
    pub dependency_tokens: TokenTable,
    pub dependency_version: NodeVersion,
    pub declared: Option<String>,
    pub recommendation: Recommendation,
    pub warnings: Vec<ScanWarning>,
    #[serde(serialize_with = "serialize_duration_ms", rename = "scan_duration_ms")]
    pub scan_duration: Duration,
    pub completed_at: DateTime<Utc>,
}

impl ProjectReport {
    /// Total parse warnings across the project and all packages.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
            + self
                .packages
                .iter()
                .map(|package| package.warnings.len())
                .sum::<usize>()
    }
}

fn serialize_duration_ms<S>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u128(duration.as_millis())
}
