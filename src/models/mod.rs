//! Data models for configuration, packages and analysis results

pub mod analysis;
pub mod config;
pub mod package;

pub use analysis::{Outcome, PackageReport, ProjectReport, Recommendation, ScanWarning};
pub use config::{OutputFormat, ParseFailurePolicy, PartialSettings, Settings};
pub use package::{EnginesField, ManifestSubset, PackageRecord};
