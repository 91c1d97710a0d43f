#![feature(error_generic_member_access)]
//! autocompat - minimum Node.js version recommendation
//!
//! Statically scans a project's source files and its installed dependency
//! tree with the OXC parser, classifies the syntax constructs and runtime
//! API surfaces in use against a bundled compatibility dataset, and reduces
//! the findings to a single recommended engines.node constraint.

pub mod cli;
pub mod compat;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use compat::{CompatIndex, FeatureId, NodeVersion, SyntaxFeature};
pub use crate::core::{Engine, TokenTable};
pub use error::{
    handle_error, try_with_recovery, AutocompatError, ErrorSeverity, OptionExt, Result, ResultExt,
};
pub use models::{
    analysis::{Outcome, PackageReport, ProjectReport, Recommendation},
    config::Settings,
    package::PackageRecord,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
