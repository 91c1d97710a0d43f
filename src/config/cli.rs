//! CLI argument configuration source

use crate::cli::args::Args;
use crate::error::Result;
use crate::models::config::{ParseFailurePolicy, PartialSettings};
use std::path::{Path, PathBuf};

use super::ConfigSource;

/// Configuration source backed by parsed command-line arguments.
/// CLI flags have the highest priority of all sources.
pub struct CliConfig {
    partial: PartialSettings,
    config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Convert parsed arguments into a configuration source
    pub fn from_args(args: &Args) -> Self {
        let mut partial = PartialSettings::default();

        partial.scan_path = args.path.clone();
        partial.limit = args.limit;
        if args.debug {
            partial.debug = Some(true);
        }
        if args.fail_fast {
            partial.parse_failure_policy = Some(ParseFailurePolicy::FailFast);
        }
        if args.no_dev_deps {
            partial.include_dev = Some(false);
        }
        if args.yes {
            partial.assume_yes = Some(true);
        }
        if !args.exclude.is_empty() {
            partial.exclude_patterns = Some(args.exclude.clone());
        }
        partial.output_format = Some(args.output);
        partial.output_file = args.output_file.clone();
        if args.no_colors {
            partial.use_colors = Some(false);
        }
        if args.quiet {
            partial.quiet = Some(true);
        }
        if args.verbose {
            partial.verbose = Some(true);
        }
        if args.no_progress {
            partial.show_progress = Some(false);
        }
        if args.no_parallel {
            partial.parallel = Some(false);
        }

        Self {
            partial,
            config_path: args.config.clone(),
        }
    }

    /// The config file explicitly requested on the command line, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        Ok(self.partial.clone())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "command line arguments"
    }
}
