//! Configuration models: final settings and mergeable partial settings

use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// Machine-readable JSON output
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// What to do when a source file cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseFailurePolicy {
    /// The file contributes an empty token table and a warning is recorded
    SkipAndWarn,
    /// Abort the run on the first parse failure
    FailFast,
}

/// Final, validated settings for a run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the manifest search starts from
    pub scan_path: PathBuf,
    /// Cap on the number of dependency records to enumerate
    pub limit: Option<usize>,
    /// Print per-package and per-file detection tables
    pub debug: bool,
    pub parse_failure_policy: ParseFailurePolicy,
    /// Include the root manifest's devDependencies in the crawl
    pub include_dev: bool,
    /// Skip the confirmation prompt before updating the manifest
    pub assume_yes: bool,
    /// Glob patterns for paths to exclude from file enumeration
    pub exclude_patterns: Vec<String>,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub use_colors: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub show_progress: bool,
    /// Fan file classification out across the rayon pool
    pub parallel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_path: PathBuf::from("."),
            limit: None,
            debug: false,
            parse_failure_policy: ParseFailurePolicy::SkipAndWarn,
            include_dev: true,
            assume_yes: false,
            exclude_patterns: Vec::new(),
            output_format: OutputFormat::Text,
            output_file: None,
            use_colors: true,
            quiet: false,
            verbose: false,
            show_progress: true,
            parallel: true,
        }
    }
}

/// Partial settings from one configuration source; `None` means the source
/// did not mention the field. Later sources override earlier ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialSettings {
    pub scan_path: Option<PathBuf>,
    pub limit: Option<usize>,
    pub debug: Option<bool>,
    pub parse_failure_policy: Option<ParseFailurePolicy>,
    pub include_dev: Option<bool>,
    pub assume_yes: Option<bool>,
    pub exclude_patterns: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub use_colors: Option<bool>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub show_progress: Option<bool>,
    pub parallel: Option<bool>,
}

impl PartialSettings {
    /// Overlay another partial on top of this one; fields the other source
    /// set win.
    pub fn merge_from(&mut self, other: PartialSettings) {
        macro_rules! take {
            ($field:ident) => {
                if other.$field.is_some() {
                    self.$field = other.$field;
                }
            };
        }

        take!(scan_path);
        take!(limit);
        take!(debug);
        take!(parse_failure_policy);
        take!(include_dev);
        take!(assume_yes);
        take!(exclude_patterns);
        take!(output_format);
        take!(output_file);
        take!(use_colors);
        take!(quiet);
        take!(verbose);
        take!(show_progress);
        take!(parallel);
    }

    /// Resolve into full settings, filling unset fields with defaults.
    pub fn to_settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            scan_path: self.scan_path.clone().unwrap_or(defaults.scan_path),
            limit: self.limit.or(defaults.limit),
            debug: self.debug.unwrap_or(defaults.debug),
            parse_failure_policy: self
                .parse_failure_policy
                .unwrap_or(defaults.parse_failure_policy),
            include_dev: self.include_dev.unwrap_or(defaults.include_dev),
            assume_yes: self.assume_yes.unwrap_or(defaults.assume_yes),
            exclude_patterns: self
                .exclude_patterns
                .clone()
                .unwrap_or(defaults.exclude_patterns),
            output_format: self.output_format.unwrap_or(defaults.output_format),
            output_file: self.output_file.clone().or(defaults.output_file),
            use_colors: self.use_colors.unwrap_or(defaults.use_colors),
            quiet: self.quiet.unwrap_or(defaults.quiet),
            verbose: self.verbose.unwrap_or(defaults.verbose),
            show_progress: self.show_progress.unwrap_or(defaults.show_progress),
            parallel: self.parallel.unwrap_or(defaults.parallel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_later_sources() {
        let mut base = PartialSettings {
            limit: Some(10),
            debug: Some(false),
            ..Default::default()
        };
        let overlay = PartialSettings {
            debug: Some(true),
            quiet: Some(true),
            ..Default::default()
        };

        base.merge_from(overlay);
        assert_eq!(base.limit, Some(10));
        assert_eq!(base.debug, Some(true));
        assert_eq!(base.quiet, Some(true));
    }

    #[test]
    fn to_settings_fills_defaults() {
        let partial = PartialSettings {
            limit: Some(5),
            ..Default::default()
        };
        let settings = partial.to_settings();
        assert_eq!(settings.limit, Some(5));
        assert!(settings.include_dev);
        assert_eq!(settings.parse_failure_policy, ParseFailurePolicy::SkipAndWarn);
        assert_eq!(settings.output_format, OutputFormat::Text);
    }
}
