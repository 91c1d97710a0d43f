//! Configuration file parsing and default-config creation

use crate::error::{AutocompatError, Result};
use crate::models::config::PartialSettings;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".autocompat.toml";

/// Parse a configuration file into partial settings.
pub fn parse_config_file(path: &Path) -> Result<PartialSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| AutocompatError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })?;

    parse_config_content(&content).map_err(|e| match e {
        AutocompatError::TomlParse { source, .. } => AutocompatError::ConfigParse {
            path: path.to_path_buf(),
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        },
        other => other,
    })
}

/// Parse configuration content into partial settings.
pub fn parse_config_content(content: &str) -> Result<PartialSettings> {
    let partial: PartialSettings = toml::from_str(content)?;
    Ok(partial)
}

/// Locate the default configuration file: the working directory first, then
/// the user-level configuration directory.
pub fn find_default_config() -> Option<PathBuf> {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("autocompat").join("config.toml");
    user.is_file().then_some(user)
}

/// Write a commented default configuration file.
pub fn create_default_config(path: &Path) -> Result<()> {
    let template = r#"# autocompat configuration
#
# Every key is optional; command-line flags override anything set here.

# Directory the package.json search starts from.
# scan_path = "."

# Cap on the number of dependency records to crawl.
# limit = 500

# Print per-package and per-file detection tables.
# debug = false

# What to do when a source file fails to parse:
# "skip-and-warn" (default) or "fail-fast".
# parse_failure_policy = "skip-and-warn"

# Include the root manifest's devDependencies in the crawl.
# include_dev = true

# Skip the confirmation prompt before updating package.json.
# assume_yes = false

# Glob patterns for directories to exclude from scanning.
# exclude_patterns = ["vendor", "dist"]

# Output format: "text" or "json".
# output_format = "text"

# Write results to a file instead of stdout.
# output_file = "report.json"

# use_colors = true
# quiet = false
# verbose = false
# show_progress = true
# parallel = true
"#;

    std::fs::write(path, template).map_err(|e| AutocompatError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace::capture(),
    })
}
