//! File and environment configuration sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{AutocompatError, Result};
use crate::models::config::{OutputFormat, PartialSettings};

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
}

impl FileConfig {
    /// Create a file source for the default config file location
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(parser::DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
        }
    }

    /// Create a file source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
        }
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(AutocompatError::ConfigNotFound {
                path: self.path.clone(),
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.exists() && self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source, `AUTOCOMPAT_*` prefixed
pub struct EnvConfig {
    prefix: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        Self {
            prefix: "AUTOCOMPAT_".to_string(),
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}{}", self.prefix, key)).ok()
    }

    fn bool_var(&self, key: &str) -> Option<bool> {
        self.var(key)
            .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut partial = PartialSettings::default();

        if let Some(path) = self.var("PATH_OVERRIDE") {
            partial.scan_path = Some(PathBuf::from(path));
        }
        if let Some(limit) = self.var("LIMIT") {
            let parsed = limit.parse::<usize>().map_err(|_| {
                AutocompatError::config_error(format!("AUTOCOMPAT_LIMIT is not a number: {}", limit))
            })?;
            partial.limit = Some(parsed);
        }
        if let Some(format) = self.var("OUTPUT") {
            partial.output_format = Some(match format.to_lowercase().as_str() {
                "json" => OutputFormat::Json,
                "text" => OutputFormat::Text,
                other => {
                    return Err(AutocompatError::config_error(format!(
                        "AUTOCOMPAT_OUTPUT must be 'text' or 'json', got '{}'",
                        other
                    )))
                }
            });
        }

        partial.debug = self.bool_var("DEBUG");
        partial.quiet = self.bool_var("QUIET");
        partial.verbose = self.bool_var("VERBOSE");
        if let Some(no_colors) = self.bool_var("NO_COLORS") {
            partial.use_colors = Some(!no_colors);
        }

        Ok(partial)
    }

    fn is_available(&self) -> bool {
        std::env::vars().any(|(key, _)| key.starts_with(&self.prefix))
    }

    fn name(&self) -> &str {
        "environment variables"
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}
