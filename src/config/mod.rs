//! Configuration management
//!
//! Settings are layered: defaults, then a config file, then environment
//! variables, then CLI flags. Each source produces a `PartialSettings`; the
//! builder merges them in priority order and validates the result.

pub mod cli;
pub mod file;
pub mod parser;
pub mod settings;


use crate::error::Result;
use crate::models::config::{PartialSettings, Settings};
use std::path::Path;

pub use cli::CliConfig;
pub use file::{EnvConfig, FileConfig};
pub use parser::{create_default_config, find_default_config, parse_config_content, parse_config_file};
pub use settings::SettingsValidator;

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<PartialSettings>;

    /// Check if this configuration source is available
    fn is_available(&self) -> bool;

    /// Get the name of this configuration source for logging
    fn name(&self) -> &str;
}

/// Configuration builder for merging multiple sources
pub struct ConfigBuilder {
    partial: PartialSettings,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            partial: PartialSettings::default(),
        }
    }

    /// Merge settings from a partial configuration
    pub fn merge(mut self, partial: PartialSettings) -> Self {
        self.partial.merge_from(partial);
        self
    }

    /// Load and merge settings from a configuration source, skipping
    /// sources that are not available.
    pub fn load_from<S: ConfigSource>(self, source: &S) -> Result<Self> {
        if source.is_available() {
            let partial = source.load()?;
            Ok(self.merge(partial))
        } else {
            Ok(self)
        }
    }

    /// Load and merge a specific config file; missing files are an error.
    pub fn add_config_file(self, path: &Path) -> Result<Self> {
        let source = FileConfig::with_path(path);
        let partial = source.load()?;
        Ok(self.merge(partial))
    }

    /// Try to find and merge the default config file, if one exists.
    pub fn try_add_default_config_file(self) -> Self {
        match parser::find_default_config() {
            Some(path) => match parser::parse_config_file(&path) {
                Ok(partial) => self.merge(partial),
                Err(_) => self,
            },
            None => self,
        }
    }

    /// Build final settings with validation
    pub fn build(self) -> Result<Settings> {
        let settings = self.partial.to_settings();
        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
