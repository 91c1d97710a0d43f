//! Settings validation

use crate::error::{AutocompatError, Result};
use crate::models::config::Settings;

/// Settings validator for ensuring a configuration is usable
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.scan_path.exists() {
            return Err(AutocompatError::InvalidPath {
                path: settings.scan_path.clone(),
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            });
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern)?;
        }

        if settings.quiet && settings.verbose {
            return Err(AutocompatError::config_error(
                "--quiet and --verbose are mutually exclusive",
            ));
        }

        if let Some(output_file) = &settings.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(AutocompatError::OutputDirectoryNotFound {
                        path: parent.to_path_buf(),
                        #[cfg(not(tarpaulin_include))]
                        backtrace: std::backtrace::Backtrace::capture(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod validator_tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_settings_validate() {
        // The default scan path is the current directory, which exists.
        assert!(SettingsValidator::validate(&Settings::default()).is_ok());
    }

    #[test]
    fn nonexistent_scan_path_is_rejected() {
        let settings = Settings {
            scan_path: PathBuf::from("/definitely/not/here"),
            ..Settings::default()
        };
        assert!(matches!(
            SettingsValidator::validate(&settings),
            Err(AutocompatError::InvalidPath { .. })
        ));
    }

    #[test]
    fn bad_glob_pattern_is_rejected() {
        let settings = Settings {
            exclude_patterns: vec!["[".to_string()],
            ..Settings::default()
        };
        assert!(matches!(
            SettingsValidator::validate(&settings),
            Err(AutocompatError::GlobPattern { .. })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let settings = Settings {
            quiet: true,
            verbose: true,
            ..Settings::default()
        };
        assert!(SettingsValidator::validate(&settings).is_err());
    }
}
