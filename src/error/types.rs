//! Error types and definitions for autocompat
//!
//! Error severity drives the process exit code: warnings never fail a run,
//! errors exit with 1, critical configuration problems exit with 2. Per-file
//! parse failures stay at warning severity so a partial scan can still
//! produce a recommendation.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for autocompat operations
#[derive(Debug, Error)]
pub enum AutocompatError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Errors reading a specific file
    #[error("Error reading {path}: {source}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// A source file the external parser could not produce a tree for
    #[error("Parse failure in {path}: {}", .messages.join("; "))]
    Parse {
        path: PathBuf,
        messages: Vec<String>,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {file}: {source}")]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// No package.json could be located walking up from the start path
    #[error("No package.json found from {path}")]
    ManifestNotFound {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// A manifest exists but could not be read
    #[error("Error reading manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// A manifest exists but is not valid package.json
    #[error("Invalid manifest {path}: {message}")]
    InvalidManifest {
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Writing the recommended constraint back to the manifest failed
    #[error("Error updating manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// A version string that does not parse as a Node.js version
    #[error("Invalid version string: {value}")]
    Version {
        value: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// TOML parsing errors without file context
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Scan errors with free-form context
    #[error("Scan error: {message}")]
    Scan {
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    Traversal {
        path: PathBuf,
        message: String,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound {
        path: PathBuf,
        #[cfg(not(tarpaulin_include))]
        backtrace: std::backtrace::Backtrace,
    },
}

impl AutocompatError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            AutocompatError::Parse { .. } => ErrorSeverity::Warning,
            AutocompatError::PermissionDenied { .. } => ErrorSeverity::Warning,
            AutocompatError::JsonParse { .. } => ErrorSeverity::Warning,
            AutocompatError::InvalidManifest { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            AutocompatError::Config { .. } => ErrorSeverity::Critical,
            AutocompatError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            AutocompatError::ConfigRead { .. } => ErrorSeverity::Critical,
            AutocompatError::ConfigParse { .. } => ErrorSeverity::Critical,
            AutocompatError::TomlParse { .. } => ErrorSeverity::Critical,
            AutocompatError::GlobPattern { .. } => ErrorSeverity::Critical,
            AutocompatError::InvalidPath { .. } => ErrorSeverity::Critical,
            AutocompatError::StdoutWrite { .. } => ErrorSeverity::Critical,
            AutocompatError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but the process exits 1.
            // ManifestNotFound stays here so a missing package.json exits 1.
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            AutocompatError::ManifestNotFound { path, .. } => {
                format!(
                    "No package.json could be located from '{}'. Run autocompat inside a Node.js project, or point it at one with --path.",
                    path.display()
                )
            }
            AutocompatError::Parse { path, .. } => {
                format!(
                    "'{}' could not be parsed and was skipped. Run with --fail-fast to abort on parse failures.",
                    path.display()
                )
            }
            AutocompatError::PermissionDenied { path, .. } => {
                format!(
                    "Cannot access '{}' due to permission denied. Check file permissions.",
                    path.display()
                )
            }
            AutocompatError::JsonParse { file, source, .. } => {
                format!(
                    "Invalid JSON in '{}': {}. Please check the file format.",
                    file.display(),
                    source
                )
            }
            AutocompatError::InvalidPath { path, .. } => {
                format!(
                    "Invalid path: '{}'. Please provide a valid directory path.",
                    path.display()
                )
            }
            AutocompatError::ConfigNotFound { path, .. } => {
                format!(
                    "Configuration file not found at '{}'. Create one with --init or use command line options.",
                    path.display()
                )
            }
            AutocompatError::OutputDirectoryNotFound { path, .. } => {
                format!(
                    "Output directory '{}' does not exist. Create it or specify a different output path.",
                    path.display()
                )
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        AutocompatError::Io {
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a file read error with path context
    pub fn io_read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AutocompatError::IoRead {
            path: path.into(),
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a per-file parse failure
    pub fn parse_failure(path: impl Into<PathBuf>, messages: Vec<String>) -> Self {
        AutocompatError::Parse {
            path: path.into(),
            messages,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a JSON parse error with file context
    pub fn json_parse_error(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        AutocompatError::JsonParse {
            file: file.into(),
            source,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a missing-manifest error
    pub fn manifest_not_found(path: impl Into<PathBuf>) -> Self {
        AutocompatError::ManifestNotFound {
            path: path.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        AutocompatError::Config {
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a version parse error
    pub fn version_error(value: impl Into<String>) -> Self {
        AutocompatError::Version {
            value: value.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        AutocompatError::PermissionDenied {
            path: path.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a scan error with free-form context
    pub fn scan_error(message: impl Into<String>) -> Self {
        AutocompatError::Scan {
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    /// Create a directory traversal error
    pub fn traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        AutocompatError::Traversal {
            path: path.into(),
            message: message.into(),
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for AutocompatError {
    fn from(err: std::io::Error) -> Self {
        AutocompatError::io_error(err)
    }
}

impl From<toml::de::Error> for AutocompatError {
    fn from(err: toml::de::Error) -> Self {
        AutocompatError::TomlParse {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl From<glob::PatternError> for AutocompatError {
    fn from(err: glob::PatternError) -> Self {
        AutocompatError::GlobPattern {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

impl From<serde_json::Error> for AutocompatError {
    fn from(err: serde_json::Error) -> Self {
        AutocompatError::JsonSerialize {
            source: err,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }
}

/// Result type alias for autocompat operations
pub type Result<T> = std::result::Result<T, AutocompatError>;
