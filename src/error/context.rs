//! Error context utilities
//!
//! Helpers for attaching context to errors and recovering from non-critical
//! failures in a consistent way throughout the application.

use crate::error::{AutocompatError, Result};
use std::path::Path;

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Add context to an error with a custom message
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;

    /// Add file context to an error
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| AutocompatError::scan_error(format!("{}: {}", context(), err)))
    }

    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| {
            if let Some(io_err) = (&err as &dyn std::error::Error).downcast_ref::<std::io::Error>()
            {
                if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                    return AutocompatError::permission_denied(path.as_ref());
                }
            }

            AutocompatError::traversal_error(path.as_ref(), err.to_string())
        })
    }
}

/// Handle an error based on its severity
///
/// Warnings and errors are logged and absorbed; critical errors are handed
/// back to the caller.
pub fn handle_error(err: AutocompatError) -> Option<AutocompatError> {
    let severity = err.severity();
    let message = err.user_message();

    match severity {
        crate::error::ErrorSeverity::Warning => {
            eprintln!("Warning: {}", message);
            None
        }
        crate::error::ErrorSeverity::Error => {
            eprintln!("Error: {}", message);
            None
        }
        crate::error::ErrorSeverity::Critical => {
            eprintln!("Critical Error: {}", message);
            Some(err)
        }
    }
}

/// Try to run a function and handle any errors based on their severity
///
/// Returns Ok(Some(T)) on success, Ok(None) when a non-critical error was
/// absorbed, and Err when a critical error occurred.
pub fn try_with_recovery<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            if let Some(critical_err) = handle_error(err) {
                Err(critical_err)
            } else {
                Ok(None)
            }
        }
    }
}

/// Extension trait for Option to convert to Result with a custom error
pub trait OptionExt<T> {
    /// Convert Option to Result with a custom error message
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> AutocompatError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> AutocompatError,
    {
        self.ok_or_else(err_fn)
    }
}
