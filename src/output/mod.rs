//! Output formatting and writing functionality

pub mod formatters;
pub mod progress;
pub mod writers;

pub use progress::ProgressReporter;
pub use writers::{create_writer, FileWriter, ManifestWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::analysis::ProjectReport;
use crate::models::config::OutputFormat;

/// Trait for report formatters
pub trait Formatter {
    /// Format a project report into a string
    fn format(&self, report: &ProjectReport) -> Result<String>;
}

/// Human-readable text formatter
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub debug: bool,
}

impl Formatter for TextFormatter {
    fn format(&self, report: &ProjectReport) -> Result<String> {
        formatters::format_report_text(report, self.use_colors, self.verbose, self.debug)
    }
}

/// Machine-readable JSON formatter
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &ProjectReport) -> Result<String> {
        formatters::format_report_json(report)
    }
}

/// Create a formatter for the configured output format
pub fn create_formatter(
    format: OutputFormat,
    use_colors: bool,
    verbose: bool,
    debug: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter {
            use_colors,
            verbose,
            debug,
        }),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
