//! Progress reporting for the crawl and scan

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter wrapping a single spinner/bar, silent in quiet mode.
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let bar = if quiet {
            None
        } else {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            bar.enable_steady_tick(Duration::from_millis(120));
            Some(bar)
        };

        Self { quiet, verbose, bar }
    }

    /// Start a new operation with a known total.
    pub fn start(&self, total: usize, operation: &str) {
        if let Some(bar) = &self.bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
            bar.set_message(operation.to_string());
        }
        if self.verbose {
            println!("Starting: {}", operation);
        }
    }

    /// Update progress.
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
            bar.set_message(message.to_string());
        }
        if self.verbose {
            println!("[{}/{}] {}", current, total, message);
        }
    }

    /// Finish and clear the bar so the report prints on a clean line.
    pub fn finish(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
        if !self.quiet && self.verbose {
            println!("{}", message);
        }
    }
}
