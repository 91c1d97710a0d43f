//! Command-line argument parsing

use crate::models::config::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// autocompat - recommends the minimum Node.js version for a package
#[derive(Parser, Debug)]
#[command(name = "autocompat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recommend the minimum Node.js version for a package and its dependency tree")]
#[command(long_about = "autocompat statically scans a project's source files and its installed \
dependencies, detects which syntax constructs and runtime APIs they use, and cross-references \
a bundled compatibility dataset to recommend the minimum engines.node constraint. \
On confirmation it writes the recommendation back into package.json.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Crawl the project containing the current directory
    autocompat

    # Crawl a specific project
    autocompat --path ./my-project

    # Cap the dependency crawl at 50 packages
    autocompat --limit 50

    # Show the per-package detection tables
    autocompat --debug

Manifest Updates:
    # Update package.json without the confirmation prompt
    autocompat --yes

Output Options:
    # Machine-readable report
    autocompat --output json

    # Write the report to a file
    autocompat --output json --output-file report.json

    # Disable colored output
    autocompat --no-colors

Failure Handling:
    # Abort on the first unparseable source file
    autocompat --fail-fast

    # Skip vendored trees
    autocompat --exclude vendor --exclude dist

Configuration:
    # Use a specific configuration file
    autocompat --config ./autocompat.toml

    # Create a default configuration file
    autocompat --init
")]
pub struct Args {
    /// Directory to locate the project manifest from
    #[arg(short, long, value_name = "PATH", help = "Directory the package.json search starts from (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Cap on the number of dependencies to crawl
    #[arg(short, long, value_name = "N", help = "Limit the number of dependencies to crawl")]
    pub limit: Option<usize>,

    /// Print per-package and per-file detection tables
    #[arg(long, help = "Enable debug mode: print every package's detected features and versions")]
    pub debug: bool,

    /// Update package.json without prompting
    #[arg(short = 'y', long, help = "Assume yes: apply the recommended engines.node value without prompting")]
    pub yes: bool,

    /// Abort on the first source file that fails to parse
    #[arg(long, help = "Abort the run when a source file cannot be parsed instead of skipping it")]
    pub fail_fast: bool,

    /// Exclude paths matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for directories to exclude from scanning (repeatable)")]
    pub exclude: Vec<String>,

    /// Skip the root manifest's devDependencies
    #[arg(long, help = "Exclude the root manifest's devDependencies from the crawl")]
    pub no_dev_deps: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, help = "Output format: 'text' for human-readable output, 'json' for machine processing")]
    pub output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write the report to (stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, help = "Disable colored console output")]
    pub no_colors: bool,

    /// Disable the progress bar
    #[arg(long, help = "Disable progress reporting while crawling")]
    pub no_progress: bool,

    /// Disable parallel file classification
    #[arg(long, help = "Classify files serially instead of across the thread pool")]
    pub no_parallel: bool,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (only results are printed)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show detailed settings and timing information")]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to a configuration file (defaults to .autocompat.toml if present)")]
    pub config: Option<PathBuf>,

    /// Create a default configuration file and exit
    #[arg(long, help = "Create a default .autocompat.toml in the current directory")]
    pub init: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let args = Args::parse_from(["autocompat"]);
        assert!(args.path.is_none());
        assert!(args.limit.is_none());
        assert!(!args.debug);
        assert_eq!(args.output, OutputFormat::Text);
    }

    #[test]
    fn crawl_flags_parse() {
        let args = Args::parse_from([
            "autocompat",
            "--limit",
            "25",
            "--debug",
            "--yes",
            "--fail-fast",
            "--exclude",
            "vendor",
            "--output",
            "json",
        ]);
        assert_eq!(args.limit, Some(25));
        assert!(args.debug);
        assert!(args.yes);
        assert!(args.fail_fast);
        assert_eq!(args.exclude, vec!["vendor"]);
        assert_eq!(args.output, OutputFormat::Json);
    }
}
