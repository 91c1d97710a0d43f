//! Command implementations

use super::args::Args;
use crate::config::{cli::CliConfig, ConfigBuilder, ConfigSource, EnvConfig};
use crate::core::engine::Engine;
use crate::error::{AutocompatError, Result};
use crate::models::analysis::Outcome;
use crate::models::config::{OutputFormat, Settings};
use crate::output::{create_formatter, create_writer, ManifestWriter, ProgressReporter};
use std::io::Write;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Crawl the dependency tree and recommend a minimum version (default)
    Crawl(Args),
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }
        Command::Crawl(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Crawl(args) => execute_crawl(args),
            Command::Init => execute_init(),
        }
    }
}

/// Build final settings from all configuration layers.
fn build_settings(args: &Args) -> Result<Settings> {
    let cli_config = CliConfig::from_args(args);
    let cli_partial = cli_config.load()?;

    let builder = ConfigBuilder::new();
    let builder = if let Some(config_path) = cli_config.config_path() {
        builder.add_config_file(config_path)?
    } else {
        builder.try_add_default_config_file()
    };

    builder
        .load_from(&EnvConfig::new())?
        .merge(cli_partial)
        .build()
}

fn execute_crawl(args: &Args) -> Result<()> {
    let settings = build_settings(args)?;

    if !settings.quiet && settings.verbose {
        println!(
            "{} v{} - minimum Node.js version recommender",
            crate::NAME,
            crate::VERSION
        );
        println!("Scan path: {}", settings.scan_path.display());
        if let Some(limit) = settings.limit {
            println!("Crawl limit: {}", limit);
        }
        println!("Settings: {:#?}", settings);
    }

    let show_progress =
        settings.show_progress && !settings.quiet && settings.output_format == OutputFormat::Text;
    let reporter = ProgressReporter::new(!show_progress, settings.verbose && show_progress);
    reporter.start(0, "Crawling dependencies");

    let engine = Engine::new(settings.clone())?;
    let report = engine.run(&mut |current, total, name| {
        reporter.update(current, total, name);
    })?;
    reporter.finish("Scan complete");

    let formatter = create_formatter(
        settings.output_format,
        settings.use_colors,
        settings.verbose,
        settings.debug,
    );
    let formatted = formatter.format(&report)?;

    let writer = create_writer(settings.output_file.as_ref());
    writer.write(&formatted)?;

    if settings.output_file.is_some() && !settings.quiet {
        println!(
            "Report written to: {}",
            settings.output_file.as_ref().map(|p| p.display().to_string()).unwrap_or_default()
        );
    }

    // Write-back is gated on explicit confirmation; the comparator itself
    // never mutates anything.
    if report.recommendation.outcome == Outcome::NeedsUpdate {
        let wants_update = if settings.assume_yes {
            true
        } else if settings.quiet || settings.output_format == OutputFormat::Json {
            false
        } else {
            confirm("Do you want to update package.json with the recommended version?")?
        };

        if wants_update {
            ManifestWriter::apply_constraint(
                &report.manifest_path,
                &report.recommendation.constraint(),
            )?;
            if !settings.quiet {
                println!("Updated {}", report.manifest_path.display());
            }
        }
    }

    Ok(())
}

fn execute_init() -> Result<()> {
    let config_path = std::path::PathBuf::from(crate::config::parser::DEFAULT_CONFIG_FILE);

    if config_path.exists() {
        println!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(());
    }

    crate::config::parser::create_default_config(&config_path)?;

    println!(
        "Created default configuration file at: {}",
        config_path.display()
    );
    println!("Every option is commented out; edit the file to customize the crawl.");
    Ok(())
}

/// Minimal y/N prompt on stdin.
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout()
        .flush()
        .map_err(|e| AutocompatError::StdoutWrite {
            source: e,
            #[cfg(not(tarpaulin_include))]
            backtrace: std::backtrace::Backtrace::capture(),
        })?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(AutocompatError::io_error)?;

    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
