//! Output formatting functionality

use crate::core::tokens::TokenTable;
use crate::error::Result;
use crate::models::analysis::{Outcome, ProjectReport};
use ansi_term::Colour::{Cyan, Green, Yellow};
use ansi_term::Style;

/// Format one token table as aligned `feature version` lines.
pub fn format_token_table(table: &TokenTable, use_colors: bool, indent: &str) -> String {
    let mut output = String::new();
    let width = table
        .iter()
        .map(|(feature, _)| feature.to_string().len())
        .max()
        .unwrap_or(0);

    for (feature, version) in table {
        let name = feature.to_string();
        if use_colors {
            output.push_str(&format!(
                "{}{:width$}  {}\n",
                indent,
                name,
                Cyan.paint(version.to_string()),
                width = width
            ));
        } else {
            output.push_str(&format!(
                "{}{:width$}  {}\n",
                indent,
                name,
                version,
                width = width
            ));
        }
    }
    output
}

/// Format the full report as human-readable text, mirroring the console
/// flow: manifest location, dependency count, optional detection tables,
/// both minimum versions, the declared constraint and the recommendation.
pub fn format_report_text(
    report: &ProjectReport,
    use_colors: bool,
    verbose: bool,
    debug: bool,
) -> Result<String> {
    let mut output = String::new();
    let dim = Style::new().dimmed();

    output.push_str(&format!(
        "Found package.json at {}\n",
        report.manifest_path.display()
    ));

    let count = report.packages.len().to_string();
    if use_colors {
        output.push_str(&format!(
            "{} dependencies in total\n",
            Yellow.paint(count)
        ));
    } else {
        output.push_str(&format!("{} dependencies in total\n", count));
    }

    if debug {
        for package in &report.packages {
            if package.tokens.is_empty() {
                continue;
            }
            output.push_str(&format!(
                "\n{} ({} files)\n",
                package.name, package.files_scanned
            ));
            output.push_str(&format_token_table(&package.tokens, use_colors, "  "));
        }
        if !report.source_tokens.is_empty() {
            output.push_str(&format!(
                "\nproject source ({} files)\n",
                report.source_files_scanned
            ));
            output.push_str(&format_token_table(&report.source_tokens, use_colors, "  "));
        }
        output.push('\n');
    }

    let source_version = report.source_version.to_string();
    let dependency_version = report.dependency_version.to_string();
    if use_colors {
        output.push_str(&format!(
            "{} {}\n",
            dim.paint("Minimum Node.js version for source:"),
            Green.paint(source_version)
        ));
    } else {
        output.push_str(&format!(
            "Minimum Node.js version for source: {}\n",
            source_version
        ));
    }
    if !report.packages.is_empty() {
        if use_colors {
            output.push_str(&format!(
                "{} {}\n",
                dim.paint("Minimum Node.js version for dependencies:"),
                Green.paint(dependency_version)
            ));
        } else {
            output.push_str(&format!(
                "Minimum Node.js version for dependencies: {}\n",
                dependency_version
            ));
        }
    }

    if let Some(declared) = &report.declared {
        output.push_str(&format!("Current engines.node value: {}\n", declared));
    }

    match report.recommendation.outcome {
        Outcome::AlreadyOptimal => {
            output.push_str("Correct engines.node value already set\n");
        }
        Outcome::NeedsUpdate => {
            let constraint = report.recommendation.constraint();
            if use_colors {
                output.push_str(&format!(
                    "Recommended engines.node value: {}\n",
                    Green.bold().paint(constraint)
                ));
            } else {
                output.push_str(&format!("Recommended engines.node value: {}\n", constraint));
            }
        }
    }

    if report.warning_count() > 0 {
        output.push_str(&format!(
            "{} file(s) skipped due to parse or read failures\n",
            report.warning_count()
        ));
        if verbose {
            for warning in &report.warnings {
                output.push_str(&format!(
                    "  {}: {}\n",
                    warning.path.display(),
                    warning.message
                ));
            }
            for package in &report.packages {
                for warning in &package.warnings {
                    output.push_str(&format!(
                        "  {}: {}\n",
                        warning.path.display(),
                        warning.message
                    ));
                }
            }
        }
    }

    if verbose {
        output.push_str(&format!(
            "\nScanned {} package(s) in {:.2?}\n",
            report.packages.len(),
            report.scan_duration
        ));
        output.push_str(&format!(
            "Completed at: {}\n",
            report.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    Ok(output)
}

/// Format the report as pretty-printed JSON.
pub fn format_report_json(report: &ProjectReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}
