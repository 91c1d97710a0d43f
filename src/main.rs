use autocompat::{
    cli::{Args, Command},
    error::{AutocompatError, ErrorSeverity},
};
use std::process;

fn main() {
    let args = Args::parse_args();
    let command = Command::from_args(args);
    process::exit(run_command(command));
}

/// Run the command and map failures onto exit codes: warnings exit clean,
/// errors (including a missing package.json) exit 1, critical configuration
/// problems exit 2.
fn run_command(command: Command) -> i32 {
    match command.execute() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("\nError: {}", err.user_message());

            match &err {
                AutocompatError::ManifestNotFound { .. } => {
                    eprintln!("Suggestion: run from a directory inside a Node.js project, or pass --path");
                }
                AutocompatError::ConfigNotFound { .. } => {
                    eprintln!("Suggestion: create a .autocompat.toml with --init or drop the --config flag");
                }
                AutocompatError::PermissionDenied { .. } => {
                    eprintln!("Suggestion: check file permissions on the reported path");
                }
                AutocompatError::OutputDirectoryNotFound { .. } => {
                    eprintln!("Suggestion: create the output directory first or choose a different --output-file");
                }
                _ => {}
            }

            match err.severity() {
                ErrorSeverity::Warning => 0,
                ErrorSeverity::Error => 1,
                ErrorSeverity::Critical => 2,
            }
        }
    }
}
