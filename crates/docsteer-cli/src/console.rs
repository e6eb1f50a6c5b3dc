//! CLI console utilities

use colored::*;
use docsteer_core::SteerError;

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.chars().count()).dimmed());
    }
}

/// Print a top-level failure, prefixing core errors with their code
pub fn report_error(error: &anyhow::Error) {
    let console = CliConsole::new(false);
    match error.downcast_ref::<SteerError>() {
        Some(steer) => console.error(&format!("[{}] {}", steer.code(), steer)),
        None => console.error(&format!("{:#}", error)),
    }
}
