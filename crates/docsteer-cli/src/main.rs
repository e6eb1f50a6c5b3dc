//! Docsteer CLI application
//!
//! Recommends steering documents for a JavaScript/TypeScript workspace.
//!
//! ```bash
//! docsteer recommend --catalog ./steering-catalog
//! docsteer recommend --max-results 3 --exclude-installed --json
//! docsteer analyze
//! ```

mod args;
mod commands;
mod console;
mod logging;
mod router;

use clap::Parser;
use std::process::ExitCode;

use args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match router::route(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console::report_error(&e);
            ExitCode::FAILURE
        }
    }
}
