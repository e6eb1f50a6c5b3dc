//! CLI argument definitions using clap
//!
//! - docsteer recommend           # Ranked documents for the current directory
//! - docsteer recommend --json    # Same, as JSON
//! - docsteer analyze             # Show the workspace fingerprint

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docsteer")]
#[command(about = "Recommend steering documents that fit your workspace")]
#[command(version)]
pub struct Cli {
    /// Workspace root (defaults to the current directory)
    #[arg(long, short = 'w', global = true)]
    pub workspace: Option<PathBuf>,

    /// Path to configuration file (defaults to <workspace>/docsteer.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank catalog documents against the workspace
    Recommend(RecommendArgs),

    /// Analyze the workspace and print its fingerprint
    Analyze {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RecommendArgs {
    /// Catalog JSON file or markdown directory
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Maximum number of recommendations
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Minimum score a document needs
    #[arg(long)]
    pub min_score: Option<u32>,

    /// Hide documents that are already installed
    #[arg(long)]
    pub exclude_installed: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}
