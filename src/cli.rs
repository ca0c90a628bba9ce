//! Command-line interface definitions using clap
//!
//! This module defines the process arguments for clicklink using clap's derive macros.

use clap::Parser;

/// Clicklink - an in-memory URL shortener with click limits
#[derive(Parser, Debug)]
#[command(name = "clicklink")]
#[command(version)]
#[command(about = "Interactive URL shortener with click limits and expiry", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML); defaults to ./clicklink.toml when present
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Print a sample configuration file and exit
    #[arg(long)]
    pub generate_config: bool,

    /// Override the configured log level (e.g. "info", "clicklink=debug")
    #[arg(long)]
    pub log_level: Option<String>,
}
