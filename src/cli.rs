//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// prleague - pull-request points leaderboard for GitHub repositories
///
/// Scores every merged pull request by its level labels, ranks the
/// repository's contributors and prints one page of the leaderboard.
///
/// Examples:
///   prleague
///   prleague --owner acme --repo widgets --page 2
///   prleague --contributor alice --format json
///   prleague --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Repository owner (also the lead account excluded from the ranking)
    #[arg(long, value_name = "OWNER", env = "PRLEAGUE_OWNER")]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long, value_name = "NAME", env = "PRLEAGUE_REPO")]
    pub repo: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Leaderboard page to show (1-based)
    #[arg(short, long, default_value = "1", value_name = "N")]
    pub page: usize,

    /// Show the detail view for one contributor
    #[arg(long, value_name = "LOGIN")]
    pub contributor: Option<String>,

    /// Open the Nth card (1-based) of the shown page in the detail view
    #[arg(long, value_name = "N", conflicts_with = "contributor")]
    pub card: Option<usize>,

    /// Skip the recent-activity feed
    #[arg(long)]
    pub no_activity: bool,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the page to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .prleague.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .prleague.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.page == 0 {
            return Err("Page must be at least 1".to_string());
        }

        if let Some(ref api_base) = self.api_base {
            if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
                return Err("API base must start with 'http://' or 'https://'".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if self.card == Some(0) {
            return Err("Card must be at least 1".to_string());
        }

        if let Some(ref login) = self.contributor {
            if login.trim().is_empty() {
                return Err("Contributor login must not be empty".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
