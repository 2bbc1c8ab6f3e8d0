//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// PeerLens - statistical analyzer for classroom peer-review labels
///
/// Computes label co-occurrence, conditional probabilities, and Pearson
/// correlations from peer-review datasets. Markdown/JSON reports.
///
/// Examples:
///   peerlens --input reviews.json
///   peerlens --input data/ --format json --output report.json
///   peerlens --input reviews.csv --assignment HW1,HW2
///   peerlens --input reviews.json --dry-run
///   peerlens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the review dataset (.json or .csv file, or a directory)
    ///
    /// A directory is scanned for data files, loaded in sorted order.
    /// Not required when using --init-config.
    #[arg(short, long, value_name = "PATH", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to the config file's `output` setting, else
    /// peerlens_report.md.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Label universe (comma-separated, order fixes matrix indices)
    ///
    /// Defaults to relevance,concreteness,constructive. Can also be set via
    /// PEERLENS_LABELS env var or .peerlens.toml config.
    #[arg(
        short,
        long,
        value_name = "LABELS",
        value_delimiter = ',',
        env = "PEERLENS_LABELS"
    )]
    pub labels: Option<Vec<String>>,

    /// Restrict analysis to the named assignment group(s) (comma-separated)
    ///
    /// Example: --assignment HW1,HW2
    #[arg(short, long = "assignment", value_name = "NAMES", value_delimiter = ',')]
    pub assignments: Option<Vec<String>>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .peerlens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load the dataset and print an overview without a report
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .peerlens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
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
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        match self.input {
            Some(ref input) if !input.exists() => {
                return Err(format!("Input path does not exist: {}", input.display()));
            }
            None => {
                return Err("An input path is required".to_string());
            }
            _ => {}
        }

        if let Some(ref labels) = self.labels {
            if labels.iter().all(|l| l.trim().is_empty()) {
                return Err("Label universe must not be empty".to_string());
            }
            let mut seen = std::collections::BTreeSet::new();
            for label in labels {
                if !seen.insert(label.trim()) {
                    return Err(format!("Duplicate label in universe: {}", label.trim()));
                }
            }
        }

        if let Some(ref assignments) = self.assignments {
            if assignments.iter().all(|a| a.trim().is_empty()) {
                return Err("--assignment requires at least one name".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
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
