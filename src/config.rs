//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.peerlens.toml` files.

use crate::analysis::InsightThresholds;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Label universe settings.
    #[serde(default)]
    pub labels: LabelConfig,

    /// Insight generation thresholds.
    #[serde(default)]
    pub insights: InsightConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "peerlens_report.md".to_string()
}

/// Label universe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Ordered label universe. Order fixes matrix indices; the last label is
    /// the target of the double-condition analysis.
    #[serde(default = "default_universe")]
    pub universe: Vec<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            universe: default_universe(),
        }
    }
}

fn default_universe() -> Vec<String> {
    vec!["relevance", "concreteness", "constructive"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Insight generation thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Minimum absolute gap between single-condition probabilities for a
    /// differential-impact finding.
    #[serde(default = "default_differential")]
    pub differential_threshold: f64,

    /// Double-condition probability above this is "strong".
    #[serde(default = "default_strong")]
    pub strong_threshold: f64,

    /// Double-condition probability above this (up to strong) is "moderate".
    #[serde(default = "default_moderate")]
    pub moderate_threshold: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            differential_threshold: default_differential(),
            strong_threshold: default_strong(),
            moderate_threshold: default_moderate(),
        }
    }
}

fn default_differential() -> f64 {
    0.1
}

fn default_strong() -> f64 {
    0.7
}

fn default_moderate() -> f64 {
    0.5
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the co-occurrence and correlation matrix tables.
    #[serde(default = "default_true")]
    pub include_matrices: bool,

    /// Include the insight findings section.
    #[serde(default = "default_true")]
    pub include_insights: bool,

    /// Include the grade-label correlation section when grades are present.
    #[serde(default = "default_true")]
    pub include_grade_correlation: bool,

    /// Maximum assignment groups listed in the frequency table.
    #[serde(default = "default_max_assignments")]
    pub max_assignments: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_matrices: true,
            include_insights: true,
            include_grade_correlation: true,
            max_assignments: default_max_assignments(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_assignments() -> usize {
    20
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".peerlens.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref labels) = args.labels {
            self.labels.universe = labels
                .iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();
        }

        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// The report output path after merging: CLI, else config, else default.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.general.output)
    }

    /// Effective log level after merging.
    ///
    /// `--quiet` wins over everything; a `verbose = true` config setting
    /// raises the default level to DEBUG just like `--verbose` does.
    pub fn log_level(&self, args: &crate::cli::Args) -> tracing::Level {
        if self.general.verbose && !args.quiet {
            tracing::Level::DEBUG
        } else {
            args.log_level()
        }
    }

    /// Insight thresholds as the analysis core consumes them.
    pub fn thresholds(&self) -> InsightThresholds {
        InsightThresholds {
            differential: self.insights.differential_threshold,
            strong: self.insights.strong_threshold,
            moderate: self.insights.moderate_threshold,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.labels.universe,
            vec!["relevance", "concreteness", "constructive"]
        );
        assert_eq!(config.insights.differential_threshold, 0.1);
        assert!(config.report.include_matrices);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "custom_report.md"
verbose = true

[labels]
universe = ["clarity", "depth"]

[insights]
strong_threshold = 0.8
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "custom_report.md");
        assert!(config.general.verbose);
        assert_eq!(config.labels.universe, vec!["clarity", "depth"]);
        assert_eq!(config.insights.strong_threshold, 0.8);
        // Unspecified sections keep their defaults.
        assert_eq!(config.insights.differential_threshold, 0.1);
        assert_eq!(config.report.max_assignments, 20);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[labels]"));
        assert!(toml_str.contains("[insights]"));
        assert!(toml_str.contains("[report]"));
    }

    #[test]
    fn test_thresholds_mapping() {
        let config = Config::default();
        let thresholds = config.thresholds();
        assert_eq!(thresholds, InsightThresholds::default());
    }

    fn make_args() -> crate::cli::Args {
        crate::cli::Args {
            input: Some(PathBuf::from(".")),
            output: None,
            format: crate::cli::OutputFormat::Markdown,
            labels: None,
            assignments: None,
            config: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_config_output_used_when_cli_omits_it() {
        let mut config: Config = toml::from_str("[general]\noutput = \"from_config.md\"").unwrap();
        config.merge_with_args(&make_args());
        assert_eq!(config.output_path(), PathBuf::from("from_config.md"));
    }

    #[test]
    fn test_cli_output_overrides_config() {
        let mut config: Config = toml::from_str("[general]\noutput = \"from_config.md\"").unwrap();
        let mut args = make_args();
        args.output = Some(PathBuf::from("from_cli.md"));
        config.merge_with_args(&args);
        assert_eq!(config.output_path(), PathBuf::from("from_cli.md"));
    }

    #[test]
    fn test_output_defaults_without_config_or_cli() {
        let mut config = Config::default();
        config.merge_with_args(&make_args());
        assert_eq!(config.output_path(), PathBuf::from("peerlens_report.md"));
    }

    #[test]
    fn test_config_verbose_raises_log_level() {
        let args = make_args();
        let mut config = Config::default();
        assert_eq!(config.log_level(&args), tracing::Level::INFO);

        config.general.verbose = true;
        assert_eq!(config.log_level(&args), tracing::Level::DEBUG);
    }

    #[test]
    fn test_quiet_wins_over_config_verbose() {
        let mut args = make_args();
        args.quiet = true;
        let mut config = Config::default();
        config.general.verbose = true;
        assert_eq!(config.log_level(&args), tracing::Level::ERROR);
    }
}
