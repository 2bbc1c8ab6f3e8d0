//! PeerLens - statistical analyzer for classroom peer-review labels
//!
//! A CLI tool that aggregates quality labels over peer-review datasets:
//! co-occurrence counts, conditional probabilities, Pearson correlations,
//! and textual findings, reported as Markdown or JSON.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad input path, parse failure, write failure)

mod analysis;
mod cli;
mod config;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use models::{DatasetOverview, ReportMetadata, ReviewRecord};
use report::AnalysisReport;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Run the analysis
    // Logging is initialized inside, once the config file's verbose
    // setting is known.
    match run_analysis(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .peerlens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".peerlens.toml");

    if path.exists() {
        eprintln!("⚠️  .peerlens.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .peerlens.toml")?;

    println!("✅ Created .peerlens.toml with default settings.");
    println!("   Edit it to customize the label universe, thresholds, and report sections.");
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete analysis workflow. Returns exit code (always 0 on success).
fn run_analysis(args: Args) -> Result<i32> {
    let start_time = Instant::now();

    // Load configuration
    let (mut config, config_source) = load_config(&args)?;
    config.merge_with_args(&args);

    // Initialize logging once the merged verbose setting is known
    init_logging(config.log_level(&args));

    info!("PeerLens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match config_source {
        ConfigSource::File(ref path) => info!("Loaded config from: {}", path.display()),
        ConfigSource::Defaults => debug!("No config file found, using defaults"),
        ConfigSource::FallbackAfterError(ref e) => {
            warn!("Failed to load config file: {}. Using defaults.", e)
        }
    }

    let labels = config.labels.universe.clone();
    let output_path = config.output_path();

    // Step 1: Load the dataset
    let input = args
        .input
        .as_ref()
        .context("An input path is required")?;
    println!("📥 Loading dataset: {}", input.display());

    let mut records = loader::load_dataset(input)?;
    info!("Loaded {} review records", records.len());

    // Apply --assignment filter
    if let Some(ref assignments) = args.assignments {
        let names: Vec<String> = assignments
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect();
        records.retain(|record| {
            record
                .assignment
                .as_deref()
                .map(|a| names.iter().any(|n| n == a))
                .unwrap_or(false)
        });
        info!(
            "{} records remain after filtering to assignments: {}",
            records.len(),
            names.join(", ")
        );
    }

    if records.is_empty() {
        warn!("No records to analyze; all statistics will be degenerate");
    }

    // Handle --dry-run: print an overview and exit
    if args.dry_run {
        return handle_dry_run(&records, &labels);
    }

    // Step 2: Run the aggregation pipeline
    println!("🔬 Analyzing {} records over labels: {}", records.len(), labels.join(", "));

    let result = analysis::analyze(&records, &labels, &config.thresholds());

    // Step 3: Build the report
    println!("📝 Generating report...");

    let duration = start_time.elapsed().as_secs_f64();

    let frequency = analysis::label_frequency(&records, &labels);

    let grade_correlation = if config.report.include_grade_correlation
        && records.iter().any(|r| r.grade.is_some())
    {
        Some(analysis::grade_label_correlation(&records, &labels))
    } else {
        None
    };

    let metadata = ReportMetadata {
        source: input.display().to_string(),
        analysis_date: Utc::now(),
        labels: labels.clone(),
        records_analyzed: records.len(),
        duration_seconds: duration,
    };

    let analysis_report = AnalysisReport {
        metadata,
        overview: DatasetOverview::from_records(&records, &labels),
        cooccurrence: result.counts.matrix.clone(),
        correlation: result.correlation.clone(),
        probabilities: result.probabilities.clone(),
        frequency,
        grade_correlation,
        findings: result.findings,
    };

    // Step 4: Generate and save the report
    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&analysis_report)?,
        OutputFormat::Markdown => {
            report::generate_markdown_report(&analysis_report, &config.report)
        }
    };

    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    // Print summary
    println!("\n📊 Analysis Summary:");
    println!("   Records analyzed: {}", analysis_report.overview.total_records);
    println!("   Reviewers: {}", analysis_report.overview.reviewers);
    println!("   Assignments: {}", analysis_report.overview.assignments);
    println!("   Findings: {}", analysis_report.findings.len());
    println!("   Duration: {:.1}s", duration);
    println!(
        "\n✅ Analysis complete! Report saved to: {}",
        output_path.display()
    );

    Ok(0)
}

/// Handle --dry-run: print the dataset overview, exit without a report.
fn handle_dry_run(records: &[ReviewRecord], labels: &[String]) -> Result<i32> {
    println!("\n🔍 Dry run: dataset overview (no report written)...\n");

    let overview = DatasetOverview::from_records(records, labels);

    if overview.total_records == 0 {
        println!("   No review records found.");
    } else {
        println!("   Records: {}", overview.total_records);
        println!("   Reviewers: {}", overview.reviewers);
        println!("   Assignments: {}", overview.assignments);
        println!("\n   Label counts:");
        for (label, count) in &overview.label_counts {
            println!("     🏷️  {}: {}", label, count);
        }
        if !overview.records_per_assignment.is_empty() {
            println!("\n   Records per assignment:");
            for (assignment, count) in &overview.records_per_assignment {
                println!("     📄 {}: {}", assignment, count);
            }
        }
    }

    println!("\n✅ Dry run complete. No report was written.");
    Ok(0)
}

/// Where the configuration came from, logged once the subscriber is
/// installed.
enum ConfigSource {
    File(PathBuf),
    Defaults,
    FallbackAfterError(anyhow::Error),
}

/// Load configuration from file or use defaults.
///
/// Logging is not initialized yet when this runs (the config's verbose
/// setting feeds the log level), so the outcome is returned for the
/// caller to log.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // An explicit config path that fails to load is an error, not a
    // silent fallback
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::File(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::File(PathBuf::from(".peerlens.toml")))),
        Ok(None) => Ok((Config::default(), ConfigSource::Defaults)),
        Err(e) => Ok((Config::default(), ConfigSource::FallbackAfterError(e))),
    }
}
