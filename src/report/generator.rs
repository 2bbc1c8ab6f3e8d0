//! Markdown and JSON report generation.
//!
//! This module renders the analysis results into a comprehensive Markdown
//! report, or serializes the full report model as JSON.

use crate::config::ReportConfig;
use crate::models::{ReportMetadata, Strength};
use crate::report::AnalysisReport;
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &AnalysisReport, config: &ReportConfig) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# PeerLens Report\n\n");

    // Metadata section
    output.push_str(&generate_metadata_section(&report.metadata));

    // Dataset summary
    output.push_str(&generate_summary_section(report, config));

    // Matrices
    if config.include_matrices {
        output.push_str(&generate_matrix_sections(report));
    }

    // Conditional probabilities
    output.push_str(&generate_probability_section(report));

    // Insight findings
    if config.include_insights {
        output.push_str(&generate_insights_section(report));
    }

    // Grade correlation
    if config.include_grade_correlation {
        output.push_str(&generate_grade_section(report));
    }

    // Footer
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** `{}`\n", metadata.source));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Label Universe:** {}\n",
        metadata.labels.join(", ")
    ));
    section.push_str(&format!(
        "- **Records Analyzed:** {}\n",
        metadata.records_analyzed
    ));
    section.push_str(&format!(
        "- **Analysis Duration:** {:.2}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the dataset summary section.
fn generate_summary_section(report: &AnalysisReport, config: &ReportConfig) -> String {
    let mut section = String::new();
    let overview = &report.overview;

    section.push_str("## Dataset Summary\n\n");

    if overview.total_records == 0 {
        section.push_str("No review records were found. All statistics below are degenerate.\n\n");
        return section;
    }

    section.push_str(&format!("- **Reviewers:** {}\n", overview.reviewers));
    section.push_str(&format!("- **Assignments:** {}\n\n", overview.assignments));

    // Label counts
    section.push_str("### Label Counts\n\n");
    section.push_str("| Label | Records | Share |\n");
    section.push_str("|:---|:---:|:---:|\n");
    for (label, count) in &overview.label_counts {
        let share = *count as f64 / overview.total_records as f64 * 100.0;
        section.push_str(&format!("| {} | {} | {:.1}% |\n", label, count, share));
    }
    section.push('\n');

    // Per-assignment frequency
    if !report.frequency.is_empty() {
        section.push_str("### Label Frequency by Assignment\n\n");
        section.push_str("| Assignment | Records |");
        for label in &report.metadata.labels {
            section.push_str(&format!(" {} |", label));
        }
        section.push('\n');
        section.push_str("|:---|:---:|");
        for _ in &report.metadata.labels {
            section.push_str(":---:|");
        }
        section.push('\n');

        for (assignment, frequency) in report.frequency.iter().take(config.max_assignments) {
            section.push_str(&format!("| {} | {} |", assignment, frequency.total));
            for label in &report.metadata.labels {
                let percent = frequency.percent.get(label).copied().unwrap_or(0.0);
                section.push_str(&format!(" {:.1}% |", percent));
            }
            section.push('\n');
        }

        let omitted = report.frequency.len().saturating_sub(config.max_assignments);
        if omitted > 0 {
            section.push_str(&format!("\n*{} more assignment(s) omitted.*\n", omitted));
        }
        section.push('\n');
    }

    section
}

/// Generate the co-occurrence and correlation matrix sections.
fn generate_matrix_sections(report: &AnalysisReport) -> String {
    let mut section = String::new();
    let labels = &report.metadata.labels;

    section.push_str("## Label Co-occurrence\n\n");
    section.push_str(
        "Counts of records carrying both labels; both orderings of a pair are stored.\n\n",
    );
    section.push_str(&render_matrix(labels, &report.cooccurrence, |v| {
        v.to_string()
    }));

    section.push_str("## Pearson Correlation\n\n");
    section.push_str(
        "Correlation between binary label-presence vectors. \
         Zero-variance labels show 0.\n\n",
    );
    section.push_str(&render_matrix(labels, &report.correlation, |v| {
        format!("{:.3}", v)
    }));

    section
}

/// Render a square matrix as a Markdown table.
fn render_matrix<T, F>(labels: &[String], matrix: &[Vec<T>], format_cell: F) -> String
where
    F: Fn(&T) -> String,
{
    let mut table = String::new();

    table.push_str("| |");
    for label in labels {
        table.push_str(&format!(" {} |", label));
    }
    table.push('\n');
    table.push_str("|:---|");
    for _ in labels {
        table.push_str(":---:|");
    }
    table.push('\n');

    for (i, label) in labels.iter().enumerate() {
        table.push_str(&format!("| **{}** |", label));
        if let Some(row) = matrix.get(i) {
            for value in row {
                table.push_str(&format!(" {} |", format_cell(value)));
            }
        }
        table.push('\n');
    }
    table.push('\n');

    table
}

/// Generate the conditional-probability section.
fn generate_probability_section(report: &AnalysisReport) -> String {
    let mut section = String::new();

    section.push_str("## Conditional Probabilities\n\n");
    section.push_str("| Condition | Probability |\n");
    section.push_str("|:---|:---:|\n");
    for (condition, probability) in &report.probabilities.conditionals {
        section.push_str(&format!(
            "| {} | {:.1}% |\n",
            condition,
            probability * 100.0
        ));
    }
    section.push('\n');

    section.push_str("### Predicts Others\n\n");
    section.push_str(
        "Pairwise co-occurrences involving the label, over its single count.\n\n",
    );
    section.push_str("| Label | Probability |\n");
    section.push_str("|:---|:---:|\n");
    for (label, probability) in &report.probabilities.predicts_others {
        section.push_str(&format!("| {} | {:.1}% |\n", label, probability * 100.0));
    }
    section.push('\n');

    section
}

/// Generate the insight findings section.
fn generate_insights_section(report: &AnalysisReport) -> String {
    let mut section = String::new();

    section.push_str("## Findings\n\n");

    if report.findings.is_empty() {
        section.push_str("No findings above the configured thresholds.\n\n");
        return section;
    }

    for finding in &report.findings {
        let badge = match finding.strength {
            Strength::Strong => "**strong**",
            Strength::Moderate => "**moderate**",
            Strength::Weak => "*weak*",
            Strength::Informative => "*informative*",
        };
        section.push_str(&format!(
            "- [{}] {} ({})\n",
            finding.kind, finding.message, badge
        ));
    }
    section.push('\n');

    section
}

/// Generate the grade correlation section.
fn generate_grade_section(report: &AnalysisReport) -> String {
    let Some(ref correlations) = report.grade_correlation else {
        return String::new();
    };

    let mut section = String::new();

    section.push_str("## Grade Correlation\n\n");
    section.push_str("Pearson correlation between reviewer grades and label presence.\n\n");
    section.push_str("| Label | Coefficient |\n");
    section.push_str("|:---|:---:|\n");
    for (label, coefficient) in correlations {
        section.push_str(&format!("| {} | {:.3} |\n", label, coefficient));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by PeerLens*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
