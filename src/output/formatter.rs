//! Leaderboard formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::{RankerError, Result};
use crate::output::report::{LeaderboardReport, ReportEntry};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a leaderboard report
pub trait OutputFormatter {
    fn format_report(&self, report: &LeaderboardReport) -> Result<String>;
}

/// Console formatter with optional colors and score breakdown
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn score_color(score: f64) -> Color {
        if score >= 75.0 {
            Color::Green
        } else if score >= 50.0 {
            Color::Yellow
        } else {
            Color::Red
        }
    }

    fn format_entry(&self, entry: &ReportEntry) -> String {
        let mut output = format!(
            "🏅 Rank #{} | {} | Match Score: {}\n",
            entry.rank,
            entry.candidate_id,
            self.colorize(&format!("{:.2}%", entry.score), Self::score_color(entry.score))
        );

        if !entry.missing_skills.is_empty() {
            output.push_str(&format!("   🔍 Missing Skills: {}\n", entry.missing_skills.join(", ")));
        }

        for warning in &entry.warnings {
            output.push_str(&format!("   {}\n", self.colorize(&format!("⚠️  {}", warning), Color::Yellow)));
        }

        if self.detailed {
            output.push_str(&format!(
                "   Base similarity: {:.2}% | Title boost: +{:.2}",
                entry.breakdown.base_similarity, entry.breakdown.extra_weight
            ));
            if !entry.breakdown.matched_title_keywords.is_empty() {
                output.push_str(&format!(" ({})", entry.breakdown.matched_title_keywords.join(", ")));
            }
            output.push('\n');
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &LeaderboardReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.colorize("🚀 Resume Rankings for Job Posting", Color::Cyan));
        output.push('\n');
        if !report.metadata.job_title.is_empty() {
            output.push_str(&format!("💼 {}\n", report.metadata.job_title));
        }
        output.push('\n');

        for entry in &report.entries {
            output.push_str(&self.format_entry(entry));
            output.push('\n');
        }

        output.push_str(&self.colorize(
            &format!(
                "ℹ️  {} candidates | Model: {} | Generated: {}",
                report.metadata.candidate_count,
                report.metadata.embedding_model,
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Color::BrightBlack,
        ));
        output.push('\n');

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &LeaderboardReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &LeaderboardReport) -> Result<String> {
        let mut content = String::from("# Resume Leaderboard\n\n");

        if !report.metadata.job_title.is_empty() {
            content.push_str(&format!("**Job:** {}\n\n", report.metadata.job_title));
        }

        content.push_str("| Rank | Candidate | Match Score | Missing Skills |\n");
        content.push_str("|------|-----------|-------------|----------------|\n");

        for entry in &report.entries {
            let missing = if entry.missing_skills.is_empty() {
                "-".to_string()
            } else {
                entry.missing_skills.join(", ")
            };
            content.push_str(&format!(
                "| {} | {} | {:.2}% | {} |\n",
                entry.rank,
                Self::escape_cell(&entry.candidate_id),
                entry.score,
                Self::escape_cell(&missing)
            ));
        }

        let flagged: Vec<&ReportEntry> = report.entries.iter().filter(|e| !e.warnings.is_empty()).collect();
        if !flagged.is_empty() {
            content.push_str("\n## Warnings\n\n");
            for entry in flagged {
                content.push_str(&format!("- **{}**: {}\n", entry.candidate_id, entry.warnings.join("; ")));
            }
        }

        if self.include_metadata {
            content.push_str("\n---\n\n");
            content.push_str(&format!(
                "*Generated {} by resume-ranker v{} using {} ({})*\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.ranker_version,
                report.metadata.embedding_model,
                report.metadata.job_path
            ));
        }

        Ok(content)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &LeaderboardReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content).map_err(|e| {
        RankerError::OutputFormatting(format!("Failed to write report to {}: {}", file_path.display(), e))
    })
}

/// Default report file name for a format, optionally timestamped
pub fn suggest_filename(format: &OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("leaderboard{}.{}", timestamp_suffix, extension)
}
