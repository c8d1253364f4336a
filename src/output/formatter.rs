//! Output formatters for the candidate ranking

use crate::config::OutputFormat;
use crate::error::{CvRankerError, Result};
use crate::output::report::{RankedCandidate, RankingReport};
use crate::processing::assessment::Recommendation;
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for rendering a ranking report
pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
}

/// Console table with optional per-candidate detail
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

/// Coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn recommendation_color(recommendation: Recommendation) -> Color {
    match recommendation {
        Recommendation::InviteToInterview => Color::Green,
        Recommendation::KeepOnHold => Color::Yellow,
        Recommendation::Reject => Color::Red,
        Recommendation::Error => Color::BrightRed,
    }
}

/// Shorten `text` to `max_chars` characters, appending an ellipsis.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut.trim_end())
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n# {}\n", title)
        }
    }

    fn score_bar(score: u8) -> String {
        let filled = (score as usize + 5) / 10;
        format!("{}{}", "■".repeat(filled), "·".repeat(10 - filled))
    }

    fn format_candidate_detail(&self, candidate: &RankedCandidate) -> String {
        let a = &candidate.assessment;
        let mut output = String::new();

        output.push_str(&format!(
            "\n{}. {} ({})\n",
            candidate.rank,
            self.colorize(a.display_name(), Color::Cyan),
            a.source_file_name
        ));
        if !a.experience_summary.is_empty() {
            output.push_str(&format!("   Experience: {}\n", a.experience_summary));
        }
        if !a.education_summary.is_empty() {
            output.push_str(&format!("   Education:  {}\n", a.education_summary));
        }
        if !a.matched_skills.is_empty() {
            output.push_str(&format!(
                "   {} {}\n",
                self.colorize("Matched:", Color::Green),
                a.matched_skills.join(", ")
            ));
        }
        if !a.missing_skills.is_empty() {
            output.push_str(&format!(
                "   {} {}\n",
                self.colorize("Missing:", Color::Red),
                a.missing_skills.join(", ")
            ));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("CANDIDATE RANKING"));
        output.push_str(&format!(
            "Generated: {} | Provider: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.provider
        ));
        output.push_str(&format!(
            "Files: {} attempted, {} analyzed, {} errors, {} skipped\n\n",
            report.summary.files_attempted,
            report.summary.analyzed,
            report.summary.errors,
            report.summary.skipped
        ));

        if report.candidates.is_empty() {
            output.push_str("No candidates were analyzed.\n");
            return Ok(output);
        }

        output.push_str(&format!(
            "{:>4}  {:<28} {:>5}  {:<10}  {}\n",
            "Rank", "Candidate", "Score", "Fit", "Recommendation"
        ));
        for candidate in &report.candidates {
            let a = &candidate.assessment;
            output.push_str(&format!(
                "{:>4}  {:<28} {:>5}  {}  {}\n",
                candidate.rank,
                truncate(a.display_name(), 28),
                a.fit_score,
                Self::score_bar(a.fit_score),
                self.colorize(a.recommendation.label(), recommendation_color(a.recommendation))
            ));
        }

        if self.detailed {
            output.push_str(&self.format_header("Details"));
            for candidate in &report.candidates {
                output.push_str(&self.format_candidate_detail(candidate));
            }
        }

        if !report.skipped.is_empty() {
            output.push_str(&format!("\nSkipped {} files:\n", report.skipped.len()));
            for skipped in &report.skipped {
                output.push_str(&format!(
                    "  - {} ({:?})\n",
                    skipped.path.display(),
                    skipped.reason
                ));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut md = String::from("# Candidate Ranking\n\n");

        if self.include_metadata {
            md.push_str(&format!(
                "- **Generated:** {}\n- **Provider:** {}\n- **Files:** {} attempted, {} analyzed, {} errors, {} skipped\n\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.provider,
                report.summary.files_attempted,
                report.summary.analyzed,
                report.summary.errors,
                report.summary.skipped
            ));
        }

        md.push_str("| Rank | Candidate | Score | Recommendation | File |\n");
        md.push_str("|---:|---|---:|---|---|\n");
        for candidate in &report.candidates {
            let a = &candidate.assessment;
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                candidate.rank,
                Self::escape_cell(a.display_name()),
                a.fit_score,
                a.recommendation,
                Self::escape_cell(&a.source_file_name)
            ));
        }

        for candidate in &report.candidates {
            let a = &candidate.assessment;
            md.push_str(&format!(
                "\n## {}. {} ({})\n\n",
                candidate.rank,
                a.display_name(),
                a.fit_score
            ));
            md.push_str(&format!("**Recommendation:** {}\n\n", a.recommendation));
            if !a.experience_summary.is_empty() {
                md.push_str(&format!("**Experience:** {}\n\n", a.experience_summary));
            }
            if !a.education_summary.is_empty() {
                md.push_str(&format!("**Education:** {}\n\n", a.education_summary));
            }
            if !a.matched_skills.is_empty() {
                md.push_str("**Matched skills**\n\n");
                for skill in &a.matched_skills {
                    md.push_str(&format!("- {}\n", skill));
                }
                md.push('\n');
            }
            if !a.missing_skills.is_empty() {
                md.push_str("**Missing skills**\n\n");
                for skill in &a.missing_skills {
                    md.push_str(&format!("- {}\n", skill));
                }
                md.push('\n');
            }
        }

        Ok(md)
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(file_path, content).map_err(|e| {
        CvRankerError::OutputFormatting(format!(
            "Failed to write report to {}: {}",
            file_path.display(),
            e
        ))
    })
}

/// Where `--save` writes: a directory target gets a timestamped
/// [`suggest_filename`], anything else is used as given.
pub fn resolve_save_path(target: &Path, format: OutputFormat) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, true))
    } else {
        target.to_path_buf()
    }
}

pub fn suggest_filename(format: OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("candidate_ranking{}.txt", timestamp_suffix),
        OutputFormat::Json => format!("candidate_ranking{}.json", timestamp_suffix),
        OutputFormat::Markdown => format!("candidate_ranking{}.md", timestamp_suffix),
    }
}
