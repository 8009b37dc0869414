//! Output formatters for comparison reports

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::{CategoryBreakdown, ComparisonReport};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting comparison reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ComparisonReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
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

/// Picks the formatter for the requested output format
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

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            80..=100 => ("STRONG", Color::Green),
            60..=79 => ("GOOD", Color::BrightGreen),
            40..=59 => ("PARTIAL", Color::Yellow),
            _ => ("WEAK", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_breakdown(&self, groups: &[CategoryBreakdown], color: Color) -> String {
        let mut output = String::new();
        for group in groups {
            output.push_str(&format!(
                "  {:<14} {}\n",
                format!("{}:", group.category),
                self.colorize(&group.skills.join(", "), color)
            ));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ComparisonReport) -> Result<String> {
        let mut output = String::new();
        let comparison = &report.comparison;

        output.push_str(&self.format_header("RESUME SKILL MATCH", 1));
        output.push_str(&format!(
            "Generated: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Match: {}% {}\n",
            report.match_percentage(),
            self.format_score_badge(report.match_percentage())
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&report.verdict, Color::Cyan)));
        output.push_str(&format!("Job seniority: {}\n", report.job_experience_level));

        output.push_str(&self.format_header(&format!("Matched skills ({})", comparison.matched_skills.len()), 3));
        if comparison.matched_skills.is_empty() {
            output.push_str("  (none)\n");
        } else if self.detailed {
            output.push_str(&self.format_breakdown(&report.matched_by_category, Color::Green));
        } else {
            for skill in &comparison.matched_skills {
                output.push_str(&format!("  ✓ {}\n", self.colorize(skill, Color::Green)));
            }
        }

        output.push_str(&self.format_header(&format!("Missing skills ({})", comparison.missing_skills.len()), 3));
        if comparison.missing_skills.is_empty() {
            output.push_str("  (none)\n");
        } else if self.detailed {
            output.push_str(&self.format_breakdown(&report.missing_by_category, Color::Red));
        } else {
            for skill in &comparison.missing_skills {
                output.push_str(&format!("  ✗ {}\n", self.colorize(skill, Color::Red)));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Files", 3));
            output.push_str(&format!(
                "  Resume: {} ({} skills)\n",
                report.metadata.resume_file, report.metadata.resume_skill_count
            ));
            output.push_str(&format!(
                "  Job:    {} ({} skills)\n",
                report.metadata.job_file, report.metadata.job_skill_count
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ComparisonReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn skill_list(skills: &[String]) -> String {
        if skills.is_empty() {
            return "_None_\n".to_string();
        }
        skills.iter().map(|s| format!("- `{}`\n", s)).collect()
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ComparisonReport) -> Result<String> {
        let mut output = String::new();
        let comparison = &report.comparison;

        output.push_str("# Resume Skill Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                file_name(&report.metadata.resume_file),
                file_name(&report.metadata.job_file)
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!("**Match:** {}%\n\n", report.match_percentage()));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict));
        output.push_str(&format!("**Job seniority:** {}\n\n", report.job_experience_level));

        output.push_str("## Matched Skills\n\n");
        output.push_str(&Self::skill_list(comparison.matched_skills.as_slice()));
        output.push('\n');

        output.push_str("## Missing Skills\n\n");
        output.push_str(&Self::skill_list(comparison.missing_skills.as_slice()));

        if !report.matched_by_category.is_empty() || !report.missing_by_category.is_empty() {
            output.push_str("\n## By Category\n\n");
            output.push_str("| Category | Matched | Missing |\n");
            output.push_str("|----------|---------|---------|\n");
            for category in crate::processing::skills::SkillCategory::ALL {
                let find = |groups: &[CategoryBreakdown]| {
                    groups
                        .iter()
                        .find(|g| g.category == category)
                        .map(|g| g.skills.join(", "))
                        .unwrap_or_default()
                };
                let matched = find(&report.matched_by_category);
                let missing = find(&report.missing_by_category);
                if matched.is_empty() && missing.is_empty() {
                    continue;
                }
                output.push_str(&format!("| {} | {} | {} |\n", category, matched, missing));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
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

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed, true, true)
    }

    pub fn generate_report(&self, report: &ComparisonReport, format: &OutputFormat) -> Result<String> {
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
    use std::fs;
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
