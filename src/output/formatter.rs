//! Output formatters: console, JSON, and Markdown renderings of an analysis report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{AnalysisReport, ScoreBand};
use colored::{Color, Colorize};
use std::path::{Path, PathBuf};

/// Trait for rendering analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharable reports
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

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::BrightGreen,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Poor => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_list(&self, items: &[String], color: Color) -> String {
        if items.is_empty() {
            self.colorize("none", Color::BrightBlack)
        } else {
            self.colorize(&items.join(", "), color)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME ATS ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Resume: {} | Job: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.resume_source,
            report.metadata.job_source
        ));

        output.push_str(&self.format_header("Score", 2));
        output.push_str(&format!(
            "ATS Score: {}/100 {}\n",
            analysis.ats_score,
            self.format_score_badge(report.score_band())
        ));
        if report.has_job_description() {
            output.push_str(&format!(
                "🎯 Keyword similarity: {:.1}% | Skill coverage: {:.1}%\n",
                report.similarity * 100.0,
                report.coverage * 100.0
            ));
        } else {
            output.push_str(&format!(
                "{}\n",
                self.colorize(
                    "No job skills to compare against; scored from the resume alone",
                    Color::Cyan
                )
            ));
        }

        output.push_str(&self.format_header("Skills", 2));
        output.push_str(&format!(
            "🛠️  Technical: {}\n",
            self.format_list(&analysis.skills_found, Color::Green)
        ));
        output.push_str(&format!(
            "🤝 Soft: {}\n",
            self.format_list(&analysis.soft_skills_found, Color::Green)
        ));
        if report.has_job_description() {
            output.push_str(&format!(
                "❌ Missing from job: {}\n",
                self.format_list(&analysis.missing_skills_job, Color::Red)
            ));
        }

        if !report.skill_gaps.is_empty() {
            output.push_str(&self.format_header("🚨 Skill Gaps", 3));
            for (category, skills) in report.skill_gaps.iter() {
                output.push_str(&format!(
                    "  • {}: {}\n",
                    self.colorize(category.label(), Color::Yellow),
                    skills.join(", ")
                ));
            }
        }

        output.push_str(&self.format_header("📋 Suggestions", 2));
        for (i, suggestion) in analysis.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }

        if self.detailed {
            output.push_str(&self.format_header("📊 Detailed Analysis", 2));

            if !report.semantic_matches.is_empty() {
                let title = format!("Job skills by relevance ({})", report.metadata.ranker);
                output.push_str(&self.format_header(&title, 3));
                for ranked in &report.semantic_matches {
                    output.push_str(&format!("  {:>3}%  {}\n", ranked.score, ranked.phrase));
                }
            }

            output.push_str(&self.format_header("Readability", 3));
            output.push_str(&format!(
                "Words: {} | Sentences: {} | Flesch reading ease: {:.1}\n",
                report.readability.word_count,
                report.readability.sentence_count,
                report.readability.flesch_reading_ease
            ));

            output.push_str(&self.format_header("Text Preview", 3));
            output.push_str(&format!(
                "{}\n",
                self.colorize(&analysis.raw_text_preview, Color::BrightBlack)
            ));
        }

        output.push_str(&format!(
            "\n{} Generated by Resume Analyzer v{}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.analyzer_version
        ));

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
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
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

    fn markdown_score_badge(band: ScoreBand) -> &'static str {
        match band {
            ScoreBand::Excellent => "🟢 Excellent",
            ScoreBand::Good => "🟡 Good",
            ScoreBand::Fair => "🟠 Fair",
            ScoreBand::Poor => "🔴 Poor",
        }
    }

    fn inline_code_list(items: &[String]) -> String {
        if items.is_empty() {
            "_none_".to_string()
        } else {
            format!("`{}`", items.join("`, `"))
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str("# 📊 Resume ATS Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.resume_source, report.metadata.job_source
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**ATS Score:** {}/100 {}\n\n",
            analysis.ats_score,
            Self::markdown_score_badge(report.score_band())
        ));

        if report.has_job_description() {
            output.push_str("| Signal | Value |\n");
            output.push_str("|--------|-------|\n");
            output.push_str(&format!(
                "| 🎯 Keyword similarity | {:.1}% |\n",
                report.similarity * 100.0
            ));
            output.push_str(&format!(
                "| 🔍 Skill coverage | {:.1}% |\n\n",
                report.coverage * 100.0
            ));
        }

        output.push_str("## Skills\n\n");
        output.push_str(&format!(
            "- **Technical:** {}\n",
            Self::inline_code_list(&analysis.skills_found)
        ));
        output.push_str(&format!(
            "- **Soft:** {}\n",
            Self::inline_code_list(&analysis.soft_skills_found)
        ));
        if report.has_job_description() {
            output.push_str(&format!(
                "- **Missing from job:** {}\n",
                Self::inline_code_list(&analysis.missing_skills_job)
            ));
        }
        output.push('\n');

        if !report.skill_gaps.is_empty() {
            output.push_str("### Skill Gaps\n\n");
            for (category, skills) in report.skill_gaps.iter() {
                output.push_str(&format!("- **{}:** {}\n", category.label(), skills.join(", ")));
            }
            output.push('\n');
        }

        output.push_str("## 📋 Suggestions\n\n");
        for (i, suggestion) in analysis.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }
        output.push('\n');

        if !report.semantic_matches.is_empty() {
            output.push_str("## Job Skills by Relevance\n\n");
            output.push_str("| Skill | Score |\n");
            output.push_str("|-------|-------|\n");
            for ranked in &report.semantic_matches {
                output.push_str(&format!("| {} | {}% |\n", ranked.phrase, ranked.score));
            }
            output.push('\n');
        }

        output.push_str("## Readability\n\n");
        output.push_str(&format!(
            "**Words:** {} | **Sentences:** {} | **Flesch reading ease:** {:.1}\n\n",
            report.readability.word_count,
            report.readability.sentence_count,
            report.readability.flesch_reading_ease
        ));

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Analyzer v{} using {}*\n",
                report.metadata.analyzer_version, report.metadata.ranker
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
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
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_analysis{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_analysis{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_analysis{}.md", base_name, timestamp_suffix),
    }
}

/// Where `--save` writes: an existing directory gets a generated file name inside it
pub fn resolve_save_path(target: &Path, format: OutputFormat, resume_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, resume_name, true))
    } else {
        target.to_path_buf()
    }
}
